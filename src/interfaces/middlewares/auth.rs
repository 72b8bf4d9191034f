use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{constants::ADMIN_PREFIX, errors::AuthError, AppState};

/// Guards everything under the admin prefix with the single admin bearer token.
/// Public routes and CORS preflights pass straight through.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            // the router matches on the decoded path, so the gate must too
            let path = req.match_info().as_str().to_string();
            if is_public_route(&path, req.method().as_str()) {
                return service.call(req).await;
            }

            let state = req.app_data::<web::Data<AppState>>()
                .ok_or_else(|| {
                    tracing::error!("AppState missing in middleware");
                    AuthError::MissingTokenService
                })?
                .clone();

            let Some(token) = extract_token(&req) else {
                tracing::warn!(path = %path, "Missing or malformed Authorization header");
                return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "Missing or invalid credentials"
                }))));
            };

            let claims = match state.jwt_service.verify_admin(&token) {
                Ok(claims) => claims,
                Err(AuthError::Forbidden(reason)) => {
                    tracing::warn!(path = %path, "Admin access denied: {}", reason);
                    return Ok(custom_error_response(req, HttpResponse::Forbidden().json(serde_json::json!({
                        "error": "Admin access required"
                    }))));
                }
                Err(AuthError::TokenExpired) => {
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Token has expired"
                    }))));
                }
                Err(e) => {
                    tracing::warn!(path = %path, "Rejected admin token: {}", e);
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Missing or invalid credentials"
                    }))));
                }
            };

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    !(path == ADMIN_PREFIX || path.starts_with(&format!("{}/", ADMIN_PREFIX)))
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}
