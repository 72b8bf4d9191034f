use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact_message::NewContactMessage,
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

fn rate_limit_keys(client_ip: &str, email: &str) -> Vec<String> {
    let mut keys = vec![format!("ip:{}", client_ip)];
    let email = email.trim().to_lowercase();
    if !email.is_empty() {
        keys.push(format!("email:{}", email));
    }
    keys
}

#[instrument(skip(req, state, data))]
pub async fn submit_contact_message(
    req: HttpRequest,
    state: web::Data<AppState>,
    data: web::Json<NewContactMessage>,
) -> Result<impl Responder, AppError> {
    let client_ip = get_client_ip(&req, state.trust_proxy_headers);
    let keys = rate_limit_keys(&client_ip, &data.email);

    if let Err(retry_after) = state.contact_limiter.check_all(&keys) {
        tracing::warn!(client_ip = %client_ip, "Contact form rate limit hit");
        return Err(AppError::RateLimited(retry_after));
    }

    let response = state.contact_handler.submit(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}
