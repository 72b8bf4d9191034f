use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};
use uuid::Uuid;

use crate::entities::token::Claims;
use crate::errors::AuthError;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    admin_email: String,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            admin_email: config.admin_email.trim().to_lowercase(),
            expiration: Duration::minutes(config.admin_token_exp_minutes),
        }
    }

    /// Mints a bearer token for the configured admin. There is no login flow; tokens
    /// are issued out of band.
    pub fn issue_admin_token(&self) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: self.admin_email.clone(),
            exp: (now + self.expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }

    /// Valid signature and the subject is the configured admin.
    pub fn verify_admin(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode_jwt(token)?.claims;
        if claims.email.trim().to_lowercase() != self.admin_email {
            tracing::warn!(email = %claims.email, "Token is not for the admin account");
            return Err(AuthError::Forbidden("Admin access required".into()));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, email: &str) -> AppConfig {
        AppConfig {
            admin_email: email.into(),
            admin_token_secret: secret.into(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn issued_token_verifies() {
        let service = JwtService::new(&config(&"s".repeat(40), "Admin@Example.com"));
        let token = service.issue_admin_token().unwrap();
        let claims = service.verify_admin(&token).unwrap();
        assert_eq!(claims.email, "admin@example.com");
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let issuer = JwtService::new(&config(&"a".repeat(40), "admin@example.com"));
        let verifier = JwtService::new(&config(&"b".repeat(40), "admin@example.com"));
        let token = issuer.issue_admin_token().unwrap();
        assert!(matches!(verifier.verify_admin(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn token_for_someone_else_is_forbidden() {
        let secret = "c".repeat(40);
        let issuer = JwtService::new(&config(&secret, "intruder@example.com"));
        let verifier = JwtService::new(&config(&secret, "admin@example.com"));
        let token = issuer.issue_admin_token().unwrap();
        assert!(matches!(verifier.verify_admin(&token), Err(AuthError::Forbidden(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut cfg = config(&"d".repeat(40), "admin@example.com");
        cfg.admin_token_exp_minutes = -10;
        let service = JwtService::new(&cfg);
        let token = service.issue_admin_token().unwrap();
        assert!(matches!(service.verify_admin(&token), Err(AuthError::TokenExpired)));
    }
}
