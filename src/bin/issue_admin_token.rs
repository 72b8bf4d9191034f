//! Prints a bearer token for the configured admin account.

use portfolio_backend::{auth::jwt::JwtService, settings::AppConfig};

fn main() {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    match JwtService::new(&config).issue_admin_token() {
        Ok(token) => {
            eprintln!(
                "Token for {} valid for {} minutes:",
                config.admin_email, config.admin_token_exp_minutes
            );
            println!("{}", token);
        }
        Err(e) => {
            eprintln!("Could not issue token: {}", e);
            std::process::exit(1);
        }
    }
}
