//! Fills an empty database with demo portfolio content. Tables that already hold rows are skipped.

use tracing_subscriber::EnvFilter;

use portfolio_backend::{
    db::{
        postgres::{create_pool, run_migrations},
        seed::seed_demo_content,
    },
    settings::AppConfig,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .init();

    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Could not connect to the database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        eprintln!("Database migration failed: {}", e);
        std::process::exit(1);
    }

    match seed_demo_content(&pool).await {
        Ok(report) => println!(
            "Seeded {} project(s), {} skill(s), {} experience entr(ies), {} setting(s)",
            report.projects, report.skills, report.experience, report.settings
        ),
        Err(e) => {
            eprintln!("Seeding failed: {}", e);
            std::process::exit(1);
        }
    }
}
