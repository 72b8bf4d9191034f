mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, email, limiter, storage, utils};

use auth::jwt::JwtService;
use email::SmtpMailer;
use limiter::rate_limiter::RateLimiterStore;
use repositories::sqlx_repo::{
    SqlxContactMessageRepo, SqlxDashboardRepo, SqlxExperienceRepo, SqlxProjectRepo,
    SqlxSettingRepo, SqlxSkillRepo, SqlxSocialLinkRepo,
};
use shared_repos::SharedRepositories;
use storage::{ImageStorage, LocalImageBackend};
use use_cases::{
    contact::ContactHandler, dashboard::DashboardHandler, experience::ExperienceHandler,
    projects::ProjectHandler, settings::SettingHandler, skills::SkillHandler,
    social_links::SocialLinkHandler, uploads::UploadHandler,
};

pub type AppContactHandler = ContactHandler<SqlxContactMessageRepo, SmtpMailer>;

pub struct AppState {
    pub jwt_service: JwtService,
    pub project_handler: ProjectHandler<SqlxProjectRepo>,
    pub skill_handler: SkillHandler<SqlxSkillRepo>,
    pub experience_handler: ExperienceHandler<SqlxExperienceRepo>,
    pub setting_handler: SettingHandler<SqlxSettingRepo>,
    pub social_handler: SocialLinkHandler<SqlxSocialLinkRepo>,
    pub contact_handler: AppContactHandler,
    pub dashboard_handler: DashboardHandler<SqlxDashboardRepo>,
    pub upload_handler: UploadHandler,
    pub contact_limiter: RateLimiterStore,
    pub local_images: LocalImageBackend,
    pub trust_proxy_headers: bool,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> anyhow::Result<Self> {
        let storage = ImageStorage::from_config(&config.storage)?;
        Self::with_storage(config, pool, storage)
    }

    /// Same as [`AppState::new`] with a caller-supplied storage front door.
    pub fn with_storage(
        config: &settings::AppConfig,
        pool: sqlx::PgPool,
        storage: ImageStorage,
    ) -> anyhow::Result<Self> {
        let repos = SharedRepositories::new(pool);
        let mailer = SmtpMailer::new(&config.smtp)?;

        Ok(AppState {
            jwt_service: JwtService::new(config),
            project_handler: ProjectHandler::new(repos.project_repo),
            skill_handler: SkillHandler::new(repos.skill_repo),
            experience_handler: ExperienceHandler::new(repos.experience_repo),
            setting_handler: SettingHandler::new(repos.setting_repo),
            social_handler: SocialLinkHandler::new(repos.social_repo),
            contact_handler: ContactHandler::new(
                repos.contact_repo,
                mailer,
                &config.contact,
                config.notification_recipient(),
            ),
            dashboard_handler: DashboardHandler::new(repos.dashboard_repo),
            upload_handler: UploadHandler::new(storage),
            contact_limiter: RateLimiterStore::per_hour(config.contact.rate_limit_per_hour),
            local_images: LocalImageBackend::new(
                config.storage.upload_dir.clone(),
                config.storage.public_prefix.clone(),
            ),
            trust_proxy_headers: config.trust_proxy_headers,
        })
    }
}
