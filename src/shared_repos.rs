use crate::repositories::sqlx_repo::{
    SqlxContactMessageRepo, SqlxDashboardRepo, SqlxExperienceRepo, SqlxProjectRepo,
    SqlxSettingRepo, SqlxSkillRepo, SqlxSocialLinkRepo,
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub project_repo: SqlxProjectRepo,
    pub skill_repo: SqlxSkillRepo,
    pub experience_repo: SqlxExperienceRepo,
    pub setting_repo: SqlxSettingRepo,
    pub social_repo: SqlxSocialLinkRepo,
    pub contact_repo: SqlxContactMessageRepo,
    pub dashboard_repo: SqlxDashboardRepo,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            project_repo: SqlxProjectRepo::new(pool.clone()),
            skill_repo: SqlxSkillRepo::new(pool.clone()),
            experience_repo: SqlxExperienceRepo::new(pool.clone()),
            setting_repo: SqlxSettingRepo::new(pool.clone()),
            social_repo: SqlxSocialLinkRepo::new(pool.clone()),
            contact_repo: SqlxContactMessageRepo::new(pool.clone()),
            dashboard_repo: SqlxDashboardRepo::new(pool),
        }
    }
}
