use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSkillRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxExperienceRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSettingRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSocialLinkRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxContactMessageRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxDashboardRepo {
    pub pool: PgPool,
}
