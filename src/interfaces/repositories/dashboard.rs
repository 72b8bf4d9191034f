use async_trait::async_trait;

use crate::{
    entities::dashboard::ContentCounts,
    errors::AppError,
    repositories::sqlx_repo::SqlxDashboardRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn content_counts(&self) -> Result<ContentCounts, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxDashboardRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxDashboardRepo { pool }
    }
}

#[async_trait]
impl DashboardRepository for SqlxDashboardRepo {
    async fn content_counts(&self) -> Result<ContentCounts, AppError> {
        let counts = sqlx::query_as::<_, ContentCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM projects WHERE featured) AS featured_projects,
                (SELECT COUNT(*) FROM skills) AS skills,
                (SELECT COUNT(*) FROM experience WHERE kind = 'work') AS work_experience,
                (SELECT COUNT(*) FROM experience WHERE kind = 'education') AS education,
                (SELECT COUNT(*) FROM social_links) AS social_links
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
