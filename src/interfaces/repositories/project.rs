use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectInput},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_COLUMNS: &str = "id, title, description, long_description, tech_stack, live_url, \
     code_url, image_url, featured, sort_order, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_projects(&self, featured_only: bool) -> Result<Vec<Project>, AppError>;
    async fn get_project(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
    async fn create_project(&self, input: &ProjectInput) -> Result<Project, AppError>;
    async fn update_project(&self, id: &Uuid, input: &ProjectInput) -> Result<Option<Project>, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self, featured_only: bool) -> Result<Vec<Project>, AppError> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE ($1 = FALSE OR featured = TRUE) \
             ORDER BY sort_order ASC, created_at ASC"
        );
        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(featured_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn get_project(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn create_project(&self, input: &ProjectInput) -> Result<Project, AppError> {
        let sql = format!(
            r#"
            INSERT INTO projects
                (title, description, long_description, tech_stack, live_url, code_url, image_url, featured, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PROJECT_COLUMNS}
            "#
        );
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(input.title.trim())
            .bind(input.description.trim())
            .bind(&input.long_description)
            .bind(&input.tech_stack)
            .bind(&input.live_url)
            .bind(&input.code_url)
            .bind(&input.image_url)
            .bind(input.featured)
            .bind(input.order)
            .fetch_one(&self.pool)
            .await?;

        Ok(project)
    }

    async fn update_project(&self, id: &Uuid, input: &ProjectInput) -> Result<Option<Project>, AppError> {
        let sql = format!(
            r#"
            UPDATE projects SET
                title = $2, description = $3, long_description = $4, tech_stack = $5,
                live_url = $6, code_url = $7, image_url = $8, featured = $9, sort_order = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        );
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(input.title.trim())
            .bind(input.description.trim())
            .bind(&input.long_description)
            .bind(&input.tech_stack)
            .bind(&input.live_url)
            .bind(&input.code_url)
            .bind(&input.image_url)
            .bind(input.featured)
            .bind(input.order)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn delete_project(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
