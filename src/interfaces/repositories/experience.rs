use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::experience::{Experience, ExperienceInput, ExperienceKind},
    errors::AppError,
    repositories::sqlx_repo::SqlxExperienceRepo,
};

const EXPERIENCE_COLUMNS: &str = "id, kind, title, organization, location, start_date, end_date, \
     current, description, highlights, sort_order, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Latest first (`sort_order` descending).
    async fn list_experience(&self, kind: Option<ExperienceKind>) -> Result<Vec<Experience>, AppError>;
    async fn get_experience(&self, id: &Uuid) -> Result<Option<Experience>, AppError>;
    async fn create_experience(&self, input: &ExperienceInput) -> Result<Experience, AppError>;
    async fn update_experience(&self, id: &Uuid, input: &ExperienceInput) -> Result<Option<Experience>, AppError>;
    async fn delete_experience(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn list_experience(&self, kind: Option<ExperienceKind>) -> Result<Vec<Experience>, AppError> {
        let sql = format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experience \
             WHERE ($1::experience_kind IS NULL OR kind = $1) \
             ORDER BY sort_order DESC, created_at DESC"
        );
        let entries = sqlx::query_as::<_, Experience>(&sql)
            .bind(kind)
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    async fn get_experience(&self, id: &Uuid) -> Result<Option<Experience>, AppError> {
        let sql = format!("SELECT {EXPERIENCE_COLUMNS} FROM experience WHERE id = $1");
        let entry = sqlx::query_as::<_, Experience>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn create_experience(&self, input: &ExperienceInput) -> Result<Experience, AppError> {
        let sql = format!(
            r#"
            INSERT INTO experience
                (kind, title, organization, location, start_date, end_date, current, description, highlights, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {EXPERIENCE_COLUMNS}
            "#
        );
        let entry = sqlx::query_as::<_, Experience>(&sql)
            .bind(input.kind)
            .bind(input.title.trim())
            .bind(input.organization.trim())
            .bind(&input.location)
            .bind(input.start_date.trim())
            .bind(&input.end_date)
            .bind(input.current)
            .bind(&input.description)
            .bind(&input.highlights)
            .bind(input.order)
            .fetch_one(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn update_experience(&self, id: &Uuid, input: &ExperienceInput) -> Result<Option<Experience>, AppError> {
        let sql = format!(
            r#"
            UPDATE experience SET
                kind = $2, title = $3, organization = $4, location = $5, start_date = $6,
                end_date = $7, current = $8, description = $9, highlights = $10, sort_order = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EXPERIENCE_COLUMNS}
            "#
        );
        let entry = sqlx::query_as::<_, Experience>(&sql)
            .bind(id)
            .bind(input.kind)
            .bind(input.title.trim())
            .bind(input.organization.trim())
            .bind(&input.location)
            .bind(input.start_date.trim())
            .bind(&input.end_date)
            .bind(input.current)
            .bind(&input.description)
            .bind(&input.highlights)
            .bind(input.order)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn delete_experience(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM experience WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
