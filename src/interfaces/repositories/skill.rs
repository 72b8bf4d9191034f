use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::skill::{Skill, SkillInput},
    errors::AppError,
    repositories::sqlx_repo::SqlxSkillRepo,
};

const SKILL_COLUMNS: &str = "id, name, category, level, icon, icon_url, sort_order, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError>;
    async fn get_skill(&self, id: &Uuid) -> Result<Option<Skill>, AppError>;
    async fn create_skill(&self, input: &SkillInput) -> Result<Skill, AppError>;
    async fn update_skill(&self, id: &Uuid, input: &SkillInput) -> Result<Option<Skill>, AppError>;
    async fn delete_skill(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        let sql = format!("SELECT {SKILL_COLUMNS} FROM skills ORDER BY sort_order ASC, name ASC");
        let skills = sqlx::query_as::<_, Skill>(&sql).fetch_all(&self.pool).await?;
        Ok(skills)
    }

    async fn get_skill(&self, id: &Uuid) -> Result<Option<Skill>, AppError> {
        let sql = format!("SELECT {SKILL_COLUMNS} FROM skills WHERE id = $1");
        let skill = sqlx::query_as::<_, Skill>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(skill)
    }

    async fn create_skill(&self, input: &SkillInput) -> Result<Skill, AppError> {
        let sql = format!(
            "INSERT INTO skills (name, category, level, icon, icon_url, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {SKILL_COLUMNS}"
        );
        let skill = sqlx::query_as::<_, Skill>(&sql)
            .bind(input.name.trim())
            .bind(input.category.trim())
            .bind(input.level)
            .bind(&input.icon)
            .bind(&input.icon_url)
            .bind(input.order)
            .fetch_one(&self.pool)
            .await?;
        Ok(skill)
    }

    async fn update_skill(&self, id: &Uuid, input: &SkillInput) -> Result<Option<Skill>, AppError> {
        let sql = format!(
            "UPDATE skills SET name = $2, category = $3, level = $4, icon = $5, icon_url = $6, \
             sort_order = $7, updated_at = NOW() WHERE id = $1 RETURNING {SKILL_COLUMNS}"
        );
        let skill = sqlx::query_as::<_, Skill>(&sql)
            .bind(id)
            .bind(input.name.trim())
            .bind(input.category.trim())
            .bind(input.level)
            .bind(&input.icon)
            .bind(&input.icon_url)
            .bind(input.order)
            .fetch_optional(&self.pool)
            .await?;
        Ok(skill)
    }

    async fn delete_skill(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
