use async_trait::async_trait;

use crate::{
    entities::setting::Setting,
    errors::AppError,
    repositories::sqlx_repo::SqlxSettingRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingRepository: Send + Sync {
    async fn list_settings(&self) -> Result<Vec<Setting>, AppError>;
    async fn get_setting(&self, key: &str) -> Result<Option<Setting>, AppError>;
    async fn upsert_setting(&self, key: &str, value: &serde_json::Value) -> Result<Setting, AppError>;
}

impl SqlxSettingRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSettingRepo { pool }
    }
}

#[async_trait]
impl SettingRepository for SqlxSettingRepo {
    async fn list_settings(&self) -> Result<Vec<Setting>, AppError> {
        let settings = sqlx::query_as::<_, Setting>(
            "SELECT id, key, value, updated_at FROM settings ORDER BY key ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(settings)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Setting>, AppError> {
        let setting = sqlx::query_as::<_, Setting>(
            "SELECT id, key, value, updated_at FROM settings WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(setting)
    }

    async fn upsert_setting(&self, key: &str, value: &serde_json::Value) -> Result<Setting, AppError> {
        let setting = sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING id, key, value, updated_at
            "#,
        )
        .bind(key)
        .bind(sqlx::types::Json(value))
        .fetch_one(&self.pool)
        .await?;
        Ok(setting)
    }
}
