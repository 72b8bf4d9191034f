use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::social_link::{NewSocialLink, SocialLink, UpdateSocialLink},
    errors::AppError,
    repositories::sqlx_repo::SqlxSocialLinkRepo,
};

const SOCIAL_LINK_COLUMNS: &str =
    "id, name, url, icon_url, default_emoji, color, sort_order, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialLinkRepository: Send + Sync {
    async fn list_social_links(&self) -> Result<Vec<SocialLink>, AppError>;
    /// Appends at `max(sort_order) + 1`.
    async fn create_social_link(&self, input: &NewSocialLink) -> Result<SocialLink, AppError>;
    async fn update_social_link(&self, id: &Uuid, patch: &UpdateSocialLink) -> Result<Option<SocialLink>, AppError>;
    async fn delete_social_link(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxSocialLinkRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSocialLinkRepo { pool }
    }
}

#[async_trait]
impl SocialLinkRepository for SqlxSocialLinkRepo {
    async fn list_social_links(&self) -> Result<Vec<SocialLink>, AppError> {
        let sql = format!("SELECT {SOCIAL_LINK_COLUMNS} FROM social_links ORDER BY sort_order ASC, created_at ASC");
        let links = sqlx::query_as::<_, SocialLink>(&sql).fetch_all(&self.pool).await?;
        Ok(links)
    }

    async fn create_social_link(&self, input: &NewSocialLink) -> Result<SocialLink, AppError> {
        let sql = format!(
            r#"
            INSERT INTO social_links (name, url, icon_url, default_emoji, color, sort_order)
            SELECT $1, $2, $3, $4, $5, COALESCE(MAX(sort_order), 0) + 1 FROM social_links
            RETURNING {SOCIAL_LINK_COLUMNS}
            "#
        );
        let link = sqlx::query_as::<_, SocialLink>(&sql)
            .bind(input.name.trim())
            .bind(input.url.trim())
            .bind(&input.icon_url)
            .bind(&input.default_emoji)
            .bind(&input.color)
            .fetch_one(&self.pool)
            .await?;
        Ok(link)
    }

    async fn update_social_link(&self, id: &Uuid, patch: &UpdateSocialLink) -> Result<Option<SocialLink>, AppError> {
        let (icon_touched, icon_value) = patch.icon_url.sql_pair();
        let sql = format!(
            r#"
            UPDATE social_links SET
                name = COALESCE($2, name),
                url = COALESCE($3, url),
                icon_url = CASE WHEN $4 THEN $5 ELSE icon_url END,
                default_emoji = COALESCE($6, default_emoji),
                color = COALESCE($7, color),
                sort_order = COALESCE($8, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {SOCIAL_LINK_COLUMNS}
            "#
        );
        let link = sqlx::query_as::<_, SocialLink>(&sql)
            .bind(id)
            .bind(patch.name.as_deref().map(str::trim))
            .bind(patch.url.as_deref().map(str::trim))
            .bind(icon_touched)
            .bind(icon_value)
            .bind(&patch.default_emoji)
            .bind(&patch.color)
            .bind(patch.order)
            .fetch_optional(&self.pool)
            .await?;
        Ok(link)
    }

    async fn delete_social_link(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM social_links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
