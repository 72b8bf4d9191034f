use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::contact_message::{
        ContactMessage, ContactMessageInsert, MessageStats, MessageStatus, ReplyRecord,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxContactMessageRepo,
};

const MESSAGE_COLUMNS: &str = "id, name, email, message, status, created_at, reply_text, \
     replied_at, email_sent, email_message_id";

/// Single-row writes return the id they touched, or `None` when it does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn create_message(&self, insert: &ContactMessageInsert) -> Result<ContactMessage, AppError>;
    async fn get_message(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError>;
    /// Newest first.
    async fn list_messages(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>, AppError>;
    async fn message_stats(&self) -> Result<MessageStats, AppError>;
    async fn update_status(&self, id: &Uuid, status: MessageStatus) -> Result<Option<Uuid>, AppError>;
    /// Flips `new` to `read` and returns the row; other statuses are left alone.
    async fn open_message(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError>;
    async fn delete_message(&self, id: &Uuid) -> Result<Option<Uuid>, AppError>;
    /// Sets every reply field and `status = replied` in one statement.
    async fn record_reply(&self, id: &Uuid, reply: &ReplyRecord) -> Result<Option<Uuid>, AppError>;
}

impl SqlxContactMessageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactMessageRepo { pool }
    }
}

#[async_trait]
impl ContactMessageRepository for SqlxContactMessageRepo {
    async fn create_message(&self, insert: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        let sql = format!(
            "INSERT INTO contact_messages (name, email, message, status, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {MESSAGE_COLUMNS}"
        );
        let message = sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(insert.name.trim())
            .bind(insert.email.trim())
            .bind(&insert.message)
            .bind(insert.status)
            .bind(insert.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(message)
    }

    async fn get_message(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError> {
        let sql = format!("SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE id = $1");
        let message = sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(message)
    }

    async fn list_messages(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>, AppError> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages \
             WHERE ($1::message_status IS NULL OR status = $1) \
             ORDER BY created_at DESC"
        );
        let messages = sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(messages)
    }

    async fn message_stats(&self) -> Result<MessageStats, AppError> {
        let (total, new, read, replied): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'new'),
                COUNT(*) FILTER (WHERE status = 'read'),
                COUNT(*) FILTER (WHERE status = 'replied')
            FROM contact_messages
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(MessageStats { total, new, read, replied })
    }

    async fn update_status(&self, id: &Uuid, status: MessageStatus) -> Result<Option<Uuid>, AppError> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            "UPDATE contact_messages SET status = $2 WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn open_message(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError> {
        let sql = format!(
            "UPDATE contact_messages \
             SET status = CASE WHEN status = 'new' THEN 'read'::message_status ELSE status END \
             WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
        );
        let message = sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(message)
    }

    async fn delete_message(&self, id: &Uuid) -> Result<Option<Uuid>, AppError> {
        let deleted = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM contact_messages WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(deleted)
    }

    async fn record_reply(&self, id: &Uuid, reply: &ReplyRecord) -> Result<Option<Uuid>, AppError> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE contact_messages SET
                status = 'replied',
                reply_text = $2,
                replied_at = $3,
                email_sent = $4,
                email_message_id = $5
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&reply.reply_text)
        .bind(reply.replied_at)
        .bind(reply.email_sent)
        .bind(&reply.email_message_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }
}
