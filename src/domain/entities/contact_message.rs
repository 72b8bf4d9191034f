use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validation::not_blank;
use crate::errors::AppError;

// ───── Status ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "message_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    New,
    Read,
    Replied,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::New => "new",
            MessageStatus::Read => "read",
            MessageStatus::Replied => "replied",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(MessageStatus::New),
            "read" => Ok(MessageStatus::Read),
            "replied" => Ok(MessageStatus::Replied),
            other => Err(AppError::InvalidInput(format!("Unknown message status: {}", other))),
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    pub reply_text: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub email_sent: Option<bool>,
    pub email_message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessageInsert {
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

/// Delivery record written only after the reply email went out.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyRecord {
    pub reply_text: String,
    pub replied_at: DateTime<Utc>,
    pub email_sent: bool,
    pub email_message_id: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MessageStats {
    pub total: i64,
    pub new: i64,
    pub read: i64,
    pub replied: i64,
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewContactMessage {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        custom(function = "not_blank", message = "Message is required"),
        length(max = 5000, message = "Message must be at most 5000 characters")
    )]
    pub message: String,
}

impl NewContactMessage {
    pub fn prepare_for_insert(&self) -> ContactMessageInsert {
        ContactMessageInsert {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            status: MessageStatus::New,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: MessageStatus,
}

/// Ids arrive as raw strings; the bulk use case decides which are usable.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkStatusRequest {
    pub ids: Vec<String>,
    pub status: MessageStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyRequest {
    pub message_id: String,

    #[validate(
        custom(function = "not_blank", message = "Reply text is required"),
        length(max = 10000, message = "Reply must be at most 10000 characters")
    )]
    pub reply_text: String,

    #[validate(length(max = 100, message = "Sender name must be at most 100 characters"))]
    pub sender_display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageListQuery {
    pub status: Option<MessageStatus>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ContactSubmittedResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ContactMessageListResponse {
    pub messages: Vec<ContactMessage>,
    pub total: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BulkOperationResponse {
    pub processed: Vec<Uuid>,
    pub skipped: Vec<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub success: bool,
    pub message: String,
    pub email_message_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Read".parse::<MessageStatus>().unwrap(), MessageStatus::Read);
        assert_eq!(" replied ".parse::<MessageStatus>().unwrap(), MessageStatus::Replied);
        assert!("archived".parse::<MessageStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&MessageStatus::Replied).unwrap();
        assert_eq!(json, "\"replied\"");
    }

    #[test]
    fn blank_fields_fail_validation() {
        let form = NewContactMessage {
            name: "   ".into(),
            email: "jane@example.com".into(),
            message: "\n".into(),
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("message"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn insert_starts_as_new() {
        let form = NewContactMessage {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            message: "Hello there".into(),
        };
        let insert = form.prepare_for_insert();
        assert_eq!(insert.status, MessageStatus::New);
        assert_eq!(insert.message, "Hello there");
    }
}
