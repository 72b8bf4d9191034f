use std::collections::HashSet;

use chrono::Utc;
use futures::future::join_all;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::MAX_BULK_IDS,
    email::{templates, Mailer},
    entities::contact_message::{
        BulkDeleteRequest, BulkOperationResponse, BulkStatusRequest, ContactMessage,
        ContactMessageListResponse, ContactSubmittedResponse, MessageStats, MessageStatus,
        NewContactMessage, ReplyRecord, ReplyRequest, ReplyResponse,
    },
    errors::AppError,
    repositories::contact_message::ContactMessageRepository,
    settings::ContactConfig,
    utils::valid_uuid::valid_uuid,
};

/// Splits raw ids into parsed, de-duplicated UUIDs (first occurrence wins) and the
/// entries that could not be parsed.
pub fn parse_bulk_ids(raw: &[String]) -> Result<(Vec<Uuid>, Vec<String>), AppError> {
    if raw.len() > MAX_BULK_IDS {
        return Err(AppError::InvalidInput(format!(
            "At most {} message identifiers can be sent at once",
            MAX_BULK_IDS
        )));
    }

    let mut seen = HashSet::with_capacity(raw.len());
    let mut valid = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();

    for entry in raw {
        match Uuid::parse_str(entry.trim()) {
            Ok(id) => {
                if seen.insert(id) {
                    valid.push(id);
                }
            }
            Err(_) => skipped.push(entry.clone()),
        }
    }

    if valid.is_empty() {
        return Err(AppError::InvalidInput(
            "No valid message identifiers provided".to_string(),
        ));
    }

    Ok((valid, skipped))
}

fn fold_outcomes(
    ids: &[Uuid],
    outcomes: Vec<Result<Option<Uuid>, AppError>>,
    mut skipped: Vec<String>,
    operation: &str,
) -> (Vec<Uuid>, Vec<String>) {
    let mut processed = Vec::with_capacity(ids.len());

    for (id, outcome) in ids.iter().zip(outcomes) {
        match outcome {
            Ok(Some(done)) => processed.push(done),
            Ok(None) => skipped.push(id.to_string()),
            Err(e) => {
                tracing::warn!(message_id = %id, "Bulk {} failed for entry: {}", operation, e);
                skipped.push(id.to_string());
            }
        }
    }

    (processed, skipped)
}

pub struct ContactHandler<R, M>
where
    R: ContactMessageRepository,
    M: Mailer,
{
    pub contact_repo: R,
    pub mailer: M,
    notification_recipient: String,
    reply_sender_name: String,
}

impl<R, M> ContactHandler<R, M>
where
    R: ContactMessageRepository,
    M: Mailer,
{
    pub fn new(contact_repo: R, mailer: M, config: &ContactConfig, notification_recipient: &str) -> Self {
        ContactHandler {
            contact_repo,
            mailer,
            notification_recipient: notification_recipient.to_string(),
            reply_sender_name: config.reply_sender_name.clone(),
        }
    }

    /// Stores a public submission and notifies the site owner.
    pub async fn submit(&self, request: NewContactMessage) -> Result<ContactSubmittedResponse, AppError> {
        request.validate()?;

        let saved = self.contact_repo.create_message(&request.prepare_for_insert()).await?;
        tracing::info!(message_id = %saved.id, "Contact message stored");

        let notification = templates::new_message_notification(&saved, &self.notification_recipient);
        if let Err(e) = self.mailer.send(notification).await {
            tracing::warn!(message_id = %saved.id, "Contact notification not delivered: {}", e);
        }

        Ok(ContactSubmittedResponse {
            success: true,
            message: "Message sent successfully!".to_string(),
            id: saved.id,
        })
    }

    pub async fn list_messages(&self, status: Option<MessageStatus>) -> Result<ContactMessageListResponse, AppError> {
        let messages = self.contact_repo.list_messages(status).await?;
        let total = messages.len();
        Ok(ContactMessageListResponse { messages, total })
    }

    pub async fn message_stats(&self) -> Result<MessageStats, AppError> {
        self.contact_repo.message_stats().await
    }

    /// Returns the message, marking it read if it was new.
    pub async fn open_message(&self, id: &str) -> Result<ContactMessage, AppError> {
        let id = valid_uuid(id)?;
        self.contact_repo
            .open_message(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact message not found".to_string()))
    }

    pub async fn update_status(&self, id: &str, status: MessageStatus) -> Result<Uuid, AppError> {
        let id = valid_uuid(id)?;
        self.contact_repo
            .update_status(&id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact message not found".to_string()))
    }

    pub async fn mark_read(&self, id: &str) -> Result<Uuid, AppError> {
        self.update_status(id, MessageStatus::Read).await
    }

    pub async fn mark_unread(&self, id: &str) -> Result<Uuid, AppError> {
        self.update_status(id, MessageStatus::New).await
    }

    pub async fn delete_message(&self, id: &str) -> Result<Uuid, AppError> {
        let id = valid_uuid(id)?;
        self.contact_repo
            .delete_message(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact message not found".to_string()))
    }

    /// Applies `status` to every existing message in `ids`. Missing, malformed and
    /// failing entries end up in `skipped`.
    pub async fn bulk_update_status(&self, request: BulkStatusRequest) -> Result<BulkOperationResponse, AppError> {
        let (ids, skipped) = parse_bulk_ids(&request.ids)?;
        let status = request.status;

        let outcomes = join_all(ids.iter().map(|id| self.contact_repo.update_status(id, status))).await;
        let (processed, skipped) = fold_outcomes(&ids, outcomes, skipped, "status update");

        tracing::info!(
            status = %status,
            processed = processed.len(),
            skipped = skipped.len(),
            "Bulk status update finished"
        );

        Ok(BulkOperationResponse {
            message: format!("Updated {} message(s) to {}", processed.len(), status),
            processed,
            skipped,
        })
    }

    pub async fn bulk_delete(&self, request: BulkDeleteRequest) -> Result<BulkOperationResponse, AppError> {
        let (ids, skipped) = parse_bulk_ids(&request.ids)?;

        let outcomes = join_all(ids.iter().map(|id| self.contact_repo.delete_message(id))).await;
        let (processed, skipped) = fold_outcomes(&ids, outcomes, skipped, "delete");

        tracing::info!(
            processed = processed.len(),
            skipped = skipped.len(),
            "Bulk delete finished"
        );

        Ok(BulkOperationResponse {
            message: format!("Deleted {} message(s)", processed.len()),
            processed,
            skipped,
        })
    }

    /// Emails the original sender. The reply is only recorded once the email went out.
    pub async fn reply(&self, request: ReplyRequest) -> Result<ReplyResponse, AppError> {
        request.validate()?;
        let id = valid_uuid(&request.message_id)?;

        let original = self
            .contact_repo
            .get_message(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact message not found".to_string()))?;

        let sender_name = request
            .sender_display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.reply_sender_name);
        let reply_text = request.reply_text.trim();

        let email = templates::reply_to_sender(&original, reply_text, sender_name);
        let email_message_id = self.mailer.send(email).await.map_err(|e| {
            tracing::error!(message_id = %id, "Reply email failed: {}", e);
            AppError::Upstream("Failed to send reply email".to_string())
        })?;

        let record = ReplyRecord {
            reply_text: reply_text.to_string(),
            replied_at: Utc::now(),
            email_sent: true,
            email_message_id: email_message_id.clone(),
        };

        if self.contact_repo.record_reply(&id, &record).await?.is_none() {
            tracing::warn!(message_id = %id, "Reply sent but message was deleted before it could be recorded");
        }

        Ok(ReplyResponse {
            success: true,
            message: format!("Reply sent to {}", original.email),
            email_message_id,
        })
    }
}
