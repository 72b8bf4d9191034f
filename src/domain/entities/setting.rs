use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Setting {
    pub id: Uuid,
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSettingRequest {
    pub value: serde_json::Value,
}

/// Public view of one key; `value` is null when the key was never set.
#[derive(Debug, Serialize, PartialEq)]
pub struct SettingValueResponse {
    pub key: String,
    pub value: serde_json::Value,
}
