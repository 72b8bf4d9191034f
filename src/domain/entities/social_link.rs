use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{option_fields::PatchString, validation::{not_blank, web_url}};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SocialLink {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub icon_url: Option<String>,
    pub default_emoji: String,
    pub color: String,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSocialLink {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(custom(function = "web_url"))]
    pub url: String,

    #[validate(custom(function = "web_url"))]
    pub icon_url: Option<String>,

    #[serde(default)]
    pub default_emoji: String,

    /// CSS classes used by the site for the badge.
    #[serde(default)]
    pub color: String,
}

/// PATCH body: absent fields stay as they are; `icon_url: null` clears the icon.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSocialLink {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(custom(function = "web_url"))]
    pub url: Option<String>,

    #[serde(default)]
    pub icon_url: PatchString,

    pub default_emoji: Option<String>,

    pub color: Option<String>,

    pub order: Option<i32>,
}

impl UpdateSocialLink {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.url.is_none()
            && self.icon_url.is_unchanged()
            && self.default_emoji.is_none()
            && self.color.is_none()
            && self.order.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::option_fields::OptionField;

    #[test]
    fn patch_distinguishes_missing_and_null_icon() {
        let absent: UpdateSocialLink = serde_json::from_str(r#"{"name":"GitHub"}"#).unwrap();
        assert!(absent.icon_url.is_unchanged());

        let cleared: UpdateSocialLink = serde_json::from_str(r#"{"icon_url":null}"#).unwrap();
        assert_eq!(cleared.icon_url, OptionField::SetToNull);

        let set: UpdateSocialLink =
            serde_json::from_str(r#"{"icon_url":"/images/social/gh.png"}"#).unwrap();
        assert_eq!(set.icon_url, OptionField::SetToValue("/images/social/gh.png".to_string()));
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch: UpdateSocialLink = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }
}
