use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validation::{not_blank, web_url};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub level: i16,
    pub icon: Option<String>,
    pub icon_url: Option<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillInput {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,

    /// Free-form grouping such as "frontend", "backend", "database", "tools".
    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = 50, message = "Category must be at most 50 characters")
    )]
    pub category: String,

    #[validate(range(min = 1, max = 5, message = "Level must be between 1 and 5"))]
    pub level: i16,

    pub icon: Option<String>,

    #[validate(custom(function = "web_url"))]
    pub icon_url: Option<String>,

    #[serde(default)]
    pub order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_outside_range_is_rejected() {
        let input = SkillInput {
            name: "Rust".into(),
            category: "backend".into(),
            level: 9,
            icon: None,
            icon_url: None,
            order: 0,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("level"));
    }
}
