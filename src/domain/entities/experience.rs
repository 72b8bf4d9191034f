use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::validation::not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    Work,
    Education,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub kind: ExperienceKind,
    pub title: String,
    pub organization: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
    pub highlights: Vec<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_dates"))]
pub struct ExperienceInput {
    pub kind: ExperienceKind,

    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,

    #[validate(custom(function = "not_blank", message = "Organization is required"))]
    pub organization: String,

    pub location: Option<String>,

    /// Display string such as "2021-03" or "Mar 2021".
    #[validate(custom(function = "not_blank", message = "Start date is required"))]
    pub start_date: String,

    pub end_date: Option<String>,

    #[serde(default)]
    pub current: bool,

    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[serde(default)]
    pub order: i32,
}

fn validate_dates(input: &ExperienceInput) -> Result<(), ValidationError> {
    if input.current && input.end_date.as_deref().is_some_and(|d| !d.trim().is_empty()) {
        let mut err = ValidationError::new("current_with_end_date");
        err.message = Some("A current position cannot have an end date".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ExperienceInput {
        ExperienceInput {
            kind: ExperienceKind::Work,
            title: "Engineer".into(),
            organization: "Acme".into(),
            location: None,
            start_date: "2021-03".into(),
            end_date: None,
            current: true,
            description: "Built things".into(),
            highlights: vec![],
            order: 1,
        }
    }

    #[test]
    fn current_role_with_end_date_is_rejected() {
        let mut exp = input();
        assert!(exp.validate().is_ok());

        exp.end_date = Some("2023-01".into());
        assert!(exp.validate().is_err());
    }

    #[test]
    fn kind_uses_lowercase_names() {
        let kind: ExperienceKind = serde_json::from_str("\"education\"").unwrap();
        assert_eq!(kind, ExperienceKind::Education);
    }
}
