use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validation::{not_blank, web_url};
use crate::utils::markdown::safe_markdown_to_html;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub tech_stack: Vec<String>,
    pub live_url: Option<String>,
    pub code_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create and full-replace payload; PUT carries every field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 200, message = "Title must be at most 200 characters")
    )]
    pub title: String,

    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,

    pub long_description: Option<String>,

    #[serde(default)]
    pub tech_stack: Vec<String>,

    #[validate(custom(function = "web_url"))]
    pub live_url: Option<String>,

    #[validate(custom(function = "web_url"))]
    pub code_url: Option<String>,

    #[validate(custom(function = "web_url"))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,
    pub long_description_html: Option<String>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        let long_description_html = project
            .long_description
            .as_deref()
            .filter(|md| !md.trim().is_empty())
            .map(safe_markdown_to_html);

        ProjectResponse {
            project,
            long_description_html,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    #[serde(default)]
    pub featured: bool,
}
