use std::{fmt, str::FromStr};

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Logical namespace an uploaded image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Profile,
    Projects,
    Social,
    General,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Profile, Section::Projects, Section::Social, Section::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Projects => "projects",
            Section::Social => "social",
            Section::General => "general",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid section: {}", s)))
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    pub storage_id: String,
}

/// Pointer to an image that already exists in some backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageReference {
    pub url: String,
    pub storage_id: Option<String>,
}

impl ImageReference {
    pub fn new(url: impl Into<String>, storage_id: Option<String>) -> Self {
        Self {
            url: url.into(),
            storage_id: storage_id.filter(|id| !id.trim().is_empty()),
        }
    }
}

/// Bytes plus the metadata the client sent along with them.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub original_file_name: String,
    pub declared_content_type: Option<String>,
}

// ───── HTTP payloads ────────────────────────────────────────────────

#[derive(Debug, MultipartForm)]
pub struct ImageUploadForm {
    pub file: TempFile,

    pub section: Text<String>,

    pub previous_image_url: Option<Text<String>>,

    pub previous_storage_id: Option<Text<String>>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteImageQuery {
    pub url: String,
    pub storage_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateUrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ValidateUrlResponse {
    pub url: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(flatten)]
    pub image: StoredImage,
}
