pub mod cloudinary;
pub mod local;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use derive_more::Display;
use reqwest::header::CONTENT_TYPE;

use crate::{
    entities::image::{ImageReference, ImageUpload, Section, StoredImage},
    settings::{StorageBackendKind, StorageConfig},
};

pub use cloudinary::CloudinaryImageBackend;
pub use local::LocalImageBackend;

#[derive(Debug, Display)]
pub enum StorageError {
    #[display("{_0}")]
    Validation(String),

    #[display("File is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[display("Unsupported image type: {_0}")]
    UnsupportedType(String),

    #[display("Storage backend not configured: {_0}")]
    NotConfigured(String),

    #[display("Storage I/O failure: {_0}")]
    Io(String),

    #[display("Remote storage failure: {_0}")]
    Remote(String),
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Remote(err.to_string())
    }
}

/// An upload that passed every check and is ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedImage {
    pub bytes: Vec<u8>,
    pub stem: String,
    pub extension: &'static str,
    pub mime: &'static str,
}

/// Where image bytes end up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn put(&self, section: Section, image: ValidatedImage) -> Result<StoredImage, StorageError>;

    /// Deleting something that is already gone is not an error.
    async fn delete(&self, image: &ImageReference) -> Result<(), StorageError>;

    fn name(&self) -> &'static str;
}

const MAX_STEM_LEN: usize = 64;

fn allowed_extension(mime: &str, allow_gif: bool) -> Option<&'static str> {
    match mime {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" if allow_gif => Some("gif"),
        _ => None,
    }
}

fn canonical_mime(extension: &str) -> &'static str {
    match extension {
        "jpg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "image/gif",
    }
}

/// Lowercased, slug-safe file stem. Falls back to `image`.
pub fn file_stem(original_file_name: &str) -> String {
    let stem = std::path::Path::new(original_file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let mut slugged = slug::slugify(stem);
    if slugged.len() > MAX_STEM_LEN {
        slugged.truncate(MAX_STEM_LEN);
        slugged = slugged.trim_end_matches('-').to_string();
    }
    if slugged.is_empty() {
        "image".to_string()
    } else {
        slugged
    }
}

/// Runs every upload check. Nothing is written before this returns `Ok`.
pub fn inspect_upload(
    upload: ImageUpload,
    max_upload_bytes: usize,
    allow_gif: bool,
) -> Result<ValidatedImage, StorageError> {
    if upload.bytes.is_empty() {
        return Err(StorageError::Validation("Uploaded file is empty".into()));
    }
    if upload.bytes.len() > max_upload_bytes {
        return Err(StorageError::TooLarge {
            size: upload.bytes.len(),
            max: max_upload_bytes,
        });
    }

    let sniffed = infer::get(&upload.bytes)
        .map(|kind| kind.mime_type())
        .ok_or_else(|| StorageError::UnsupportedType("unrecognised file contents".into()))?;
    let extension = allowed_extension(sniffed, allow_gif)
        .ok_or_else(|| StorageError::UnsupportedType(sniffed.to_string()))?;

    if let Some(declared) = upload.declared_content_type.as_deref() {
        let essence = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if allowed_extension(&essence, allow_gif).is_none() {
            return Err(StorageError::UnsupportedType(essence));
        }
    }

    Ok(ValidatedImage {
        stem: file_stem(&upload.original_file_name),
        extension,
        mime: canonical_mime(extension),
        bytes: upload.bytes,
    })
}

/// Outcome of probing a remote image URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlCheck {
    pub valid: bool,
    pub reason: Option<String>,
}

impl UrlCheck {
    fn valid() -> Self {
        Self { valid: true, reason: None }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Front door for image uploads. Callers never see which backend is active.
#[derive(Clone)]
pub struct ImageStorage {
    backend: Arc<dyn ImageBackend>,
    max_upload_bytes: usize,
    allow_gif: bool,
    http: reqwest::Client,
    url_check_timeout: Duration,
}

impl ImageStorage {
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let backend: Arc<dyn ImageBackend> = match config.backend {
            StorageBackendKind::Local => Arc::new(LocalImageBackend::new(
                config.upload_dir.clone(),
                config.public_prefix.clone(),
            )),
            StorageBackendKind::Cloudinary => {
                let cloudinary = config
                    .cloudinary
                    .as_ref()
                    .ok_or_else(|| StorageError::NotConfigured("cloudinary".into()))?;
                Arc::new(CloudinaryImageBackend::new(cloudinary)?)
            }
        };

        tracing::info!(backend = backend.name(), "Image storage ready");
        Self::with_backend(backend, config)
    }

    pub fn with_backend(
        backend: Arc<dyn ImageBackend>,
        config: &StorageConfig,
    ) -> Result<Self, StorageError> {
        let url_check_timeout = Duration::from_secs(config.url_check_timeout_secs.max(1));
        let http = reqwest::Client::builder()
            .timeout(url_check_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            backend,
            max_upload_bytes: config.max_upload_bytes,
            allow_gif: config.allow_gif,
            http,
            url_check_timeout,
        })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validates, writes, and then best-effort deletes `previous`.
    pub async fn store(
        &self,
        upload: ImageUpload,
        section: Section,
        previous: Option<ImageReference>,
    ) -> Result<StoredImage, StorageError> {
        let image = inspect_upload(upload, self.max_upload_bytes, self.allow_gif)?;
        let stored = self.backend.put(section, image).await?;

        tracing::info!(
            backend = self.backend.name(),
            section = %section,
            url = %stored.url,
            "Image stored"
        );

        if let Some(previous) = previous.filter(|p| !p.url.trim().is_empty() && p.url != stored.url) {
            if let Err(e) = self.backend.delete(&previous).await {
                tracing::warn!(url = %previous.url, "Failed to delete previous image: {}", e);
            }
        }

        Ok(stored)
    }

    pub async fn remove(&self, url: &str, storage_id: Option<&str>) -> bool {
        let reference = ImageReference::new(url, storage_id.map(str::to_string));
        match self.backend.delete(&reference).await {
            Ok(()) => {
                tracing::info!(backend = self.backend.name(), url = %url, "Image removed");
                true
            }
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), url = %url, "Failed to remove image: {}", e);
                false
            }
        }
    }

    /// True only for a 2xx answer whose content type is `image/*`.
    pub async fn validate_image_url(&self, raw: &str) -> UrlCheck {
        let parsed = match url::Url::parse(raw.trim()) {
            Ok(u) => u,
            Err(_) => return UrlCheck::invalid("Not a valid URL"),
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return UrlCheck::invalid("Only http and https URLs are supported");
        }

        let response = match self.http.get(parsed).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return UrlCheck::invalid(format!(
                    "Timed out after {}s",
                    self.url_check_timeout.as_secs()
                ));
            }
            Err(e) => {
                tracing::debug!("Image URL probe failed: {}", e);
                return UrlCheck::invalid("Could not reach URL");
            }
        };

        if !response.status().is_success() {
            return UrlCheck::invalid(format!("Server answered {}", response.status().as_u16()));
        }

        let is_image = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(false);

        if is_image {
            UrlCheck::valid()
        } else {
            UrlCheck::invalid("URL does not point to an image")
        }
    }
}

#[cfg(test)]
pub(crate) mod test_images {
    /// 1x1 transparent PNG.
    pub const PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
    /// JFIF header; `infer` only looks at the magic bytes.
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
    pub const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00";
}
