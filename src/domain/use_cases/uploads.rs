use crate::{
    entities::image::{
        ImageReference, ImageUpload, ImageUploadForm, Section, StoredImage, ValidateUrlResponse,
    },
    errors::AppError,
    storage::{ImageStorage, StorageError},
};

pub struct UploadHandler {
    pub storage: ImageStorage,
}

impl UploadHandler {
    pub fn new(storage: ImageStorage) -> Self {
        UploadHandler { storage }
    }

    /// Turns the multipart form into an [`ImageUpload`] and stores it, replacing
    /// `previous_image_url` when one was sent.
    pub async fn upload(&self, form: ImageUploadForm) -> Result<StoredImage, AppError> {
        let section: Section = form.section.into_inner().parse()?;

        if form.file.size > self.storage.max_upload_bytes() {
            return Err(StorageError::TooLarge {
                size: form.file.size,
                max: self.storage.max_upload_bytes(),
            }
            .into());
        }

        let bytes = tokio::fs::read(form.file.file.path()).await?;
        let upload = ImageUpload {
            bytes,
            original_file_name: form.file.file_name.clone().unwrap_or_else(|| "image".to_string()),
            declared_content_type: form.file.content_type.as_ref().map(|m| m.essence_str().to_string()),
        };

        let previous = form
            .previous_image_url
            .map(|url| url.into_inner())
            .filter(|url| !url.trim().is_empty())
            .map(|url| {
                ImageReference::new(url, form.previous_storage_id.map(|id| id.into_inner()))
            });

        let stored = self.storage.store(upload, section, previous).await?;
        Ok(stored)
    }

    pub async fn remove(&self, url: &str, storage_id: Option<&str>) -> Result<(), AppError> {
        if url.trim().is_empty() {
            return Err(AppError::InvalidInput("url is required".to_string()));
        }
        if self.storage.remove(url, storage_id).await {
            Ok(())
        } else {
            Err(AppError::InternalError(format!("Could not remove image {}", url)))
        }
    }

    pub async fn validate_url(&self, url: String) -> ValidateUrlResponse {
        let check = self.storage.validate_image_url(&url).await;
        ValidateUrlResponse {
            url,
            valid: check.valid,
            reason: check.reason,
        }
    }
}
