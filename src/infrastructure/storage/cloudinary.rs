use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{ImageBackend, StorageError, ValidatedImage};
use crate::{
    entities::image::{ImageReference, Section, StoredImage},
    settings::CloudinaryConfig,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// .../image/upload/[transformations/][v123/]<public_id>.<ext>
static PUBLIC_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/upload/(?:[a-z]{1,3}_[^/]+/)*(?:v\d+/)?(?P<id>.+?)(?:\.[A-Za-z0-9]+)?$")
        .expect("Invalid regex")
});

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

#[derive(Clone)]
pub struct CloudinaryImageBackend {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    root_folder: String,
    api_base: String,
}

impl CloudinaryImageBackend {
    pub fn new(config: &CloudinaryConfig) -> Result<Self, StorageError> {
        if config.cloud_name.is_empty() || config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(StorageError::NotConfigured(
                "cloudinary credentials are incomplete".into(),
            ));
        }

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            root_folder: config.root_folder.trim_matches('/').to_string(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", self.api_base, self.cloud_name, action)
    }

    fn folder(&self, section: Section) -> String {
        if self.root_folder.is_empty() {
            section.to_string()
        } else {
            format!("{}/{}", self.root_folder, section)
        }
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => format!("{} ({})", body.error.message, status.as_u16()),
            Err(_) => format!("unexpected response {}", status.as_u16()),
        }
    }
}

/// SHA-256 request signature: sorted `k=v` pairs joined by `&`, then the secret appended.
pub fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recovers the public id (folder included, extension stripped) from a delivery URL.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    PUBLIC_ID_RE
        .captures(path)
        .and_then(|c| c.name("id"))
        .map(|m| m.as_str().to_string())
        .filter(|id| !id.is_empty())
}

#[async_trait]
impl ImageBackend for CloudinaryImageBackend {
    async fn put(&self, section: Section, image: ValidatedImage) -> Result<StoredImage, StorageError> {
        let timestamp = Utc::now().timestamp().to_string();
        let folder = self.folder(section);
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(char::from)
            .collect::<String>()
            .to_lowercase();
        let public_id = format!("{}-{}-{}", image.stem, Utc::now().timestamp_millis(), suffix);

        let signature = sign(
            &[
                ("folder", folder.clone()),
                ("public_id", public_id.clone()),
                ("timestamp", timestamp.clone()),
            ],
            &self.api_secret,
        );

        let file_name = format!("{}.{}", image.stem, image.extension);
        let part = Part::bytes(image.bytes)
            .file_name(file_name)
            .mime_str(image.mime)?;

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder)
            .text("public_id", public_id)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self.http.post(self.endpoint("upload")).multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(StorageError::Remote(Self::error_message(response).await));
        }

        let body: UploadResponse = response.json().await?;
        Ok(StoredImage {
            url: body.secure_url,
            storage_id: body.public_id,
        })
    }

    async fn delete(&self, image: &ImageReference) -> Result<(), StorageError> {
        let public_id = match &image.storage_id {
            Some(id) => id.clone(),
            None => public_id_from_url(&image.url).ok_or_else(|| {
                StorageError::Validation(format!("Cannot derive public id from {}", image.url))
            })?,
        };

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id.clone()), ("timestamp", timestamp.clone())],
            &self.api_secret,
        );

        let form = Form::new()
            .text("public_id", public_id.clone())
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self.http.post(self.endpoint("destroy")).multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(StorageError::Remote(Self::error_message(response).await));
        }

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" | "not found" => {
                tracing::debug!(public_id = %public_id, result = %body.result, "Cloudinary destroy");
                Ok(())
            }
            other => Err(StorageError::Remote(format!("destroy returned {}", other))),
        }
    }

    fn name(&self) -> &'static str {
        "cloudinary"
    }
}
