use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use tokio::{fs, io::AsyncWriteExt};

use super::{ImageBackend, StorageError, ValidatedImage};
use crate::entities::image::{ImageReference, Section, StoredImage};

const NAME_ATTEMPTS: usize = 3;

/// Writes uploads under `<root>/<section>/` and serves them from `<public_prefix>/<section>/`.
#[derive(Debug, Clone)]
pub struct LocalImageBackend {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageBackend {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let prefix = public_prefix.into();
        Self {
            root: root.into(),
            public_prefix: format!("/{}", prefix.trim_matches('/')),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps `(section, file)` to a path that is guaranteed to sit inside the section directory.
    pub fn resolve(&self, section: &str, file_name: &str) -> Result<PathBuf, StorageError> {
        let section: Section = section
            .parse()
            .map_err(|_| StorageError::Validation(format!("Unknown section: {}", section)))?;

        let is_plain_name = !file_name.is_empty()
            && !file_name.starts_with('.')
            && !file_name.contains(['/', '\\', '\0'])
            && Path::new(file_name).file_name().and_then(|n| n.to_str()) == Some(file_name);
        if !is_plain_name {
            return Err(StorageError::Validation(format!("Illegal file name: {}", file_name)));
        }

        Ok(self.root.join(section.as_str()).join(file_name))
    }

    /// Accepts both site paths (`/images/a/b.png`) and absolute URLs on any host.
    fn path_for_url(&self, raw: &str) -> Result<PathBuf, StorageError> {
        let path = match url::Url::parse(raw) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => raw.split(['?', '#']).next().unwrap_or_default().to_string(),
        };

        let rest = path
            .strip_prefix(&self.public_prefix)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(|| StorageError::Validation(format!("Not a local image URL: {}", raw)))?;

        match rest.split_once('/') {
            Some((section, file_name)) => self.resolve(section, file_name),
            None => Err(StorageError::Validation(format!("Not a local image URL: {}", raw))),
        }
    }

    fn unique_name(image: &ValidatedImage) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect::<String>()
            .to_lowercase();
        format!(
            "{}-{}-{}.{}",
            image.stem,
            Utc::now().timestamp_millis(),
            token,
            image.extension
        )
    }
}

#[async_trait]
impl ImageBackend for LocalImageBackend {
    async fn put(&self, section: Section, image: ValidatedImage) -> Result<StoredImage, StorageError> {
        let dir = self.root.join(section.as_str());
        fs::create_dir_all(&dir).await?;

        for _ in 0..NAME_ATTEMPTS {
            let file_name = Self::unique_name(&image);
            let path = dir.join(&file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(f) => f,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = file.write_all(&image.bytes).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e.into());
            }
            file.flush().await?;

            return Ok(StoredImage {
                url: format!("{}/{}/{}", self.public_prefix, section, file_name),
                storage_id: file_name,
            });
        }

        Err(StorageError::Io("Could not allocate a unique file name".into()))
    }

    async fn delete(&self, image: &ImageReference) -> Result<(), StorageError> {
        let path = self.path_for_url(&image.url)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Image already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
