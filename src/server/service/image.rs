//! Object storage for planet images.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use crate::server::error::{planet::PlanetError, Error};

/// Stores image objects and hands back the URL clients should use.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Stores `bytes` for the planet and returns the public URL of the object.
    async fn store(&self, planet_id: i32, file_name: &str, bytes: &[u8]) -> Result<String, Error>;

    /// Removes the object behind a URL previously returned by [`ImageStorage::store`].
    ///
    /// Missing objects are not an error.
    async fn remove(&self, url: &str) -> Result<(), Error>;
}

/// Image storage on the local filesystem, served back under `base_url`
pub struct LocalImageStorage {
    root: PathBuf,
    base_url: String,
}

static ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Lower-cased extension of the uploaded file, if it is an accepted image type
    fn extension(file_name: &str) -> Result<String, PlanetError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or_else(|| PlanetError::InvalidUpload("file has no extension".to_string()))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(PlanetError::InvalidUpload(format!(
                "unsupported file type .{}",
                extension
            )));
        }

        Ok(extension)
    }

    /// Object name for a URL produced by this storage; `None` for foreign URLs
    fn object_name<'u>(&self, url: &'u str) -> Option<&'u str> {
        url.strip_prefix(&self.base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains('/') && !name.contains(".."))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, planet_id: i32, file_name: &str, bytes: &[u8]) -> Result<String, Error> {
        let extension = Self::extension(file_name)?;
        if bytes.is_empty() {
            return Err(PlanetError::InvalidUpload("file is empty".to_string()).into());
        }

        let object_name = format!(
            "planet-{}-{}.{}",
            planet_id,
            Utc::now().timestamp_millis(),
            extension
        );

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&object_name), bytes).await?;

        Ok(format!("{}/{}", self.base_url, object_name))
    }

    async fn remove(&self, url: &str) -> Result<(), Error> {
        let Some(object_name) = self.object_name(url) else {
            tracing::debug!(url = %url, "Skipping removal of image outside local storage");
            return Ok(());
        };

        match tokio::fs::remove_file(self.root.join(object_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
