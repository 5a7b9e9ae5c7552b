//! Product image storage on the local filesystem
//!
//! Images land under the configured media root with a generated filename;
//! the relative path is what gets recorded on the product.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::MediaConfig;
use crate::error::{AppError, AppResult};
use shared::validation::validate_image_extension;

/// Stores and removes uploaded product images
#[derive(Clone)]
pub struct StorageService {
    root_dir: PathBuf,
    base_url: String,
}

impl StorageService {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root_dir: PathBuf::from(&config.root_dir),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Write an uploaded image to disk and return its public path.
    ///
    /// The original filename is only used for extension validation; the
    /// stored name is a fresh UUID so uploads can never collide or
    /// traverse directories.
    pub async fn save_image(&self, original_filename: &str, data: &[u8]) -> AppResult<String> {
        let extension = validate_image_extension(original_filename).map_err(|msg| {
            AppError::Validation {
                field: "image".to_string(),
                message: msg.to_string(),
            }
        })?;

        if data.is_empty() {
            return Err(AppError::Validation {
                field: "image".to_string(),
                message: "Image file is empty".to_string(),
            });
        }

        let filename = format!("{}.{}", Uuid::new_v4(), extension.to_ascii_lowercase());

        tokio::fs::create_dir_all(&self.root_dir)
            .await
            .map_err(|e| AppError::StorageError(e.to_string()))?;

        tokio::fs::write(self.root_dir.join(&filename), data)
            .await
            .map_err(|e| AppError::StorageError(e.to_string()))?;

        Ok(format!("{}/{}", self.base_url, filename))
    }

    /// Remove a previously stored image. Missing files are not an error;
    /// the record pointing at them is already gone or being replaced.
    pub async fn delete_image(&self, public_path: &str) -> AppResult<()> {
        let Some(filename) = self.filename_from_path(public_path) else {
            return Ok(());
        };

        match tokio::fs::remove_file(self.root_dir.join(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageError(e.to_string())),
        }
    }

    /// Extract the bare stored filename from a public path, rejecting
    /// anything that does not point into the media root.
    fn filename_from_path<'a>(&self, public_path: &'a str) -> Option<&'a str> {
        let filename = public_path.strip_prefix(&self.base_url)?.trim_start_matches('/');
        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return None;
        }
        // Only delete files that look like our own stored names
        Path::new(filename).extension()?;
        Some(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> StorageService {
        StorageService::new(&MediaConfig {
            root_dir: "media/products".to_string(),
            base_url: "/media/products".to_string(),
        })
    }

    #[test]
    fn test_filename_from_path() {
        let storage = service();
        assert_eq!(
            storage.filename_from_path("/media/products/abc.png"),
            Some("abc.png")
        );
    }

    #[test]
    fn test_filename_rejects_foreign_paths() {
        let storage = service();
        assert_eq!(storage.filename_from_path("/etc/passwd"), None);
        assert_eq!(storage.filename_from_path("/media/products/../secret.png"), None);
        assert_eq!(storage.filename_from_path("/media/products/"), None);
    }
}
