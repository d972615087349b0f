//! File store: uploaded certificates and distributed documents

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct StorageService {
    root: PathBuf,
}

impl StorageService {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            root: PathBuf::from(config.root),
        }
    }

    /// Write the bytes under a fresh uuid name, preserving the original
    /// extension, and return the relative path to store as the reference.
    pub async fn save(
        &self,
        subdir: &str,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> AppResult<String> {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let relative = format!("{}/{}{}", subdir, Uuid::new_v4(), extension);
        let full = self.root.join(&relative);

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create storage dir: {}", e)))?;
        }

        tokio::fs::write(&full, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {}", e)))?;

        Ok(relative)
    }

    /// Read a previously stored file by its relative path
    pub async fn read(&self, relative: &str) -> AppResult<Vec<u8>> {
        // Only server-generated paths reach this point
        if relative.contains("..") {
            return Err(AppError::NotFound("File not found".to_string()));
        }

        tokio::fs::read(self.root.join(relative))
            .await
            .map_err(|_| AppError::NotFound("File not found".to_string()))
    }
}
