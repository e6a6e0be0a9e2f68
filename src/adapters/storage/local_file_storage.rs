//! Local filesystem storage for appointment attachments.
//!
//! Writes blobs under a configured upload directory and returns a URL under
//! the configured public base. Uses a write-to-temp-then-rename pattern so a
//! crash mid-write never leaves a half-visible file.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{FileStorage, StoredFile};

/// Maximum attachment size (10 MB).
const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Local filesystem implementation of the FileStorage port.
///
/// Stored names are prefixed with a fresh UUID so two uploads of
/// `notes.pdf` never collide.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    upload_dir: PathBuf,
    public_base: String,
}

impl LocalFileStorage {
    pub fn new(upload_dir: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            public_base: public_base.into(),
        }
    }

    fn io_error(context: &str, e: std::io::Error) -> DomainError {
        DomainError::new(
            ErrorCode::StorageError,
            format!("{}: {}", context, e),
        )
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<StoredFile, DomainError> {
        if bytes.len() > MAX_FILE_SIZE_BYTES {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("File exceeds maximum size of {} bytes", MAX_FILE_SIZE_BYTES),
            ));
        }

        // Strip any path components the client smuggled into the name
        let base_name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name)
            .to_string();
        let stored_name = format!("{}_{}", Uuid::new_v4(), base_name);
        let final_path = self.upload_dir.join(&stored_name);
        let tmp_path = self.upload_dir.join(format!("{}.tmp", stored_name));

        fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| Self::io_error("Failed to create upload directory", e))?;

        let mut file = fs::File::create(&tmp_path)
            .await
            .map_err(|e| Self::io_error("Failed to create file", e))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| Self::io_error("Failed to write file", e))?;
        file.sync_all()
            .await
            .map_err(|e| Self::io_error("Failed to sync file", e))?;
        fs::rename(&tmp_path, &final_path)
            .await
            .map_err(|e| Self::io_error("Failed to finalize file", e))?;

        Ok(StoredFile {
            file_name: base_name,
            file_url: format!("{}/{}", self.public_base.trim_end_matches('/'), stored_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_file_and_returns_public_url() {
        let dir = std::env::temp_dir().join(format!("counselhub-test-{}", Uuid::new_v4()));
        let storage = LocalFileStorage::new(&dir, "/uploads");

        let stored = storage
            .store("notes.pdf", b"content".to_vec())
            .await
            .unwrap();

        assert_eq!(stored.file_name, "notes.pdf");
        assert!(stored.file_url.starts_with("/uploads/"));
        assert!(stored.file_url.ends_with("_notes.pdf"));

        let on_disk = dir.join(stored.file_url.trim_start_matches("/uploads/"));
        assert_eq!(fs::read(on_disk).await.unwrap(), b"content");

        fs::remove_dir_all(dir).await.unwrap();
    }

    #[tokio::test]
    async fn strips_path_components_from_name() {
        let dir = std::env::temp_dir().join(format!("counselhub-test-{}", Uuid::new_v4()));
        let storage = LocalFileStorage::new(&dir, "/uploads");

        let stored = storage
            .store("../../etc/passwd", b"x".to_vec())
            .await
            .unwrap();

        assert_eq!(stored.file_name, "passwd");
        fs::remove_dir_all(dir).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let storage = LocalFileStorage::new("/tmp", "/uploads");
        let result = storage
            .store("big.bin", vec![0u8; MAX_FILE_SIZE_BYTES + 1])
            .await;
        assert!(result.is_err());
    }
}
