//! Attachment storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// File storage configuration for appointment attachments
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded files are written to
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// URL prefix the stored files are served under
    #[serde(default = "default_public_base")]
    pub public_base: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.upload_dir.is_empty() || self.public_base.is_empty() {
            return Err(ValidationError::InvalidUploadDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            public_base: default_public_base(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_public_base() -> String {
    "/uploads".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.upload_dir, "uploads");
        assert_eq!(config.public_base, "/uploads");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_dir() {
        let config = StorageConfig {
            upload_dir: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
