//! File storage port for appointment attachments.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// A stored blob: the original name plus the URL it can be fetched from.
/// The core persists only these two fields on the appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_name: String,
    pub file_url: String,
}

/// Port for the blob storage collaborator.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores a blob and returns where it can be retrieved.
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<StoredFile, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_is_object_safe() {
        fn _accepts_dyn(_storage: &dyn FileStorage) {}
    }
}
