//! User directory port.
//!
//! Read-only lookups against the identity collaborator's user store: the
//! booking flow needs the counselor's rate to snapshot and both parties'
//! contact details for notifications.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// A counselor as seen by the booking flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounselorProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,

    /// Session rate in minor currency units; snapshotted onto the
    /// appointment at booking time.
    pub hourly_rate_minor: i64,
}

/// Contact details for notification dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContact {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Port for user lookups.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a counselor by id. Returns `None` when the user does not
    /// exist or is not a counselor.
    async fn find_counselor(&self, id: &UserId)
        -> Result<Option<CounselorProfile>, DomainError>;

    /// Finds any user's contact details.
    async fn find_contact(&self, id: &UserId) -> Result<Option<UserContact>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn UserDirectory) {}
    }
}
