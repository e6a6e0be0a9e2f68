//! Availability repository port.

use async_trait::async_trait;

use crate::domain::availability::Availability;
use crate::domain::foundation::{DomainError, UserId};

/// Repository port for counselor availability records.
///
/// One record per counselor; `upsert` creates or fully replaces it.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Finds a counselor's availability. Returns `None` if the counselor
    /// never configured one.
    async fn find_by_counselor(
        &self,
        counselor_id: &UserId,
    ) -> Result<Option<Availability>, DomainError>;

    /// Creates or replaces the counselor's availability record.
    async fn upsert(&self, availability: &Availability) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AvailabilityRepository) {}
    }
}
