//! GetAvailabilityHandler - Query handler for a counselor's schedule.

use std::sync::Arc;

use crate::domain::appointment::BookingError;
use crate::domain::availability::Availability;
use crate::domain::foundation::UserId;
use crate::ports::AvailabilityRepository;

/// Query for one counselor's availability record.
#[derive(Debug, Clone)]
pub struct GetAvailabilityQuery {
    pub counselor_id: UserId,
}

/// The counselor's availability record.
#[derive(Debug, Clone)]
pub struct GetAvailabilityResult {
    pub availability: Availability,
}

/// Handler for reading a counselor's availability.
///
/// Readable by anyone; clients consult it when picking a slot. A counselor
/// who never configured a schedule has no record, which reads as not found
/// here even though booking treats that case permissively.
pub struct GetAvailabilityHandler {
    repository: Arc<dyn AvailabilityRepository>,
}

impl GetAvailabilityHandler {
    pub fn new(repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetAvailabilityQuery,
    ) -> Result<GetAvailabilityResult, BookingError> {
        let availability = self
            .repository
            .find_by_counselor(&query.counselor_id)
            .await?
            .ok_or_else(|| BookingError::availability_not_found(query.counselor_id.clone()))?;

        Ok(GetAvailabilityResult { availability })
    }
}
