//! ListClientRecordsHandler - Query handler for a counselor's history with
//! one client.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, BookingError};
use crate::domain::foundation::{Identity, UserId};
use crate::ports::AppointmentRepository;

/// Query for the confirmed and completed appointments between the calling
/// counselor and one of their clients.
#[derive(Debug, Clone)]
pub struct ListClientRecordsQuery {
    pub identity: Identity,
    pub client_id: UserId,
}

/// The shared history, most recent date first.
#[derive(Debug, Clone)]
pub struct ListClientRecordsResult {
    pub appointments: Vec<Appointment>,
}

/// Handler for the client-records view. Counselors only; pending and
/// terminal-without-contact (rejected, cancelled) appointments are excluded
/// so the view reflects actual working history.
pub struct ListClientRecordsHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl ListClientRecordsHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        query: ListClientRecordsQuery,
    ) -> Result<ListClientRecordsResult, BookingError> {
        if !query.identity.is_counselor() {
            return Err(BookingError::forbidden(
                "Only counselors can view client records",
            ));
        }

        let appointments = self
            .appointments
            .list_client_records(&query.identity.user_id, &query.client_id)
            .await?;

        Ok(ListClientRecordsResult { appointments })
    }
}
