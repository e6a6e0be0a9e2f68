//! AuthorizeSessionHandler - Query handler for session-join authorization.
//!
//! The realtime relay consults this before admitting a socket to an
//! appointment's room. The decision is pure participant membership; room
//! lifecycle and signaling stay entirely in the relay.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, BookingError};
use crate::domain::foundation::{AppointmentId, Identity};
use crate::ports::AppointmentRepository;

/// Query: may this identity join appointment X's session?
#[derive(Debug, Clone)]
pub struct AuthorizeSessionQuery {
    pub identity: Identity,
    pub appointment_id: AppointmentId,
}

/// A positive authorization decision, with the appointment for room setup.
#[derive(Debug, Clone)]
pub struct AuthorizeSessionResult {
    pub appointment: Appointment,
}

/// Handler for session authorization.
///
/// Not-found and not-a-participant stay distinct: the relay treats 404 as
/// a dead room and 403 as an intruder.
pub struct AuthorizeSessionHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl AuthorizeSessionHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        query: AuthorizeSessionQuery,
    ) -> Result<AuthorizeSessionResult, BookingError> {
        let appointment = self
            .appointments
            .find_by_id(&query.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(query.appointment_id))?;

        if !appointment.is_participant(&query.identity.user_id) {
            return Err(BookingError::forbidden(
                "Not a participant of this appointment",
            ));
        }

        Ok(AuthorizeSessionResult { appointment })
    }
}
