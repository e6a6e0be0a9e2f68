//! UpdateNotesHandler - Command handler for counselor session notes.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, BookingError};
use crate::domain::foundation::{AppointmentId, Identity};
use crate::ports::AppointmentRepository;

/// Command to replace the counselor's session notes on an appointment.
#[derive(Debug, Clone)]
pub struct UpdateNotesCommand {
    pub identity: Identity,
    pub appointment_id: AppointmentId,
    pub notes: String,
}

/// Result of a successful notes update.
#[derive(Debug, Clone)]
pub struct UpdateNotesResult {
    pub appointment: Appointment,
}

/// Handler for counselor notes. Notes are settable in any status once the
/// appointment exists; each write replaces the previous text.
pub struct UpdateNotesHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl UpdateNotesHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(&self, cmd: UpdateNotesCommand) -> Result<UpdateNotesResult, BookingError> {
        if cmd.notes.trim().is_empty() {
            return Err(BookingError::validation("notes", "must not be empty"));
        }

        let mut appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(cmd.appointment_id))?;

        if !appointment.is_owned_by_counselor(&cmd.identity.user_id) {
            return Err(BookingError::forbidden(
                "Only the appointment's counselor can edit session notes",
            ));
        }

        appointment.set_counselor_notes(cmd.notes);
        self.appointments.update(&appointment).await?;

        Ok(UpdateNotesResult { appointment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{monday, time, MockAppointmentRepository};
    use crate::domain::appointment::{ServiceType, SessionType};
    use crate::domain::foundation::UserId;

    fn appointment() -> Appointment {
        Appointment::book(
            UserId::new("client-1").unwrap(),
            UserId::new("counselor-1").unwrap(),
            ServiceType::MentalHealth,
            monday(),
            time("10:00"),
            SessionType::Email,
            150_000,
            None,
        )
    }

    #[tokio::test]
    async fn replaces_notes() {
        let mut existing = appointment();
        existing.set_counselor_notes("old".to_string());
        let id = existing.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(existing));
        let handler = UpdateNotesHandler::new(repo.clone());

        let result = handler
            .handle(UpdateNotesCommand {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
                appointment_id: id,
                notes: "new notes".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.appointment.counselor_notes.as_deref(), Some("new notes"));
        assert_eq!(repo.stored()[0].counselor_notes.as_deref(), Some("new notes"));
    }

    #[tokio::test]
    async fn rejects_empty_notes() {
        let existing = appointment();
        let id = existing.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(existing));
        let handler = UpdateNotesHandler::new(repo);

        let result = handler
            .handle(UpdateNotesCommand {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
                appointment_id: id,
                notes: "   ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BookingError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn client_cannot_edit_notes() {
        let existing = appointment();
        let id = existing.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(existing));
        let handler = UpdateNotesHandler::new(repo);

        let result = handler
            .handle(UpdateNotesCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: id,
                notes: "peeking".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BookingError::Forbidden { .. })));
    }
}
