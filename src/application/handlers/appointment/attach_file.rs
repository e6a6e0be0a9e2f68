//! AttachFileHandler - Command handler for appointment attachments.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, BookingError};
use crate::domain::foundation::{AppointmentId, Identity};
use crate::ports::{AppointmentRepository, FileStorage};

/// Command to store a file and append it to an appointment.
#[derive(Debug, Clone)]
pub struct AttachFileCommand {
    pub identity: Identity,
    pub appointment_id: AppointmentId,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful attachment.
#[derive(Debug, Clone)]
pub struct AttachFileResult {
    pub appointment: Appointment,
}

/// Handler for attachments. The blob goes to the file-storage collaborator
/// first; only the returned URL lands on the appointment. Attachments are
/// append-only.
pub struct AttachFileHandler {
    appointments: Arc<dyn AppointmentRepository>,
    storage: Arc<dyn FileStorage>,
}

impl AttachFileHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            appointments,
            storage,
        }
    }

    pub async fn handle(&self, cmd: AttachFileCommand) -> Result<AttachFileResult, BookingError> {
        if cmd.file_name.trim().is_empty() {
            return Err(BookingError::validation("file_name", "must not be empty"));
        }
        if cmd.bytes.is_empty() {
            return Err(BookingError::validation("file", "must not be empty"));
        }

        let mut appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(cmd.appointment_id))?;

        if !appointment.is_owned_by_counselor(&cmd.identity.user_id) {
            return Err(BookingError::forbidden(
                "Only the appointment's counselor can attach files",
            ));
        }

        let stored = self.storage.store(&cmd.file_name, cmd.bytes).await?;
        appointment.push_attachment(stored.file_name, stored.file_url);
        self.appointments.update(&appointment).await?;

        Ok(AttachFileResult { appointment })
    }
}
