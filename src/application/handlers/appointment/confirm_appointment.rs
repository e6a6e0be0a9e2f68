//! ConfirmAppointmentHandler - Command handler for accepting a booking.

use std::sync::Arc;

use crate::application::handlers::notify;
use crate::application::notifications::NotificationDispatcher;
use crate::domain::appointment::{Appointment, BookingError, NotificationKind};
use crate::domain::foundation::{AppointmentId, Identity};
use crate::ports::{AppointmentRepository, UserDirectory};

/// Command for the owning counselor to accept a pending appointment.
#[derive(Debug, Clone)]
pub struct ConfirmAppointmentCommand {
    pub identity: Identity,
    pub appointment_id: AppointmentId,
}

/// Result of a successful confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for confirming appointments.
pub struct ConfirmAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
    directory: Arc<dyn UserDirectory>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl ConfirmAppointmentHandler {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        directory: Arc<dyn UserDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            appointments,
            directory,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmAppointmentCommand,
    ) -> Result<ConfirmAppointmentResult, BookingError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(cmd.appointment_id))?;

        if !appointment.is_owned_by_counselor(&cmd.identity.user_id) {
            return Err(BookingError::forbidden(
                "Only the appointment's counselor can confirm it",
            ));
        }

        appointment.confirm()?;
        let newly_latched = appointment.mark_notification_sent(NotificationKind::Confirmed);
        self.appointments.update(&appointment).await?;

        if newly_latched {
            notify(
                self.directory.as_ref(),
                &self.dispatcher,
                &appointment,
                NotificationKind::Confirmed,
            )
            .await;
        }

        Ok(ConfirmAppointmentResult { appointment })
    }
}
