//! RejectAppointmentHandler - Command handler for declining a booking.

use std::sync::Arc;

use crate::application::handlers::notify;
use crate::application::notifications::NotificationDispatcher;
use crate::domain::appointment::{Appointment, BookingError, NotificationKind};
use crate::domain::foundation::{AppointmentId, Identity};
use crate::ports::{AppointmentRepository, UserDirectory};

/// Command for the owning counselor to decline a pending appointment.
#[derive(Debug, Clone)]
pub struct RejectAppointmentCommand {
    pub identity: Identity,
    pub appointment_id: AppointmentId,
}

/// Result of a successful rejection.
#[derive(Debug, Clone)]
pub struct RejectAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for rejecting appointments. Rejection is terminal; the slot is
/// released for rebooking.
pub struct RejectAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
    directory: Arc<dyn UserDirectory>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl RejectAppointmentHandler {
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
        cmd: RejectAppointmentCommand,
    ) -> Result<RejectAppointmentResult, BookingError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(cmd.appointment_id))?;

        if !appointment.is_owned_by_counselor(&cmd.identity.user_id) {
            return Err(BookingError::forbidden(
                "Only the appointment's counselor can reject it",
            ));
        }

        appointment.reject()?;
        let newly_latched = appointment.mark_notification_sent(NotificationKind::Rejected);
        self.appointments.update(&appointment).await?;

        if newly_latched {
            notify(
                self.directory.as_ref(),
                &self.dispatcher,
                &appointment,
                NotificationKind::Rejected,
            )
            .await;
        }

        Ok(RejectAppointmentResult { appointment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        directory_with, dispatcher, monday, time, MockAppointmentRepository,
        RecordingEmailSender,
    };
    use crate::domain::appointment::{AppointmentStatus, ServiceType, SessionType};
    use crate::domain::foundation::UserId;

    fn pending_appointment() -> Appointment {
        Appointment::book(
            UserId::new("client-1").unwrap(),
            UserId::new("counselor-1").unwrap(),
            ServiceType::Career,
            monday(),
            time("09:00"),
            SessionType::Chat,
            90_000,
            None,
        )
    }

    fn handler_with(
        repo: Arc<MockAppointmentRepository>,
        sender: Arc<RecordingEmailSender>,
    ) -> RejectAppointmentHandler {
        RejectAppointmentHandler::new(
            repo,
            directory_with("counselor-1", "client-1", 90_000),
            dispatcher(sender),
        )
    }

    #[tokio::test]
    async fn rejects_and_notifies_the_client() {
        let appointment = pending_appointment();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let sender = Arc::new(RecordingEmailSender::new());
        let handler = handler_with(repo.clone(), sender.clone());

        let result = handler
            .handle(RejectAppointmentCommand {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
                appointment_id: id,
            })
            .await
            .unwrap();

        assert_eq!(result.appointment.status, AppointmentStatus::Rejected);
        let sent = sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "client-1@example.com");
    }

    #[tokio::test]
    async fn cannot_reject_after_confirm() {
        let mut appointment = pending_appointment();
        appointment.confirm().unwrap();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let sender = Arc::new(RecordingEmailSender::new());
        let handler = handler_with(repo, sender.clone());

        let result = handler
            .handle(RejectAppointmentCommand {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
                appointment_id: id,
            })
            .await;

        assert!(matches!(result, Err(BookingError::InvalidState { .. })));
        assert!(sender.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn client_cannot_reject() {
        let appointment = pending_appointment();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let sender = Arc::new(RecordingEmailSender::new());
        let handler = handler_with(repo, sender);

        let result = handler
            .handle(RejectAppointmentCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: id,
            })
            .await;

        assert!(matches!(result, Err(BookingError::Forbidden { .. })));
    }
}
