//! CancelAppointmentHandler - Command handler for calling off an
//! appointment.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, BookingError};
use crate::domain::foundation::{AppointmentId, Identity};
use crate::ports::AppointmentRepository;

/// Command for either participant to cancel a pending or confirmed
/// appointment.
#[derive(Debug, Clone)]
pub struct CancelAppointmentCommand {
    pub identity: Identity,
    pub appointment_id: AppointmentId,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for cancelling appointments. Cancellation is terminal and frees
/// the slot; the record itself is kept.
pub struct CancelAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl CancelAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        cmd: CancelAppointmentCommand,
    ) -> Result<CancelAppointmentResult, BookingError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(cmd.appointment_id))?;

        if !appointment.is_participant(&cmd.identity.user_id) {
            return Err(BookingError::forbidden(
                "Only a participant can cancel this appointment",
            ));
        }

        appointment.cancel()?;
        self.appointments.update(&appointment).await?;

        Ok(CancelAppointmentResult { appointment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{monday, time, MockAppointmentRepository};
    use crate::domain::appointment::{AppointmentStatus, ServiceType, SessionType};
    use crate::domain::foundation::UserId;

    fn pending_appointment() -> Appointment {
        Appointment::book(
            UserId::new("client-1").unwrap(),
            UserId::new("counselor-1").unwrap(),
            ServiceType::MentalHealth,
            monday(),
            time("13:00"),
            SessionType::Video,
            150_000,
            None,
        )
    }

    #[tokio::test]
    async fn client_can_cancel_pending() {
        let appointment = pending_appointment();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CancelAppointmentHandler::new(repo.clone());

        let result = handler
            .handle(CancelAppointmentCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: id,
            })
            .await
            .unwrap();

        assert_eq!(result.appointment.status, AppointmentStatus::Cancelled);
        assert_eq!(repo.stored()[0].status, AppointmentStatus::Cancelled);
    }

    #[tokio::test]
    async fn counselor_can_cancel_confirmed() {
        let mut appointment = pending_appointment();
        appointment.confirm().unwrap();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CancelAppointmentHandler::new(repo);

        let result = handler
            .handle(CancelAppointmentCommand {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
                appointment_id: id,
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn stranger_cannot_cancel() {
        let appointment = pending_appointment();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CancelAppointmentHandler::new(repo.clone());

        let result = handler
            .handle(CancelAppointmentCommand {
                identity: Identity::client(UserId::new("client-2").unwrap()),
                appointment_id: id,
            })
            .await;

        assert!(matches!(result, Err(BookingError::Forbidden { .. })));
        assert_eq!(repo.stored()[0].status, AppointmentStatus::Pending);
    }

    #[tokio::test]
    async fn completed_appointment_cannot_be_cancelled() {
        let mut appointment = pending_appointment();
        appointment.confirm().unwrap();
        appointment.complete(None).unwrap();
        let id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CancelAppointmentHandler::new(repo);

        let result = handler
            .handle(CancelAppointmentCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: id,
            })
            .await;

        assert!(matches!(result, Err(BookingError::InvalidState { .. })));
    }
}
