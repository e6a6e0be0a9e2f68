//! BookAppointmentHandler - Command handler for booking a new appointment.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::handlers::notify;
use crate::application::notifications::NotificationDispatcher;
use crate::domain::appointment::{
    Appointment, BookingError, NotificationKind, ServiceType, SessionType,
};
use crate::domain::availability::TimeOfDay;
use crate::domain::foundation::{Identity, UserId};
use crate::domain::scheduling::{self, SlotRejection};
use crate::ports::{AppointmentRepository, AvailabilityRepository, UserDirectory};

/// Command to book an appointment with a counselor.
#[derive(Debug, Clone)]
pub struct BookAppointmentCommand {
    pub identity: Identity,
    pub counselor_id: UserId,
    pub service_type: ServiceType,
    pub appointment_date: NaiveDate,
    pub appointment_time: TimeOfDay,
    pub session_type: SessionType,
    pub notes: Option<String>,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for booking appointments.
///
/// Slot validation happens in two layers: the schedule check and booked-slot
/// probe here give a precise rejection message, while the repository's
/// uniqueness constraint on the active slot closes the race two concurrent
/// bookings would otherwise win together.
pub struct BookAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
    availability: Arc<dyn AvailabilityRepository>,
    directory: Arc<dyn UserDirectory>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl BookAppointmentHandler {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        availability: Arc<dyn AvailabilityRepository>,
        directory: Arc<dyn UserDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            appointments,
            availability,
            directory,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: BookAppointmentCommand,
    ) -> Result<BookAppointmentResult, BookingError> {
        if !cmd.identity.is_client() {
            return Err(BookingError::forbidden("Only clients can book appointments"));
        }

        // The charge is snapshotted from the counselor's current rate
        let counselor = self
            .directory
            .find_counselor(&cmd.counselor_id)
            .await?
            .ok_or_else(|| BookingError::counselor_not_found(cmd.counselor_id.clone()))?;

        let schedule = self.availability.find_by_counselor(&cmd.counselor_id).await?;
        scheduling::evaluate_slot(schedule.as_ref(), cmd.appointment_date, cmd.appointment_time)
            .map_err(BookingError::slot_unavailable)?;

        if self
            .appointments
            .slot_is_booked(&cmd.counselor_id, cmd.appointment_date, cmd.appointment_time)
            .await?
        {
            return Err(BookingError::slot_unavailable(SlotRejection::AlreadyBooked));
        }

        let mut appointment = Appointment::book(
            cmd.identity.user_id.clone(),
            cmd.counselor_id,
            cmd.service_type,
            cmd.appointment_date,
            cmd.appointment_time,
            cmd.session_type,
            counselor.hourly_rate_minor,
            cmd.notes,
        );

        // Latch before persisting so the stored row already carries it;
        // dispatch itself waits until the insert has succeeded
        let newly_latched = appointment.mark_notification_sent(NotificationKind::BookingCreated);
        self.appointments.insert(&appointment).await?;

        if newly_latched {
            notify(
                self.directory.as_ref(),
                &self.dispatcher,
                &appointment,
                NotificationKind::BookingCreated,
            )
            .await;
        }

        Ok(BookAppointmentResult { appointment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        directory_with, dispatcher, monday, time, weekday_availability,
        MockAppointmentRepository, MockAvailabilityRepository, RecordingEmailSender,
    };
    use crate::domain::appointment::{AppointmentStatus, PaymentStatus};

    fn command() -> BookAppointmentCommand {
        BookAppointmentCommand {
            identity: Identity::client(UserId::new("client-1").unwrap()),
            counselor_id: UserId::new("counselor-1").unwrap(),
            service_type: ServiceType::MentalHealth,
            appointment_date: monday(),
            appointment_time: time("10:00"),
            session_type: SessionType::Video,
            notes: Some("First session".to_string()),
        }
    }

    struct Fixture {
        appointments: Arc<MockAppointmentRepository>,
        sender: Arc<RecordingEmailSender>,
        handler: BookAppointmentHandler,
    }

    fn fixture(availability: MockAvailabilityRepository) -> Fixture {
        let appointments = Arc::new(MockAppointmentRepository::new());
        let sender = Arc::new(RecordingEmailSender::new());
        let handler = BookAppointmentHandler::new(
            appointments.clone(),
            Arc::new(availability),
            directory_with("counselor-1", "client-1", 150_000),
            dispatcher(sender.clone()),
        );
        Fixture {
            appointments,
            sender,
            handler,
        }
    }

    #[tokio::test]
    async fn books_a_pending_appointment_inside_working_hours() {
        let f = fixture(MockAvailabilityRepository::with_record(
            weekday_availability("counselor-1"),
        ));

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.appointment.status, AppointmentStatus::Pending);
        assert_eq!(result.appointment.payment_status, PaymentStatus::Pending);
        assert_eq!(result.appointment.amount_minor, 150_000);
        assert_eq!(f.appointments.stored().len(), 1);
    }

    #[tokio::test]
    async fn notifies_the_counselor_once() {
        let f = fixture(MockAvailabilityRepository::with_record(
            weekday_availability("counselor-1"),
        ));

        let result = f.handler.handle(command()).await.unwrap();

        let sent = f.sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "counselor-1@example.com");
        assert!(result
            .appointment
            .notifications
            .is_sent(NotificationKind::BookingCreated));
    }

    #[tokio::test]
    async fn permits_any_time_when_counselor_has_no_schedule() {
        let f = fixture(MockAvailabilityRepository::new());

        let mut cmd = command();
        cmd.appointment_time = time("03:00");

        let result = f.handler.handle(cmd).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_non_working_day() {
        let f = fixture(MockAvailabilityRepository::with_record(
            weekday_availability("counselor-1"),
        ));

        let mut cmd = command();
        // 2026-08-23 is a Sunday, absent from the weekday template
        cmd.appointment_date = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();

        let result = f.handler.handle(cmd).await;
        assert_eq!(
            result.unwrap_err(),
            BookingError::SlotUnavailable(SlotRejection::NotAvailableThisDay)
        );
    }

    #[tokio::test]
    async fn rejects_time_outside_working_hours() {
        let f = fixture(MockAvailabilityRepository::with_record(
            weekday_availability("counselor-1"),
        ));

        let mut cmd = command();
        cmd.appointment_time = time("17:00"); // window end is exclusive

        let result = f.handler.handle(cmd).await;
        assert_eq!(
            result.unwrap_err(),
            BookingError::SlotUnavailable(SlotRejection::OutsideWorkingHours)
        );
    }

    #[tokio::test]
    async fn rejects_already_booked_slot() {
        let f = fixture(MockAvailabilityRepository::with_record(
            weekday_availability("counselor-1"),
        ));

        f.handler.handle(command()).await.unwrap();

        let mut cmd = command();
        cmd.identity = Identity::client(UserId::new("client-2").unwrap());
        let result = f.handler.handle(cmd).await;

        assert_eq!(
            result.unwrap_err(),
            BookingError::SlotUnavailable(SlotRejection::AlreadyBooked)
        );
        assert_eq!(f.appointments.stored().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_appointment_frees_the_slot() {
        let f = fixture(MockAvailabilityRepository::with_record(
            weekday_availability("counselor-1"),
        ));

        let booked = f.handler.handle(command()).await.unwrap().appointment;
        {
            let mut stored = f.appointments.appointments.lock().unwrap();
            let a = stored.iter_mut().find(|a| a.id == booked.id).unwrap();
            a.cancel().unwrap();
        }

        let result = f.handler.handle(command()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_counselor_callers() {
        let f = fixture(MockAvailabilityRepository::new());

        let mut cmd = command();
        cmd.identity = Identity::counselor(UserId::new("counselor-2").unwrap());

        let result = f.handler.handle(cmd).await;
        assert!(matches!(result, Err(BookingError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn fails_when_counselor_unknown() {
        let f = fixture(MockAvailabilityRepository::new());

        let mut cmd = command();
        cmd.counselor_id = UserId::new("nobody").unwrap();

        let result = f.handler.handle(cmd).await;
        assert!(matches!(result, Err(BookingError::CounselorNotFound(_))));
    }

    #[tokio::test]
    async fn no_email_when_insert_fails() {
        let appointments = Arc::new(MockAppointmentRepository {
            appointments: std::sync::Mutex::new(Vec::new()),
            fail_insert: true,
            fail_update: false,
        });
        let sender = Arc::new(RecordingEmailSender::new());
        let handler = BookAppointmentHandler::new(
            appointments,
            Arc::new(MockAvailabilityRepository::new()),
            directory_with("counselor-1", "client-1", 150_000),
            dispatcher(sender.clone()),
        );

        let result = handler.handle(command()).await;
        assert!(result.is_err());
        assert!(sender.sent_messages().is_empty());
    }
}
