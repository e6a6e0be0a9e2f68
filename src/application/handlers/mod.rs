//! Application handlers.
//!
//! One Command/Query struct plus one Handler per operation. Handlers own
//! `Arc<dyn Port>` references, run the authorization and domain logic, and
//! persist through the repositories. Notification dispatch always happens
//! after the aggregate is persisted, and only when this request flipped the
//! corresponding latch.

pub mod appointment;
pub mod availability;
pub mod payment;

use tracing::warn;

use crate::application::notifications::{NotificationContext, NotificationDispatcher};
use crate::domain::appointment::{Appointment, NotificationKind};
use crate::ports::UserDirectory;

/// Resolves both parties' contact details and dispatches one notification.
///
/// Booking-created goes to the counselor; everything else goes to the
/// client. Lookup failures are logged and swallowed, matching the
/// fire-and-forget contract of dispatch itself.
pub(crate) async fn notify(
    directory: &dyn UserDirectory,
    dispatcher: &NotificationDispatcher,
    appointment: &Appointment,
    kind: NotificationKind,
) {
    let recipient_id = match kind {
        NotificationKind::BookingCreated => &appointment.counselor_id,
        NotificationKind::Confirmed | NotificationKind::Rejected | NotificationKind::Reminder => {
            &appointment.client_id
        }
    };

    let recipient = match directory.find_contact(recipient_id).await {
        Ok(Some(contact)) => contact,
        Ok(None) => {
            warn!(user_id = %recipient_id, kind = %kind, "notification recipient not found");
            return;
        }
        Err(err) => {
            warn!(error = %err, kind = %kind, "contact lookup failed, skipping notification");
            return;
        }
    };

    let other_id = if recipient_id == &appointment.client_id {
        &appointment.counselor_id
    } else {
        &appointment.client_id
    };
    let other_name = match directory.find_contact(other_id).await {
        Ok(Some(contact)) => contact.name,
        _ => other_id.to_string(),
    };

    let (client_name, counselor_name) = if recipient_id == &appointment.client_id {
        (recipient.name.clone(), other_name)
    } else {
        (other_name, recipient.name.clone())
    };

    let context = NotificationContext {
        recipient,
        client_name,
        counselor_name,
        date: appointment.appointment_date,
        time: appointment.appointment_time,
    };
    dispatcher.dispatch(kind, &context).await;
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared mock ports and fixtures for handler tests.
    //!
    //! The mocks are the in-memory adapters under different names; the
    //! aliases keep handler tests reading as unit tests.

    use std::sync::Arc;

    use chrono::NaiveDate;

    pub use crate::adapters::memory::{
        InMemoryAppointmentRepository as MockAppointmentRepository,
        InMemoryAvailabilityRepository as MockAvailabilityRepository,
        InMemoryFileStorage as MockFileStorage, InMemoryPaymentRepository as MockPaymentRepository,
        MockPaymentGateway, RecordingEmailSender, StaticUserDirectory,
    };

    use crate::application::notifications::NotificationDispatcher;
    use crate::domain::availability::{
        Availability, DayOfWeek, TimeOfDay, WeeklyTemplate, WorkingHours,
    };
    use crate::domain::foundation::UserId;

    pub fn time(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    /// 2026-08-24 is a Monday.
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    /// Weekday template: Monday through Friday, 09:00-17:00.
    pub fn weekday_availability(counselor_id: &str) -> Availability {
        let entries = (1..=5)
            .map(|day| WorkingHours {
                day_of_week: DayOfWeek::new(day).unwrap(),
                start_time: time("09:00"),
                end_time: time("17:00"),
                is_working: true,
            })
            .collect();
        Availability::create(
            UserId::new(counselor_id).unwrap(),
            WeeklyTemplate::new(entries).unwrap(),
            vec![],
        )
        .unwrap()
    }

    pub fn dispatcher(sender: Arc<RecordingEmailSender>) -> Arc<NotificationDispatcher> {
        Arc::new(NotificationDispatcher::new(sender))
    }

    pub fn directory_with(
        counselor: &str,
        client: &str,
        rate_minor: i64,
    ) -> Arc<StaticUserDirectory> {
        Arc::new(
            StaticUserDirectory::new()
                .with_counselor(counselor, rate_minor)
                .with_contact(client),
        )
    }
}
