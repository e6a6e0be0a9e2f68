//! ListAppointmentsHandler - Query handler for the caller's appointments.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, BookingError};
use crate::domain::foundation::Identity;
use crate::ports::AppointmentRepository;

/// Query for all appointments the caller participates in.
#[derive(Debug, Clone)]
pub struct ListAppointmentsQuery {
    pub identity: Identity,
}

/// The caller's appointments, most recent date first.
#[derive(Debug, Clone)]
pub struct ListAppointmentsResult {
    pub appointments: Vec<Appointment>,
}

/// Handler for the appointment list. Clients see what they booked,
/// counselors what they own; terminal appointments are included.
pub struct ListAppointmentsHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl ListAppointmentsHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        query: ListAppointmentsQuery,
    ) -> Result<ListAppointmentsResult, BookingError> {
        let appointments = if query.identity.is_counselor() {
            self.appointments
                .list_by_counselor(&query.identity.user_id)
                .await?
        } else {
            self.appointments
                .list_by_client(&query.identity.user_id)
                .await?
        };

        Ok(ListAppointmentsResult { appointments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{monday, time, MockAppointmentRepository};
    use crate::domain::appointment::{ServiceType, SessionType};
    use crate::domain::foundation::UserId;

    fn appointment(client: &str, counselor: &str, date: chrono::NaiveDate) -> Appointment {
        Appointment::book(
            UserId::new(client).unwrap(),
            UserId::new(counselor).unwrap(),
            ServiceType::MentalHealth,
            date,
            time("10:00"),
            SessionType::Video,
            150_000,
            None,
        )
    }

    #[tokio::test]
    async fn client_sees_only_their_bookings() {
        let repo = Arc::new(MockAppointmentRepository::new());
        repo.appointments
            .lock()
            .unwrap()
            .extend([
                appointment("client-1", "counselor-1", monday()),
                appointment("client-2", "counselor-1", monday().succ_opt().unwrap()),
            ]);
        let handler = ListAppointmentsHandler::new(repo);

        let result = handler
            .handle(ListAppointmentsQuery {
                identity: Identity::client(UserId::new("client-1").unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(result.appointments.len(), 1);
        assert_eq!(
            result.appointments[0].client_id,
            UserId::new("client-1").unwrap()
        );
    }

    #[tokio::test]
    async fn counselor_sees_all_their_appointments_newest_first() {
        let repo = Arc::new(MockAppointmentRepository::new());
        let earlier = monday();
        let later = monday().succ_opt().unwrap();
        repo.appointments.lock().unwrap().extend([
            appointment("client-1", "counselor-1", earlier),
            appointment("client-2", "counselor-1", later),
        ]);
        let handler = ListAppointmentsHandler::new(repo);

        let result = handler
            .handle(ListAppointmentsQuery {
                identity: Identity::counselor(UserId::new("counselor-1").unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(result.appointments.len(), 2);
        assert_eq!(result.appointments[0].appointment_date, later);
    }

    #[tokio::test]
    async fn empty_list_is_not_an_error() {
        let repo = Arc::new(MockAppointmentRepository::new());
        let handler = ListAppointmentsHandler::new(repo);

        let result = handler
            .handle(ListAppointmentsQuery {
                identity: Identity::client(UserId::new("client-1").unwrap()),
            })
            .await
            .unwrap();

        assert!(result.appointments.is_empty());
    }
}
