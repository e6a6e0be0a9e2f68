//! Appointment repository port.
//!
//! # Design
//!
//! - **Atomic slot claim**: `insert` must fail with `SlotConflict` when an
//!   active (pending or confirmed) appointment already holds the same
//!   (counselor, date, time). An application-level check-then-insert is not
//!   enough under concurrency; implementations back this with a uniqueness
//!   constraint or equivalent atomic conditional write.
//! - **No deletes**: terminal appointments are kept; there is no delete
//!   operation on this port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::appointment::Appointment;
use crate::domain::availability::TimeOfDay;
use crate::domain::foundation::{AppointmentId, DomainError, UserId};

/// Repository port for Appointment aggregate persistence.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Inserts a new appointment, atomically claiming its slot.
    ///
    /// # Errors
    ///
    /// - `SlotConflict` if an active appointment already holds the slot
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// Updates an existing appointment.
    ///
    /// # Errors
    ///
    /// - `AppointmentNotFound` if the appointment doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// Finds an appointment by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError>;

    /// True if an active (pending or confirmed) appointment holds the slot.
    ///
    /// Used for the pre-insert check that produces a friendly rejection;
    /// the insert constraint remains the authoritative guard.
    async fn slot_is_booked(
        &self,
        counselor_id: &UserId,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> Result<bool, DomainError>;

    /// All appointments booked by a client, most recent date first.
    async fn list_by_client(&self, client_id: &UserId) -> Result<Vec<Appointment>, DomainError>;

    /// All appointments owned by a counselor, most recent date first.
    async fn list_by_counselor(
        &self,
        counselor_id: &UserId,
    ) -> Result<Vec<Appointment>, DomainError>;

    /// Confirmed and completed appointments between a counselor and one of
    /// their clients, most recent date first. Backs the client-records view.
    async fn list_client_records(
        &self,
        counselor_id: &UserId,
        client_id: &UserId,
    ) -> Result<Vec<Appointment>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AppointmentRepository) {}
    }
}
