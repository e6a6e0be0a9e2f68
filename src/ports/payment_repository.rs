//! Payment ledger repository port.

use async_trait::async_trait;

use crate::domain::foundation::{AppointmentId, DomainError};
use crate::domain::payment::PaymentRecord;

/// Repository port for payment ledger records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts a new pending record.
    ///
    /// # Errors
    ///
    /// - `DuplicateOrder` if a record already exists for this order id
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, record: &PaymentRecord) -> Result<(), DomainError>;

    /// Updates an existing record.
    async fn update(&self, record: &PaymentRecord) -> Result<(), DomainError>;

    /// Finds a record by gateway order id. Returns `None` if unknown.
    async fn find_by_order_id(&self, order_id: &str)
        -> Result<Option<PaymentRecord>, DomainError>;

    /// Finds the record for an appointment, if any.
    async fn find_by_appointment(
        &self,
        appointment_id: &AppointmentId,
    ) -> Result<Option<PaymentRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentRepository) {}
    }
}
