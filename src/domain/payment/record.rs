//! Payment ledger record linking an appointment to a gateway order.

use serde::{Deserialize, Serialize};

use crate::domain::appointment::BookingError;
use crate::domain::foundation::{AppointmentId, PaymentRecordId, StateMachine, Timestamp, UserId};

/// Status of a payment ledger record.
///
/// Created `Pending` at order-creation time; moved exactly once to
/// `Succeeded` or a failure state by a verified callback. The
/// only-from-pending guard is what makes callback replay a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRecordStatus {
    Pending,
    Succeeded,
    Failed,
    Cancelled,
}

impl StateMachine for PaymentRecordStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentRecordStatus::*;
        matches!(
            (self, target),
            (Pending, Succeeded) | (Pending, Failed) | (Pending, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentRecordStatus::*;
        match self {
            Pending => vec![Succeeded, Failed, Cancelled],
            Succeeded | Failed | Cancelled => vec![],
        }
    }
}

impl PaymentRecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentRecordStatus::Pending => "pending",
            PaymentRecordStatus::Succeeded => "succeeded",
            PaymentRecordStatus::Failed => "failed",
            PaymentRecordStatus::Cancelled => "cancelled",
        }
    }
}

/// One appointment, one gateway order.
///
/// # Invariants
///
/// - `order_id` is unique (storage-level constraint)
/// - `amount_minor` is copied from the appointment, never caller-supplied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentRecordId,
    pub appointment_id: AppointmentId,
    pub client_id: UserId,
    pub counselor_id: UserId,
    pub amount_minor: i64,
    pub currency: String,

    /// Gateway order id, assigned at order creation. Unique.
    pub order_id: String,

    /// Gateway payment id, known only after a verified callback.
    pub payment_id: Option<String>,

    /// Signature supplied with the verified callback, kept for audit.
    pub signature: Option<String>,

    pub status: PaymentRecordStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PaymentRecord {
    /// Opens a pending ledger record for a freshly created gateway order.
    pub fn create(
        appointment_id: AppointmentId,
        client_id: UserId,
        counselor_id: UserId,
        amount_minor: i64,
        currency: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: PaymentRecordId::new(),
            appointment_id,
            client_id,
            counselor_id,
            amount_minor,
            currency: currency.into(),
            order_id: order_id.into(),
            payment_id: None,
            signature: None,
            status: PaymentRecordStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the record succeeded after signature verification.
    ///
    /// Returns `Ok(true)` when this call performed the transition,
    /// `Ok(false)` when the record had already succeeded (callback replay),
    /// and an error when the record is in a failure state.
    pub fn mark_succeeded(
        &mut self,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Result<bool, BookingError> {
        match self.status {
            PaymentRecordStatus::Succeeded => Ok(false),
            PaymentRecordStatus::Pending => {
                self.status = PaymentRecordStatus::Succeeded;
                self.payment_id = Some(payment_id.into());
                self.signature = Some(signature.into());
                self.updated_at = Timestamp::now();
                Ok(true)
            }
            other => Err(BookingError::invalid_state(other.as_str(), "settle")),
        }
    }

    /// Marks the record failed. Only valid from pending.
    pub fn mark_failed(&mut self) -> Result<(), BookingError> {
        self.status = self
            .status
            .transition_to(PaymentRecordStatus::Failed)
            .map_err(|_| BookingError::invalid_state(self.status.as_str(), "fail"))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PaymentRecord {
        PaymentRecord::create(
            AppointmentId::new(),
            UserId::new("client-1").unwrap(),
            UserId::new("counselor-1").unwrap(),
            150_000,
            "INR",
            "order_abc123",
        )
    }

    #[test]
    fn create_opens_pending_record() {
        let record = record();
        assert_eq!(record.status, PaymentRecordStatus::Pending);
        assert!(record.payment_id.is_none());
    }

    #[test]
    fn mark_succeeded_transitions_once() {
        let mut record = record();
        assert_eq!(record.mark_succeeded("pay_1", "sig_1"), Ok(true));
        assert_eq!(record.status, PaymentRecordStatus::Succeeded);
        assert_eq!(record.payment_id.as_deref(), Some("pay_1"));

        // Replay of the same callback is a no-op, not an error
        assert_eq!(record.mark_succeeded("pay_1", "sig_1"), Ok(false));
        assert_eq!(record.status, PaymentRecordStatus::Succeeded);
    }

    #[test]
    fn mark_succeeded_errors_from_failed() {
        let mut record = record();
        record.mark_failed().unwrap();
        assert!(record.mark_succeeded("pay_1", "sig_1").is_err());
    }

    #[test]
    fn settled_statuses_are_terminal() {
        assert!(PaymentRecordStatus::Succeeded.is_terminal());
        assert!(PaymentRecordStatus::Failed.is_terminal());
        assert!(PaymentRecordStatus::Cancelled.is_terminal());
        assert!(!PaymentRecordStatus::Pending.is_terminal());
    }
}
