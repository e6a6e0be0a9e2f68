//! Appointment status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of an appointment.
///
/// `Completed`, `Rejected`, and `Cancelled` are terminal: nothing moves an
/// appointment out of them. Cancelled and rejected appointments are kept,
/// never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked by a client, awaiting counselor action.
    Pending,

    /// Accepted by the counselor (or auto-confirmed by verified payment).
    Confirmed,

    /// Declined by the counselor. Terminal.
    Rejected,

    /// Session held and closed out by the counselor. Terminal.
    Completed,

    /// Called off by either participant. Terminal.
    Cancelled,
}

impl StateMachine for AppointmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, target),
            (Pending, Confirmed)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AppointmentStatus::*;
        match self {
            Pending => vec![Confirmed, Rejected, Cancelled],
            Confirmed => vec![Completed, Cancelled],
            Rejected | Completed | Cancelled => vec![],
        }
    }
}

impl AppointmentStatus {
    /// True for statuses that hold a slot against double booking.
    pub fn holds_slot(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Rejected => "rejected",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment progress, advanced independently of the lifecycle status by
/// payment reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_to_confirmed_rejected_or_cancelled() {
        let s = AppointmentStatus::Pending;
        assert!(s.can_transition_to(&AppointmentStatus::Confirmed));
        assert!(s.can_transition_to(&AppointmentStatus::Rejected));
        assert!(s.can_transition_to(&AppointmentStatus::Cancelled));
        assert!(!s.can_transition_to(&AppointmentStatus::Completed));
    }

    #[test]
    fn confirmed_moves_to_completed_or_cancelled() {
        let s = AppointmentStatus::Confirmed;
        assert!(s.can_transition_to(&AppointmentStatus::Completed));
        assert!(s.can_transition_to(&AppointmentStatus::Cancelled));
        assert!(!s.can_transition_to(&AppointmentStatus::Rejected));
        assert!(!s.can_transition_to(&AppointmentStatus::Pending));
    }

    #[test]
    fn terminal_statuses_have_no_exits() {
        assert!(AppointmentStatus::Rejected.is_terminal());
        assert!(AppointmentStatus::Completed.is_terminal());
        assert!(AppointmentStatus::Cancelled.is_terminal());
        assert!(!AppointmentStatus::Pending.is_terminal());
        assert!(!AppointmentStatus::Confirmed.is_terminal());
    }

    #[test]
    fn cancelled_cannot_be_revived() {
        let s = AppointmentStatus::Cancelled;
        for target in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Rejected,
            AppointmentStatus::Completed,
        ] {
            assert!(s.transition_to(target).is_err());
        }
    }

    #[test]
    fn only_pending_and_confirmed_hold_slots() {
        assert!(AppointmentStatus::Pending.holds_slot());
        assert!(AppointmentStatus::Confirmed.holds_slot());
        assert!(!AppointmentStatus::Rejected.holds_slot());
        assert!(!AppointmentStatus::Completed.holds_slot());
        assert!(!AppointmentStatus::Cancelled.holds_slot());
    }
}
