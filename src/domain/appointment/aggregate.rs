//! Appointment aggregate: one booked session between a client and a
//! counselor.
//!
//! # Design Decisions
//!
//! - **Amount snapshot**: the charge is copied from the counselor's rate at
//!   booking time and never recomputed; payment flows must charge this stored
//!   amount, not a caller-supplied one
//! - **Money in minor units**: all monetary values are i64 minor units
//! - **Terminal means terminal**: cancelled and rejected appointments are
//!   kept, never deleted, and never transition again
//! - **Notification latches on the aggregate**: dispatch bookkeeping travels
//!   with the appointment so the check-and-set happens in the same logical
//!   operation as the transition

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::availability::TimeOfDay;
use crate::domain::foundation::{AppointmentId, StateMachine, Timestamp, UserId};

use super::{AppointmentStatus, BookingError, NotificationKind, NotificationLog, PaymentStatus};

/// The counseling service being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    MentalHealth,
    Relationship,
    Career,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::MentalHealth => "mental-health",
            ServiceType::Relationship => "relationship",
            ServiceType::Career => "career",
        }
    }
}

/// How the session is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Video,
    Chat,
    Email,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Video => "video",
            SessionType::Chat => "chat",
            SessionType::Email => "email",
        }
    }
}

/// A file attached to the appointment by the counselor.
///
/// The blob itself lives in the file-storage collaborator; only the
/// returned URL and original name are kept here. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub file_url: String,
    pub uploaded_at: Timestamp,
}

/// Appointment aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: UserId,
    pub counselor_id: UserId,
    pub service_type: ServiceType,
    pub appointment_date: NaiveDate,
    pub appointment_time: TimeOfDay,
    pub session_type: SessionType,

    /// Charge in minor currency units, snapshotted from the counselor's
    /// rate at booking time. Immutable thereafter.
    pub amount_minor: i64,

    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,

    /// Client-authored notes, set once at booking.
    pub notes: Option<String>,

    /// Counselor session notes, settable any time after the appointment
    /// exists.
    pub counselor_notes: Option<String>,

    pub attachments: Vec<Attachment>,
    pub notifications: NotificationLog,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appointment {
    /// Books a new pending appointment. Slot validation happens before this
    /// is called; the storage layer additionally guarantees the slot is
    /// unique among active appointments.
    #[allow(clippy::too_many_arguments)]
    pub fn book(
        client_id: UserId,
        counselor_id: UserId,
        service_type: ServiceType,
        appointment_date: NaiveDate,
        appointment_time: TimeOfDay,
        session_type: SessionType,
        amount_minor: i64,
        notes: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: AppointmentId::new(),
            client_id,
            counselor_id,
            service_type,
            appointment_date,
            appointment_time,
            session_type,
            amount_minor,
            status: AppointmentStatus::Pending,
            payment_status: PaymentStatus::Pending,
            notes,
            counselor_notes: None,
            attachments: Vec::new(),
            notifications: NotificationLog::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Counselor accepts a pending appointment.
    pub fn confirm(&mut self) -> Result<(), BookingError> {
        self.transition(AppointmentStatus::Confirmed, "confirm")
    }

    /// Counselor declines a pending appointment.
    pub fn reject(&mut self) -> Result<(), BookingError> {
        self.transition(AppointmentStatus::Rejected, "reject")
    }

    /// Counselor closes out a confirmed appointment, optionally attaching
    /// session notes.
    pub fn complete(&mut self, notes: Option<String>) -> Result<(), BookingError> {
        self.transition(AppointmentStatus::Completed, "complete")?;
        if let Some(notes) = notes {
            self.counselor_notes = Some(notes);
        }
        Ok(())
    }

    /// Either participant calls off a pending or confirmed appointment.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        self.transition(AppointmentStatus::Cancelled, "cancel")
    }

    /// Records a verified payment: payment status completes, and a pending
    /// appointment auto-confirms. An appointment already past pending keeps
    /// its lifecycle status.
    pub fn record_payment_completed(&mut self) {
        self.payment_status = PaymentStatus::Completed;
        if self.status == AppointmentStatus::Pending {
            self.status = AppointmentStatus::Confirmed;
        }
        self.touch();
    }

    /// Replaces the counselor's session notes.
    pub fn set_counselor_notes(&mut self, notes: String) {
        self.counselor_notes = Some(notes);
        self.touch();
    }

    /// Appends a stored attachment.
    pub fn push_attachment(&mut self, file_name: String, file_url: String) {
        self.attachments.push(Attachment {
            file_name,
            file_url,
            uploaded_at: Timestamp::now(),
        });
        self.touch();
    }

    /// Latches a notification kind as dispatched. Returns true if this call
    /// flipped the latch.
    pub fn mark_notification_sent(&mut self, kind: NotificationKind) -> bool {
        let newly = self.notifications.mark_sent(kind);
        if newly {
            self.touch();
        }
        newly
    }

    /// True if the user is the client or the counselor on this appointment.
    pub fn is_participant(&self, user_id: &UserId) -> bool {
        &self.client_id == user_id || &self.counselor_id == user_id
    }

    /// True if the user is the owning counselor.
    pub fn is_owned_by_counselor(&self, user_id: &UserId) -> bool {
        &self.counselor_id == user_id
    }

    /// True if the user is the booking client.
    pub fn is_booked_by_client(&self, user_id: &UserId) -> bool {
        &self.client_id == user_id
    }

    fn transition(
        &mut self,
        target: AppointmentStatus,
        attempted: &str,
    ) -> Result<(), BookingError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| BookingError::invalid_state(self.status.as_str(), attempted))?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booked() -> Appointment {
        Appointment::book(
            UserId::new("client-1").unwrap(),
            UserId::new("counselor-1").unwrap(),
            ServiceType::MentalHealth,
            NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
            TimeOfDay::parse("10:00").unwrap(),
            SessionType::Video,
            150_000,
            Some("First session".to_string()),
        )
    }

    #[test]
    fn booking_starts_pending_and_unpaid() {
        let appointment = booked();
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.payment_status, PaymentStatus::Pending);
        assert!(appointment.attachments.is_empty());
        assert!(!appointment
            .notifications
            .is_sent(NotificationKind::BookingCreated));
    }

    #[test]
    fn confirm_then_complete() {
        let mut appointment = booked();
        appointment.confirm().unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        appointment
            .complete(Some("Made good progress".to_string()))
            .unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Completed);
        assert_eq!(
            appointment.counselor_notes.as_deref(),
            Some("Made good progress")
        );
    }

    #[test]
    fn complete_requires_confirmed() {
        let mut appointment = booked();
        let err = appointment.complete(None).unwrap_err();
        assert_eq!(
            err,
            BookingError::invalid_state("pending", "complete")
        );
    }

    #[test]
    fn reject_requires_pending() {
        let mut appointment = booked();
        appointment.confirm().unwrap();
        assert!(appointment.reject().is_err());
    }

    #[test]
    fn cancel_allowed_from_pending_and_confirmed_only() {
        let mut a = booked();
        assert!(a.cancel().is_ok());

        let mut b = booked();
        b.confirm().unwrap();
        assert!(b.cancel().is_ok());

        let mut c = booked();
        c.confirm().unwrap();
        c.complete(None).unwrap();
        assert!(c.cancel().is_err());
    }

    #[test]
    fn cancelled_appointment_never_transitions_again() {
        let mut appointment = booked();
        appointment.cancel().unwrap();
        assert!(appointment.confirm().is_err());
        assert!(appointment.reject().is_err());
        assert!(appointment.complete(None).is_err());
        assert_eq!(appointment.status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn payment_completion_auto_confirms_pending() {
        let mut appointment = booked();
        appointment.record_payment_completed();
        assert_eq!(appointment.payment_status, PaymentStatus::Completed);
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn payment_completion_leaves_terminal_status_alone() {
        let mut appointment = booked();
        appointment.cancel().unwrap();
        appointment.record_payment_completed();
        assert_eq!(appointment.payment_status, PaymentStatus::Completed);
        assert_eq!(appointment.status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn participant_checks() {
        let appointment = booked();
        let client = UserId::new("client-1").unwrap();
        let counselor = UserId::new("counselor-1").unwrap();
        let stranger = UserId::new("stranger").unwrap();

        assert!(appointment.is_participant(&client));
        assert!(appointment.is_participant(&counselor));
        assert!(!appointment.is_participant(&stranger));
        assert!(appointment.is_owned_by_counselor(&counselor));
        assert!(!appointment.is_owned_by_counselor(&client));
        assert!(appointment.is_booked_by_client(&client));
    }

    #[test]
    fn notification_latch_flips_once() {
        let mut appointment = booked();
        assert!(appointment.mark_notification_sent(NotificationKind::Confirmed));
        assert!(!appointment.mark_notification_sent(NotificationKind::Confirmed));
    }

    #[test]
    fn attachments_are_append_only() {
        let mut appointment = booked();
        appointment.push_attachment("notes.pdf".to_string(), "/uploads/abc".to_string());
        appointment.push_attachment("plan.pdf".to_string(), "/uploads/def".to_string());
        assert_eq!(appointment.attachments.len(), 2);
        assert_eq!(appointment.attachments[0].file_name, "notes.pdf");
    }
}
