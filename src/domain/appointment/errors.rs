//! Booking-specific error types.
//!
//! Errors raised by the booking, lifecycle, and payment-reconciliation flows.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | AppointmentNotFound / CounselorNotFound / AvailabilityNotFound / PaymentNotFound | 404 |
//! | Forbidden | 403 |
//! | SlotUnavailable | 409 |
//! | InvalidState | 409 |
//! | DuplicateOrder | 409 |
//! | InvalidPaymentSignature | 400 |
//! | ValidationFailed | 400 |
//! | GatewayFailed | 502 |
//! | Infrastructure | 500 |
//!
//! Authorization failures are deliberately distinct from not-found: a 404 is
//! only returned when the appointment genuinely does not exist, a 403 when it
//! exists but the caller is not the required participant.

use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode, UserId, ValidationError};
use crate::domain::scheduling::SlotRejection;

/// Errors from booking and lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Appointment was not found.
    AppointmentNotFound(AppointmentId),

    /// Referenced counselor does not exist (or is not a counselor).
    CounselorNotFound(UserId),

    /// Counselor has no availability record.
    AvailabilityNotFound(UserId),

    /// No payment record for this gateway order id.
    PaymentNotFound(String),

    /// Caller is authenticated but not permitted for this operation.
    Forbidden { reason: String },

    /// The requested slot cannot be booked.
    SlotUnavailable(SlotRejection),

    /// The appointment's current status does not allow this transition.
    InvalidState { current: String, attempted: String },

    /// A payment order already exists for this gateway order id.
    DuplicateOrder(String),

    /// Supplied payment signature did not match the expected HMAC.
    InvalidPaymentSignature,

    /// Input failed validation.
    ValidationFailed { field: String, message: String },

    /// The payment gateway could not be reached or refused the order.
    GatewayFailed { reason: String },

    /// Storage or other infrastructure failure.
    Infrastructure(String),
}

impl BookingError {
    pub fn appointment_not_found(id: AppointmentId) -> Self {
        BookingError::AppointmentNotFound(id)
    }

    pub fn counselor_not_found(id: UserId) -> Self {
        BookingError::CounselorNotFound(id)
    }

    pub fn availability_not_found(counselor: UserId) -> Self {
        BookingError::AvailabilityNotFound(counselor)
    }

    pub fn payment_not_found(order_id: impl Into<String>) -> Self {
        BookingError::PaymentNotFound(order_id.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        BookingError::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn slot_unavailable(rejection: SlotRejection) -> Self {
        BookingError::SlotUnavailable(rejection)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        BookingError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn duplicate_order(order_id: impl Into<String>) -> Self {
        BookingError::DuplicateOrder(order_id.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn gateway_failed(reason: impl Into<String>) -> Self {
        BookingError::GatewayFailed {
            reason: reason.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            BookingError::AppointmentNotFound(_) => "Appointment not found".to_string(),
            BookingError::CounselorNotFound(_) => "Counselor not found".to_string(),
            BookingError::AvailabilityNotFound(_) => "Availability not found".to_string(),
            BookingError::PaymentNotFound(_) => "Payment record not found".to_string(),
            BookingError::Forbidden { reason } => reason.clone(),
            BookingError::SlotUnavailable(rejection) => rejection.message().to_string(),
            BookingError::InvalidState { current, attempted } => {
                format!("Cannot {} an appointment that is {}", attempted, current)
            }
            BookingError::DuplicateOrder(order_id) => {
                format!("An order already exists for {}", order_id)
            }
            BookingError::InvalidPaymentSignature => "Invalid payment signature".to_string(),
            BookingError::ValidationFailed { field, message } => {
                format!("{}: {}", field, message)
            }
            BookingError::GatewayFailed { reason } => {
                format!("Payment gateway error: {}", reason)
            }
            BookingError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        BookingError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SlotConflict => BookingError::SlotUnavailable(SlotRejection::AlreadyBooked),
            ErrorCode::DuplicateOrder => BookingError::DuplicateOrder(
                err.details.get("order_id").cloned().unwrap_or_default(),
            ),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => BookingError::Forbidden {
                reason: err.message,
            },
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => BookingError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::GatewayError => BookingError::GatewayFailed {
                reason: err.message,
            },
            _ => BookingError::Infrastructure(err.message),
        }
    }
}
