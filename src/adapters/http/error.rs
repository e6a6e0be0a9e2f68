//! API error responses.
//!
//! One wrapper converts booking errors into HTTP responses. Authorization
//! failures stay distinct from not-found: 404 only when the resource
//! genuinely does not exist, 403 when it exists but the caller is not the
//! required participant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::domain::appointment::BookingError;
use crate::domain::foundation::{DomainError, ValidationError};

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts booking errors to HTTP responses.
pub struct ApiError(BookingError);

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(BookingError::from(err))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(BookingError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            BookingError::AppointmentNotFound(_) => {
                (StatusCode::NOT_FOUND, "APPOINTMENT_NOT_FOUND")
            }
            BookingError::CounselorNotFound(_) => (StatusCode::NOT_FOUND, "COUNSELOR_NOT_FOUND"),
            BookingError::AvailabilityNotFound(_) => {
                (StatusCode::NOT_FOUND, "AVAILABILITY_NOT_FOUND")
            }
            BookingError::PaymentNotFound(_) => (StatusCode::NOT_FOUND, "PAYMENT_NOT_FOUND"),
            BookingError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            BookingError::SlotUnavailable(_) => (StatusCode::CONFLICT, "SLOT_UNAVAILABLE"),
            BookingError::InvalidState { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION")
            }
            BookingError::DuplicateOrder(_) => (StatusCode::CONFLICT, "DUPLICATE_ORDER"),
            BookingError::InvalidPaymentSignature => {
                (StatusCode::BAD_REQUEST, "INVALID_PAYMENT_SIGNATURE")
            }
            BookingError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            BookingError::GatewayFailed { .. } => (StatusCode::BAD_GATEWAY, "GATEWAY_FAILED"),
            BookingError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
