//! Payment gateway port for order creation.
//!
//! Signature verification of callbacks does not go through this port; it is
//! pure computation over the shared secret and lives in
//! [`crate::domain::payment::PaymentSignatureVerifier`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Request to open an order with the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Charge in minor currency units (e.g. paise).
    pub amount_minor: i64,

    /// ISO currency code, e.g. "INR".
    pub currency: String,

    /// Merchant-side receipt reference; doubles as the idempotency key.
    pub receipt: String,
}

/// An order opened with the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// The gateway's order id.
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Errors from gateway operations.
///
/// Unlike email failures, these ARE surfaced to the caller: a client cannot
/// pay without a valid order.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The gateway could not be reached.
    #[error("Gateway unreachable: {0}")]
    Unreachable(String),

    /// API credentials were refused.
    #[error("Gateway authentication failed")]
    Authentication,

    /// The gateway returned an API error.
    #[error("Gateway error {code}: {message}")]
    Api { code: String, message: String },
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        DomainError::new(ErrorCode::GatewayError, err.to_string())
    }
}

/// Port for the payment gateway collaborator.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens an order the client will pay against.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn gateway_error_converts_to_domain_error() {
        let err: DomainError = GatewayError::Authentication.into();
        assert_eq!(err.code, ErrorCode::GatewayError);
    }
}
