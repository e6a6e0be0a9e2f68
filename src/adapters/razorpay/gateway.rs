//! Razorpay order-creation adapter.
//!
//! Implements the `PaymentGateway` port against Razorpay's Orders API.
//! Callback signature verification does not live here; it is pure HMAC
//! computation in the domain layer, keyed by the same key secret.
//!
//! # Security
//!
//! Credentials are held as `secrecy::SecretString` and only exposed at the
//! moment the request is built.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{CreateOrderRequest, GatewayError, GatewayOrder, PaymentGateway};

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Key id (rzp_test_... or rzp_live_...); the basic-auth username.
    key_id: String,

    /// Key secret; the basic-auth password.
    key_secret: SecretString,

    /// Base URL for the Razorpay API.
    api_base_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Razorpay implementation of the PaymentGateway port.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct OrderPayload<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    description: String,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);
        let payload = OrderPayload {
            amount: request.amount_minor,
            currency: &request.currency,
            receipt: &request.receipt,
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Authentication);
        }
        if !status.is_success() {
            let error: ApiErrorResponse = response.json().await.map_err(|e| {
                GatewayError::Api {
                    code: status.as_u16().to_string(),
                    message: format!("Unparseable error response: {}", e),
                }
            })?;
            return Err(GatewayError::Api {
                code: error.error.code,
                message: error.error.description,
            });
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Unreachable(format!("Invalid order response: {}", e)))?;

        Ok(GatewayOrder {
            order_id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_payload_serializes_razorpay_field_names() {
        let payload = OrderPayload {
            amount: 150_000,
            currency: "INR",
            receipt: "receipt_abc",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["amount"], 150_000);
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["receipt"], "receipt_abc");
    }

    #[test]
    fn order_response_deserializes() {
        let json = r#"{"id":"order_LbM4Z","amount":150000,"currency":"INR","status":"created"}"#;
        let order: OrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "order_LbM4Z");
        assert_eq!(order.amount, 150_000);
    }

    #[test]
    fn api_error_deserializes() {
        let json = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"Amount exceeds maximum"}}"#;
        let error: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(error.error.code, "BAD_REQUEST_ERROR");
    }
}
