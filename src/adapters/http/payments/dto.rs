//! JSON request/response types for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::payment::{PaymentRecord, PaymentRecordStatus};

/// Request to open a gateway order for an appointment. The charge is read
/// from the stored appointment, never from the request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub appointment_id: String,
}

/// Gateway callback carrying the payment result and its signature.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// The opened order, echoed back for the checkout widget.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// A payment ledger record.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRecordResponse {
    pub id: String,
    pub appointment_id: String,
    pub order_id: String,
    pub payment_id: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub status: PaymentRecordStatus,
}

impl From<&PaymentRecord> for PaymentRecordResponse {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            appointment_id: record.appointment_id.to_string(),
            order_id: record.order_id.clone(),
            payment_id: record.payment_id.clone(),
            amount_minor: record.amount_minor,
            currency: record.currency.clone(),
            status: record.status,
        }
    }
}

/// Result of a verified callback.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub verified: bool,
    pub record: PaymentRecordResponse,
}
