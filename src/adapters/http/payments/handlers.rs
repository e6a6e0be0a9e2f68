//! HTTP handlers for payment endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use uuid::Uuid;

use crate::application::handlers::payment::{CreateOrderCommand, VerifyPaymentCommand};
use crate::domain::appointment::BookingError;
use crate::domain::foundation::AppointmentId;

use super::super::auth::AuthenticatedUser;
use super::super::error::ApiError;
use super::super::state::ApiState;
use super::dto::{
    CreateOrderRequest, CreateOrderResponse, PaymentRecordResponse, VerifyPaymentRequest,
    VerifyPaymentResponse,
};

/// POST /api/payments/orders - Open a gateway order for an appointment
pub async fn create_order(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let appointment_id = Uuid::parse_str(&request.appointment_id)
        .map(AppointmentId::from_uuid)
        .map_err(|_| BookingError::validation("appointment_id", "not a valid UUID"))?;

    let handler = state.create_order_handler();
    let result = handler
        .handle(CreateOrderCommand {
            identity: user.identity,
            appointment_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order_id: result.order.order_id,
            amount_minor: result.order.amount_minor,
            currency: result.order.currency,
        }),
    ))
}

/// POST /api/payments/verify - Verify a gateway callback
///
/// No identity extraction: the HMAC signature is the authorization. Anyone
/// presenting a digest the gateway's secret produced is the gateway.
pub async fn verify_payment(
    State(state): State<ApiState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.verify_payment_handler();
    let result = handler
        .handle(VerifyPaymentCommand {
            order_id: request.razorpay_order_id,
            payment_id: request.razorpay_payment_id,
            signature: request.razorpay_signature,
        })
        .await?;

    Ok(Json(VerifyPaymentResponse {
        verified: true,
        record: PaymentRecordResponse::from(&result.record),
    }))
}
