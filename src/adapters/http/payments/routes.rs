//! Axum router for payment endpoints.

use axum::routing::post;
use axum::Router;

use super::super::state::ApiState;
use super::handlers::{create_order, verify_payment};

/// Create the payment API router, mounted at `/api/payments`.
///
/// - `POST /orders` - Open a gateway order (client)
/// - `POST /verify` - Verify a gateway callback (signature-authorized)
pub fn payment_routes() -> Router<ApiState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/verify", post(verify_payment))
}
