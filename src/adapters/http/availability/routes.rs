//! Axum router for availability endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::super::state::ApiState;
use super::handlers::{get_availability, update_availability};

/// Create the availability API router, mounted at `/api/availability`.
///
/// - `GET /:counselor_id` - Read a counselor's schedule
/// - `PUT /` - Create or fully replace the caller's schedule (counselor)
pub fn availability_routes() -> Router<ApiState> {
    Router::new()
        .route("/", put(update_availability))
        .route("/:counselor_id", get(get_availability))
}
