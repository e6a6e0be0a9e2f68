//! Axum router for appointment endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::state::ApiState;
use super::handlers::{
    attach_file, authorize_session, book_appointment, cancel_appointment, complete_appointment,
    confirm_appointment, list_appointments, list_client_records, reject_appointment, update_notes,
};

/// Create the appointment API router, mounted at `/api/appointments`.
///
/// - `POST /` - Book an appointment (client)
/// - `GET /` - List the caller's appointments
/// - `PUT /:id/confirm` - Confirm (counselor)
/// - `PUT /:id/reject` - Reject (counselor)
/// - `PUT /:id/cancel` - Cancel (either participant)
/// - `PUT /:id/complete` - Complete (counselor)
/// - `PUT /:id/notes` - Replace counselor notes
/// - `POST /:id/attachments` - Upload an attachment (counselor)
/// - `GET /:id/session` - Session-join authorization
/// - `GET /clients/:client_id` - Counselor's records for one client
pub fn appointment_routes() -> Router<ApiState> {
    Router::new()
        .route("/", post(book_appointment))
        .route("/", get(list_appointments))
        .route("/:id/confirm", put(confirm_appointment))
        .route("/:id/reject", put(reject_appointment))
        .route("/:id/cancel", put(cancel_appointment))
        .route("/:id/complete", put(complete_appointment))
        .route("/:id/notes", put(update_notes))
        .route("/:id/attachments", post(attach_file))
        .route("/:id/session", get(authorize_session))
        .route("/clients/:client_id", get(list_client_records))
}
