//! HTTP adapters - REST API implementations.
//!
//! Each domain area has its own router module; identity extraction, error
//! mapping, and shared state live at this level.

pub mod appointments;
pub mod auth;
pub mod availability;
pub mod error;
pub mod payments;
mod state;

pub use appointments::appointment_routes;
pub use auth::AuthenticatedUser;
pub use availability::availability_routes;
pub use error::{ApiError, ErrorResponse};
pub use payments::payment_routes;
pub use state::ApiState;
