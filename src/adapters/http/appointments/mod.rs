//! HTTP adapter for appointment endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::appointment_routes;
