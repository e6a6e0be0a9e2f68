//! HTTP adapter for payment endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
