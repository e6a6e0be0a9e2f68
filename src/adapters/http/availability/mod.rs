//! HTTP adapter for availability endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::availability_routes;
