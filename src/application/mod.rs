//! Application layer: command/query handlers and notification orchestration.

pub mod handlers;
pub mod notifications;
