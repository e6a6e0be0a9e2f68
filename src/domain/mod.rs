//! Domain layer: aggregates, value objects, and pure services.

pub mod appointment;
pub mod availability;
pub mod foundation;
pub mod payment;
pub mod scheduling;
