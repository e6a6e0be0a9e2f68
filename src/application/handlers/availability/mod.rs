//! Availability handlers.
//!
//! ## Commands
//! - Replace a counselor's weekly template and exceptions
//!
//! ## Queries
//! - Get a counselor's availability record

mod get_availability;
mod update_availability;

pub use get_availability::{GetAvailabilityHandler, GetAvailabilityQuery, GetAvailabilityResult};
pub use update_availability::{
    UpdateAvailabilityCommand, UpdateAvailabilityHandler, UpdateAvailabilityResult,
};
