//! Foundation types shared across the domain.
//!
//! Identifier newtypes, error types, the state machine trait, timestamps,
//! and caller identity. No business rules live here.

mod errors;
mod identity;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use identity::{Identity, Role};
pub use ids::{AppointmentId, AvailabilityId, PaymentRecordId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
