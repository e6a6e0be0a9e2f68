//! In-memory adapters.
//!
//! Full-fidelity implementations of every port over process memory, used by
//! handler unit tests, the integration suite, and local development without
//! external services. The repositories enforce the same uniqueness rules as
//! their PostgreSQL counterparts so race-closing behavior is testable.

mod collaborators;
mod repositories;

pub use collaborators::{
    InMemoryFileStorage, MockPaymentGateway, RecordingEmailSender, StaticUserDirectory,
};
pub use repositories::{
    InMemoryAppointmentRepository, InMemoryAvailabilityRepository, InMemoryPaymentRepository,
};
