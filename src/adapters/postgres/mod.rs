//! PostgreSQL persistence adapters.

mod appointment_repository;
mod availability_repository;
mod payment_repository;
mod user_directory;

pub use appointment_repository::PostgresAppointmentRepository;
pub use availability_repository::PostgresAvailabilityRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use user_directory::PostgresUserDirectory;
