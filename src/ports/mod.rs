//! Ports: async trait contracts for every external collaborator.

mod appointment_repository;
mod availability_repository;
mod email_sender;
mod file_storage;
mod payment_gateway;
mod payment_repository;
mod user_directory;

pub use appointment_repository::AppointmentRepository;
pub use availability_repository::AvailabilityRepository;
pub use email_sender::{EmailError, EmailMessage, EmailSender};
pub use file_storage::{FileStorage, StoredFile};
pub use payment_gateway::{CreateOrderRequest, GatewayError, GatewayOrder, PaymentGateway};
pub use payment_repository::PaymentRepository;
pub use user_directory::{CounselorProfile, UserContact, UserDirectory};
