//! The appointment aggregate and its lifecycle.

mod aggregate;
mod errors;
mod notifications;
mod status;

pub use aggregate::{Appointment, Attachment, ServiceType, SessionType};
pub use errors::BookingError;
pub use notifications::{NotificationKind, NotificationLog};
pub use status::{AppointmentStatus, PaymentStatus};
