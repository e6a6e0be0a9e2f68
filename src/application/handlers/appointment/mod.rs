//! Appointment handlers.
//!
//! ## Commands
//! - Book a new appointment (client)
//! - Confirm, reject, complete, cancel (lifecycle transitions)
//! - Replace counselor notes
//! - Append an attachment
//!
//! ## Queries
//! - List the caller's appointments
//! - List a counselor's records for one client
//! - Authorize a session join (consulted by the realtime relay)

mod attach_file;
mod authorize_session;
mod book_appointment;
mod cancel_appointment;
mod complete_appointment;
mod confirm_appointment;
mod list_appointments;
mod list_client_records;
mod reject_appointment;
mod update_notes;

// Commands
pub use attach_file::{AttachFileCommand, AttachFileHandler, AttachFileResult};
pub use book_appointment::{BookAppointmentCommand, BookAppointmentHandler, BookAppointmentResult};
pub use cancel_appointment::{
    CancelAppointmentCommand, CancelAppointmentHandler, CancelAppointmentResult,
};
pub use complete_appointment::{
    CompleteAppointmentCommand, CompleteAppointmentHandler, CompleteAppointmentResult,
};
pub use confirm_appointment::{
    ConfirmAppointmentCommand, ConfirmAppointmentHandler, ConfirmAppointmentResult,
};
pub use reject_appointment::{
    RejectAppointmentCommand, RejectAppointmentHandler, RejectAppointmentResult,
};
pub use update_notes::{UpdateNotesCommand, UpdateNotesHandler, UpdateNotesResult};

// Queries
pub use authorize_session::{
    AuthorizeSessionHandler, AuthorizeSessionQuery, AuthorizeSessionResult,
};
pub use list_appointments::{ListAppointmentsHandler, ListAppointmentsQuery, ListAppointmentsResult};
pub use list_client_records::{
    ListClientRecordsHandler, ListClientRecordsQuery, ListClientRecordsResult,
};
