//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::appointment::{
    AttachFileHandler, AuthorizeSessionHandler, BookAppointmentHandler, CancelAppointmentHandler,
    CompleteAppointmentHandler, ConfirmAppointmentHandler, ListAppointmentsHandler,
    ListClientRecordsHandler, RejectAppointmentHandler, UpdateNotesHandler,
};
use crate::application::handlers::availability::{GetAvailabilityHandler, UpdateAvailabilityHandler};
use crate::application::handlers::payment::{CreateOrderHandler, VerifyPaymentHandler};
use crate::application::notifications::NotificationDispatcher;
use crate::domain::payment::PaymentSignatureVerifier;
use crate::ports::{
    AppointmentRepository, AvailabilityRepository, FileStorage, PaymentGateway, PaymentRepository,
    UserDirectory,
};

/// Shared application state containing all port implementations.
///
/// Cloned per request; every dependency is Arc-wrapped. Handlers are built
/// on demand from the shared ports.
#[derive(Clone)]
pub struct ApiState {
    pub appointments: Arc<dyn AppointmentRepository>,
    pub availability: Arc<dyn AvailabilityRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub directory: Arc<dyn UserDirectory>,
    pub storage: Arc<dyn FileStorage>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub verifier: Arc<PaymentSignatureVerifier>,
    pub currency: String,
}

impl ApiState {
    pub fn book_appointment_handler(&self) -> BookAppointmentHandler {
        BookAppointmentHandler::new(
            self.appointments.clone(),
            self.availability.clone(),
            self.directory.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn confirm_appointment_handler(&self) -> ConfirmAppointmentHandler {
        ConfirmAppointmentHandler::new(
            self.appointments.clone(),
            self.directory.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn reject_appointment_handler(&self) -> RejectAppointmentHandler {
        RejectAppointmentHandler::new(
            self.appointments.clone(),
            self.directory.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn cancel_appointment_handler(&self) -> CancelAppointmentHandler {
        CancelAppointmentHandler::new(self.appointments.clone())
    }

    pub fn complete_appointment_handler(&self) -> CompleteAppointmentHandler {
        CompleteAppointmentHandler::new(self.appointments.clone())
    }

    pub fn update_notes_handler(&self) -> UpdateNotesHandler {
        UpdateNotesHandler::new(self.appointments.clone())
    }

    pub fn attach_file_handler(&self) -> AttachFileHandler {
        AttachFileHandler::new(self.appointments.clone(), self.storage.clone())
    }

    pub fn list_appointments_handler(&self) -> ListAppointmentsHandler {
        ListAppointmentsHandler::new(self.appointments.clone())
    }

    pub fn list_client_records_handler(&self) -> ListClientRecordsHandler {
        ListClientRecordsHandler::new(self.appointments.clone())
    }

    pub fn authorize_session_handler(&self) -> AuthorizeSessionHandler {
        AuthorizeSessionHandler::new(self.appointments.clone())
    }

    pub fn get_availability_handler(&self) -> GetAvailabilityHandler {
        GetAvailabilityHandler::new(self.availability.clone())
    }

    pub fn update_availability_handler(&self) -> UpdateAvailabilityHandler {
        UpdateAvailabilityHandler::new(self.availability.clone())
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.appointments.clone(),
            self.payments.clone(),
            self.gateway.clone(),
            self.currency.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.payments.clone(),
            self.appointments.clone(),
            self.verifier.clone(),
            self.directory.clone(),
            self.dispatcher.clone(),
        )
    }
}
