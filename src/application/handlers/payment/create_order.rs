//! CreateOrderHandler - Command handler for opening a gateway order.

use std::sync::Arc;

use crate::domain::appointment::{BookingError, PaymentStatus};
use crate::domain::foundation::{AppointmentId, Identity};
use crate::domain::payment::PaymentRecord;
use crate::ports::{
    AppointmentRepository, CreateOrderRequest, GatewayOrder, PaymentGateway, PaymentRepository,
};

/// Command to open a payment order for an appointment.
///
/// The charge is never taken from the request; it is read from the
/// appointment's stored amount so a tampered client cannot pay less.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub identity: Identity,
    pub appointment_id: AppointmentId,
}

/// Result of a successful order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order: GatewayOrder,
    pub record: PaymentRecord,
}

/// Handler for order creation. Opens the order with the gateway, then
/// persists a pending ledger record keyed by the gateway's order id.
pub struct CreateOrderHandler {
    appointments: Arc<dyn AppointmentRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl CreateOrderHandler {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            appointments,
            payments,
            gateway,
            currency: currency.into(),
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, BookingError> {
        let appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(cmd.appointment_id))?;

        if !appointment.is_booked_by_client(&cmd.identity.user_id) {
            return Err(BookingError::forbidden(
                "Only the booking client can pay for this appointment",
            ));
        }
        if appointment.payment_status == PaymentStatus::Completed {
            return Err(BookingError::validation(
                "appointment",
                "already paid",
            ));
        }

        let order = self
            .gateway
            .create_order(CreateOrderRequest {
                amount_minor: appointment.amount_minor,
                currency: self.currency.clone(),
                receipt: format!("receipt_{}", appointment.id),
            })
            .await
            .map_err(|err| BookingError::gateway_failed(err.to_string()))?;

        let record = PaymentRecord::create(
            appointment.id,
            appointment.client_id.clone(),
            appointment.counselor_id.clone(),
            appointment.amount_minor,
            self.currency.clone(),
            order.order_id.clone(),
        );
        self.payments.insert(&record).await?;

        Ok(CreateOrderResult { order, record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        monday, time, MockAppointmentRepository, MockPaymentGateway, MockPaymentRepository,
    };
    use crate::domain::appointment::{Appointment, ServiceType, SessionType};
    use crate::domain::foundation::UserId;
    use crate::domain::payment::PaymentRecordStatus;

    fn appointment() -> Appointment {
        Appointment::book(
            UserId::new("client-1").unwrap(),
            UserId::new("counselor-1").unwrap(),
            ServiceType::MentalHealth,
            monday(),
            time("10:00"),
            SessionType::Video,
            150_000,
            None,
        )
    }

    fn handler_with(
        appointments: Arc<MockAppointmentRepository>,
        payments: Arc<MockPaymentRepository>,
        gateway: Arc<MockPaymentGateway>,
    ) -> CreateOrderHandler {
        CreateOrderHandler::new(appointments, payments, gateway, "INR")
    }

    #[tokio::test]
    async fn opens_order_for_the_stored_amount() {
        let existing = appointment();
        let id = existing.id;
        let appointments = Arc::new(MockAppointmentRepository::with_appointment(existing));
        let payments = Arc::new(MockPaymentRepository::new());
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = handler_with(appointments, payments.clone(), gateway.clone());

        let result = handler
            .handle(CreateOrderCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: id,
            })
            .await
            .unwrap();

        assert_eq!(result.order.amount_minor, 150_000);
        assert_eq!(result.record.status, PaymentRecordStatus::Pending);
        assert_eq!(result.record.order_id, result.order.order_id);
        assert_eq!(payments.stored().len(), 1);

        let requests = gateway.orders.lock().unwrap();
        assert_eq!(requests[0].amount_minor, 150_000);
        assert_eq!(requests[0].receipt, format!("receipt_{}", id));
    }

    #[tokio::test]
    async fn only_the_booking_client_can_pay() {
        let existing = appointment();
        let id = existing.id;
        let appointments = Arc::new(MockAppointmentRepository::with_appointment(existing));
        let payments = Arc::new(MockPaymentRepository::new());
        let handler = handler_with(
            appointments,
            payments.clone(),
            Arc::new(MockPaymentGateway::new()),
        );

        for identity in [
            Identity::client(UserId::new("client-2").unwrap()),
            Identity::counselor(UserId::new("counselor-1").unwrap()),
        ] {
            let result = handler
                .handle(CreateOrderCommand {
                    identity,
                    appointment_id: id,
                })
                .await;
            assert!(matches!(result, Err(BookingError::Forbidden { .. })));
        }
        assert!(payments.stored().is_empty());
    }

    #[tokio::test]
    async fn rejects_an_already_paid_appointment() {
        let mut existing = appointment();
        existing.record_payment_completed();
        let id = existing.id;
        let appointments = Arc::new(MockAppointmentRepository::with_appointment(existing));
        let handler = handler_with(
            appointments,
            Arc::new(MockPaymentRepository::new()),
            Arc::new(MockPaymentGateway::new()),
        );

        let result = handler
            .handle(CreateOrderCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: id,
            })
            .await;

        assert!(matches!(result, Err(BookingError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn surfaces_gateway_outage() {
        let existing = appointment();
        let id = existing.id;
        let appointments = Arc::new(MockAppointmentRepository::with_appointment(existing));
        let payments = Arc::new(MockPaymentRepository::new());
        let handler = handler_with(
            appointments,
            payments.clone(),
            Arc::new(MockPaymentGateway::failing()),
        );

        let result = handler
            .handle(CreateOrderCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: id,
            })
            .await;

        assert!(matches!(result, Err(BookingError::GatewayFailed { .. })));
        assert!(payments.stored().is_empty());
    }

    #[tokio::test]
    async fn unknown_appointment_is_not_found() {
        let handler = handler_with(
            Arc::new(MockAppointmentRepository::new()),
            Arc::new(MockPaymentRepository::new()),
            Arc::new(MockPaymentGateway::new()),
        );

        let result = handler
            .handle(CreateOrderCommand {
                identity: Identity::client(UserId::new("client-1").unwrap()),
                appointment_id: AppointmentId::new(),
            })
            .await;

        assert!(matches!(result, Err(BookingError::AppointmentNotFound(_))));
    }
}
