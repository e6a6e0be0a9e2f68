//! VerifyPaymentHandler - Command handler for payment callback
//! reconciliation.

use std::sync::Arc;

use crate::application::handlers::notify;
use crate::application::notifications::NotificationDispatcher;
use crate::domain::appointment::{BookingError, NotificationKind, PaymentStatus};
use crate::domain::payment::{PaymentRecord, PaymentSignatureVerifier};
use crate::ports::{AppointmentRepository, PaymentRepository, UserDirectory};

/// Command carrying a gateway payment callback.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Result of a verified callback.
#[derive(Debug, Clone)]
pub struct VerifyPaymentResult {
    pub record: PaymentRecord,

    /// False when this callback was a replay of an already-settled payment.
    pub newly_settled: bool,
}

/// Handler for payment verification.
///
/// The signature check is the authorization: anyone presenting a digest the
/// gateway's secret produced is the gateway. A failed check changes nothing.
/// The whole operation is idempotent: a replayed success re-checks the
/// appointment and only acts when an earlier attempt left it unreconciled,
/// so a retry heals a crash between the ledger update and the appointment
/// update.
pub struct VerifyPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    verifier: Arc<PaymentSignatureVerifier>,
    directory: Arc<dyn UserDirectory>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl VerifyPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        verifier: Arc<PaymentSignatureVerifier>,
        directory: Arc<dyn UserDirectory>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            payments,
            appointments,
            verifier,
            directory,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, BookingError> {
        let mut record = self
            .payments
            .find_by_order_id(&cmd.order_id)
            .await?
            .ok_or_else(|| BookingError::payment_not_found(cmd.order_id.clone()))?;

        if !self
            .verifier
            .verify(&cmd.order_id, &cmd.payment_id, &cmd.signature)
        {
            return Err(BookingError::InvalidPaymentSignature);
        }

        let newly_settled = record.mark_succeeded(cmd.payment_id, cmd.signature)?;
        if newly_settled {
            self.payments.update(&record).await?;
        }

        // A replay is not a shortcut past reconciliation: if an earlier call
        // settled the ledger but died before the appointment was persisted,
        // the retry picks up here and finishes the job.
        let mut appointment = self
            .appointments
            .find_by_id(&record.appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(record.appointment_id))?;

        if appointment.payment_status == PaymentStatus::Completed {
            return Ok(VerifyPaymentResult {
                record,
                newly_settled,
            });
        }

        appointment.record_payment_completed();
        let newly_latched = appointment.mark_notification_sent(NotificationKind::Confirmed);
        self.appointments.update(&appointment).await?;

        if newly_latched {
            notify(
                self.directory.as_ref(),
                &self.dispatcher,
                &appointment,
                NotificationKind::Confirmed,
            )
            .await;
        }

        Ok(VerifyPaymentResult {
            record,
            newly_settled,
        })
    }
}
