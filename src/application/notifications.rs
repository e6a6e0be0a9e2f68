//! Notification dispatch: thin orchestrator over the email collaborator.
//!
//! The dispatcher never returns an error to its caller; a failed send is
//! logged and dropped. It keeps no record of what was sent — at-most-once
//! delivery is the lifecycle handlers' job via the appointment's
//! notification latches.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::appointment::NotificationKind;
use crate::domain::availability::TimeOfDay;
use crate::ports::{EmailMessage, EmailSender, UserContact};

/// Everything a notification template needs.
#[derive(Debug, Clone)]
pub struct NotificationContext {
    /// Who receives the email.
    pub recipient: UserContact,
    pub client_name: String,
    pub counselor_name: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
}

/// Fire-and-forget email dispatch per notification kind.
pub struct NotificationDispatcher {
    email: Arc<dyn EmailSender>,
}

impl NotificationDispatcher {
    pub fn new(email: Arc<dyn EmailSender>) -> Self {
        Self { email }
    }

    /// Dispatches one notification. Failures are logged, never surfaced:
    /// the status transition that triggered this is already authoritative.
    pub async fn dispatch(&self, kind: NotificationKind, context: &NotificationContext) {
        let message = build_message(kind, context);
        match self.email.send(&message).await {
            Ok(()) => {
                debug!(kind = %kind, recipient = %message.to, "notification sent");
            }
            Err(err) => {
                warn!(
                    kind = %kind,
                    recipient = %message.to,
                    error = %err,
                    "notification dispatch failed"
                );
            }
        }
    }
}

fn build_message(kind: NotificationKind, ctx: &NotificationContext) -> EmailMessage {
    let (subject, body) = match kind {
        NotificationKind::BookingCreated => (
            "New appointment booking on CounselHub".to_string(),
            format!(
                "Hello {},\n\n\
                 You have received a new appointment booking.\n\n\
                 Client: {}\n\
                 Date: {}\n\
                 Time: {}\n\n\
                 Please accept or reject this appointment in your dashboard.",
                ctx.counselor_name, ctx.client_name, ctx.date, ctx.time
            ),
        ),
        NotificationKind::Confirmed => (
            "Your appointment is confirmed on CounselHub".to_string(),
            format!(
                "Hello {},\n\n\
                 Your appointment with {} has been confirmed.\n\n\
                 Date: {}\n\
                 Time: {}\n\n\
                 We look forward to seeing you.",
                ctx.client_name, ctx.counselor_name, ctx.date, ctx.time
            ),
        ),
        NotificationKind::Rejected => (
            "Update on your CounselHub appointment".to_string(),
            format!(
                "Hello {},\n\n\
                 Unfortunately {} is unable to take your appointment.\n\
                 Please book another time or browse other counselors.",
                ctx.client_name, ctx.counselor_name
            ),
        ),
        NotificationKind::Reminder => (
            "Reminder: upcoming CounselHub session".to_string(),
            format!(
                "Hello {},\n\n\
                 This is a reminder of your session with {}.\n\n\
                 Date: {}\n\
                 Time: {}",
                ctx.client_name, ctx.counselor_name, ctx.date, ctx.time
            ),
        ),
    };

    EmailMessage {
        to: ctx.recipient.email.clone(),
        to_name: Some(ctx.recipient.name.clone()),
        subject,
        body,
    }
}
