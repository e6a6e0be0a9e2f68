//! Outbound email port.
//!
//! The core treats email as fire-and-forget: the dispatcher logs failures
//! and never propagates them into the transition that triggered the send.

use async_trait::async_trait;
use thiserror::Error;

/// An email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Errors from the email collaborator.
#[derive(Debug, Clone, Error)]
pub enum EmailError {
    /// The provider rejected the message.
    #[error("Email rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("Email service unreachable: {0}")]
    Unreachable(String),
}

/// Port for outbound email delivery.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_sender_is_object_safe() {
        fn _accepts_dyn(_sender: &dyn EmailSender) {}
    }

    #[test]
    fn email_error_displays_reason() {
        let err = EmailError::Unreachable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "Email service unreachable: connection refused"
        );
    }
}
