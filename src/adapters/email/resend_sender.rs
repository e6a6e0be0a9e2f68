//! Resend email adapter.
//!
//! Implements the `EmailSender` port against the Resend HTTP API. The API
//! key is held as `secrecy::SecretString`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{EmailError, EmailMessage, EmailSender};

/// Resend API configuration.
#[derive(Clone)]
pub struct ResendConfig {
    /// API key (re_...).
    api_key: SecretString,

    /// Value for the "from" field, e.g. `CounselHub <noreply@counselhub.com>`.
    from: String,

    /// Base URL for the Resend API.
    api_base_url: String,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from: from.into(),
            api_base_url: "https://api.resend.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Resend implementation of the EmailSender port.
pub struct ResendEmailSender {
    config: ResendConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    from: &'a str,
    to: Vec<String>,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

impl ResendEmailSender {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let url = format!("{}/emails", self.config.api_base_url);
        let to = match &message.to_name {
            Some(name) => format!("{} <{}>", name, message.to),
            None => message.to.clone(),
        };
        let payload = SendPayload {
            from: &self.config.from,
            to: vec![to],
            subject: &message.subject,
            text: &message.body,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmailError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            let reason = match response.json::<ApiErrorResponse>().await {
                Ok(error) => error.message,
                Err(e) => format!("Unparseable error response: {}", e),
            };
            return Err(EmailError::Rejected(reason));
        }

        Ok(())
    }
}
