use async_trait::async_trait;
use serde_json::json;

use super::{ConfirmationMailer, VisitConfirmation};
use crate::config::EmailJsConfig;
use crate::models::NotificationResult;

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Confirmation mailer backed by the EmailJS REST API. With no credentials
/// configured it degrades to a silent no-op.
pub struct EmailJsSender {
    config: EmailJsConfig,
    endpoint: String,
    client: reqwest::Client,
}

impl EmailJsSender {
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            config,
            endpoint: EMAILJS_SEND_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl ConfirmationMailer for EmailJsSender {
    async fn send(&self, confirmation: &VisitConfirmation) -> NotificationResult {
        if !self.config.is_configured() {
            tracing::debug!("EmailJS credentials not set, skipping confirmation email");
            return NotificationResult::skipped();
        }

        let to_email = confirmation.to_email.trim();
        if to_email.is_empty() {
            return NotificationResult::failed("recipient address is empty");
        }

        let mut params = confirmation.clone();
        params.to_email = to_email.to_string();

        let body = json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "user_id": self.config.public_key,
            "template_params": params,
        });

        match self.client.post(&self.endpoint).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(booking_id = %confirmation.booking_id, "confirmation email sent");
                NotificationResult::delivered()
            }
            Ok(response) => {
                let status = response.status();
                let detail = response.text().await.unwrap_or_default();
                tracing::warn!(%status, detail = %detail, "EmailJS rejected the confirmation email");
                NotificationResult::failed(format!("EmailJS returned {status}: {detail}"))
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to reach EmailJS");
                NotificationResult::failed(err.to_string())
            }
        }
    }
}
