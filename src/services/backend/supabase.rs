use async_trait::async_trait;
use serde_json::json;

use super::{BackendError, BookingBackend};
use crate::config::SupabaseConfig;
use crate::models::VisitBookingRequest;

/// Booking store backed by a Supabase `create_visit_booking` RPC, reached
/// through the PostgREST endpoint with the project's anon key.
pub struct SupabaseRpcBackend {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseRpcBackend {
    pub fn new(config: SupabaseConfig) -> Self {
        Self { config, client: reqwest::Client::new() }
    }

    fn rpc_url(&self) -> String {
        format!(
            "{}/rest/v1/rpc/create_visit_booking",
            self.config.url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl BookingBackend for SupabaseRpcBackend {
    async fn create_visit_booking(
        &self,
        request: &VisitBookingRequest,
    ) -> Result<String, BackendError> {
        if !self.config.is_configured() {
            return Err(BackendError::NotConfigured(
                "The booking backend is not configured. Set SUPABASE_URL and \
                 SUPABASE_ANON_KEY and restart the service."
                    .to_string(),
            ));
        }

        let body = json!({
            "p_project_name": request.project_name,
            "p_first_name": request.first_name,
            "p_last_name": request.last_name,
            "p_document_type": request.document_type.as_str(),
            "p_document_number": request.document_number,
            "p_phone_primary": request.phone_primary,
            "p_phone_alt": request.phone_alt,
            "p_email": request.email,
            "p_slot_at": request.slot.wire_format(),
        });

        tracing::debug!(slot = %request.slot.wire_format(), "submitting visit booking");

        let response = self
            .client
            .post(self.rpc_url())
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "booking RPC rejected the request");
            return Err(BackendError::Rpc(rpc_error_message(&text)));
        }

        // The procedure returns the booking UUID as a bare JSON string. Any
        // other shape maps to an empty id, which the caller rejects.
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(serde_json::Value::String(id)) => Ok(id),
            _ => Ok(String::new()),
        }
    }
}

/// PostgREST error bodies carry the RAISE text in a `message` field; fall
/// back to the raw body when the shape differs.
fn rpc_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
