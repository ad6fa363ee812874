//! Voice listing client.

use super::types::{Voice, VoiceCatalog, VoiceListResponse};
use crate::transport::{error_for_status, HttpTransport};
use crate::{Error, Result};
use std::sync::Arc;
use uuid::Uuid;

pub const VOICES_PATH: &str = "tts/v1/voices";

pub struct VoiceClient {
    transport: Arc<HttpTransport>,
}

impl VoiceClient {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn list_voices(&self) -> Result<Vec<Voice>> {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(
            request_id = %request_id,
            url = %self.transport.base_url(),
            "Fetching voices from Inworld API"
        );

        let raw = self.transport.get(VOICES_PATH, &request_id).await?;
        if !raw.is_success() {
            return Err(error_for_status(raw.status, &raw.body, raw.retry_after_secs));
        }
        let parsed: VoiceListResponse = serde_json::from_slice(&raw.body).map_err(|e| Error::Remote {
            status: raw.status,
            class: "invalid_response".to_string(),
            message: format!("voice list is not valid JSON: {}", e),
        })?;

        tracing::debug!(
            request_id = %request_id,
            voices = parsed.voices.len(),
            "Received voices from API"
        );
        Ok(parsed.voices)
    }

    pub async fn catalog(&self) -> Result<VoiceCatalog> {
        let voices = self.list_voices().await?;
        let catalog = VoiceCatalog::from_voices(&voices);
        tracing::debug!(
            languages = ?catalog.languages(),
            "Organized voices by language"
        );
        Ok(catalog)
    }
}
