//! TTS (Text-to-Speech) client.

use super::request::build_request;
use super::response::decode_audio;
use super::stream::decode_audio_stream;
use super::types::{AudioEncoding, AudioOutput, SynthesisRequest, TtsOptions, TtsSettings};
use crate::config::{resolve_api_key, DEFAULT_API_BASE_URL};
use crate::transport::{HttpTransport, DEFAULT_TIMEOUT_SECS};
use crate::{BoxStream, Result};
use bytes::Bytes;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const SYNTHESIZE_PATH: &str = "tts/v1/voice";
pub const SYNTHESIZE_STREAM_PATH: &str = "tts/v1/voice:stream";

const LOG_PREVIEW_CHARS: usize = 50;

/// Shorten a message for log output.
fn preview(text: &str) -> String {
    if text.chars().count() > LOG_PREVIEW_CHARS {
        let head: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Audio arriving chunk by chunk from the streaming endpoint.
pub struct AudioStream {
    pub content_type: &'static str,
    pub encoding: AudioEncoding,
    pub chunks: BoxStream<'static, Bytes>,
}

/// Client for text-to-speech synthesis.
pub struct TtsClient {
    transport: Arc<HttpTransport>,
    settings: TtsSettings,
}

impl TtsClient {
    pub fn builder() -> TtsClientBuilder {
        TtsClientBuilder::new()
    }

    pub fn new(transport: Arc<HttpTransport>, settings: TtsSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &TtsSettings {
        &self.settings
    }

    fn prepare(&self, text: &str, options: &TtsOptions) -> Result<(SynthesisRequest, String)> {
        let request = build_request(text, &self.settings, options)?;
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(
            request_id = %request_id,
            message = %preview(text),
            text_chars = text.chars().count(),
            voice = %request.voice_id,
            model = %request.model_id,
            encoding = %request.audio_config.audio_encoding,
            sample_rate_hertz = request.audio_config.sample_rate_hertz,
            temperature = request.temperature,
            "Prepared synthesis request"
        );
        Ok((request, request_id))
    }

    /// One request, one complete audio payload.
    pub async fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<AudioOutput> {
        let (request, request_id) = self.prepare(text, options)?;
        let encoding = request.audio_config.audio_encoding;
        let started = Instant::now();

        let raw = self
            .transport
            .post_json(SYNTHESIZE_PATH, &request, &request_id)
            .await
            .map_err(|e| {
                tracing::error!(request_id = %request_id, error = %e, "Request error to Inworld API");
                e
            })?;

        match decode_audio(raw.status, raw.retry_after_secs, &raw.body, encoding) {
            Ok(output) => {
                tracing::debug!(
                    request_id = %request_id,
                    audio_size_bytes = output.data.len(),
                    content_type = output.content_type,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "Received TTS audio"
                );
                Ok(output)
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    status = raw.status,
                    error = %e,
                    "Inworld API synthesis failed"
                );
                Err(e)
            }
        }
    }

    /// Same request against the streaming endpoint; audio is yielded as it arrives.
    pub async fn synthesize_stream(&self, text: &str, options: &TtsOptions) -> Result<AudioStream> {
        let (request, request_id) = self.prepare(text, options)?;
        let encoding = request.audio_config.audio_encoding;
        let body = self
            .transport
            .post_stream(SYNTHESIZE_STREAM_PATH, &request, &request_id)
            .await?;
        tracing::debug!(request_id = %request_id, "Streaming TTS audio");
        Ok(AudioStream {
            content_type: encoding.content_type(),
            encoding,
            chunks: decode_audio_stream(body),
        })
    }
}

pub struct TtsClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    settings: Option<TtsSettings>,
    timeout_secs: u64,
}

impl TtsClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            settings: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn settings(mut self, settings: TtsSettings) -> Self {
        self.settings = Some(settings);
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    pub fn build(self) -> Result<TtsClient> {
        let settings = self.settings.ok_or_else(|| {
            crate::Error::configuration("Synthesis settings (at least a voice) must be specified")
        })?;
        super::request::validate_settings(&settings)?;
        let api_key = resolve_api_key(self.api_key.as_deref())?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let transport = HttpTransport::new(
            &base_url,
            api_key,
            Duration::from_secs(self.timeout_secs),
        )?;
        Ok(TtsClient::new(Arc::new(transport), settings))
    }
}

impl Default for TtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
