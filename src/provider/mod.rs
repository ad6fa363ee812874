//! Host-facing speech provider contract.
//!
//! A host registers a [`SpeechProvider`] once and then calls
//! [`SpeechProvider::get_tts_audio`] per utterance. Each call either returns
//! complete audio with its media type or a typed [`crate::Error`]; a failure
//! never affects later calls.

mod inworld;

pub use inworld::{InworldProvider, DOMAIN, TITLE};

use crate::tts::{AudioOutput, TtsOptions};
use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Audio handed back to the host for playback.
#[derive(Debug, Clone, PartialEq)]
pub struct TtsAudio {
    pub content_type: String,
    pub data: Bytes,
}

impl TtsAudio {
    pub fn into_parts(self) -> (String, Bytes) {
        (self.content_type, self.data)
    }
}

impl From<AudioOutput> for TtsAudio {
    fn from(output: AudioOutput) -> Self {
        Self {
            content_type: output.content_type.to_string(),
            data: output.data,
        }
    }
}

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Stable id the host uses to track this provider instance.
    fn unique_id(&self) -> &str;

    fn supported_languages(&self) -> Vec<String>;

    fn default_language(&self) -> &str;

    async fn get_tts_audio(
        &self,
        message: &str,
        language: &str,
        options: Option<&TtsOptions>,
    ) -> Result<TtsAudio>;
}
