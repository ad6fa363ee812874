//! TTS (Text-to-Speech) types.

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SAMPLE_RATE_HERTZ: u32 = 48_000;
pub const MIN_SAMPLE_RATE_HERTZ: u32 = 8_000;
pub const MAX_SAMPLE_RATE_HERTZ: u32 = 48_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;
pub const DEFAULT_LANGUAGE: &str = "en";

/// Audio encodings accepted by the synthesis endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AudioEncoding {
    Linear16,
    #[default]
    Mp3,
    OggOpus,
    Alaw,
    Mulaw,
}

impl AudioEncoding {
    pub const ALL: [AudioEncoding; 5] = [
        Self::Linear16,
        Self::Mp3,
        Self::OggOpus,
        Self::Alaw,
        Self::Mulaw,
    ];

    /// Wire name sent in `audioConfig.audioEncoding`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear16 => "LINEAR16",
            Self::Mp3 => "MP3",
            Self::OggOpus => "OGG_OPUS",
            Self::Alaw => "ALAW",
            Self::Mulaw => "MULAW",
        }
    }

    /// Media type of the audio the vendor returns for this encoding.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::OggOpus => "audio/opus",
            // LINEAR16 comes back with a WAV header; the companded formats are WAV-wrapped too.
            Self::Linear16 | Self::Alaw | Self::Mulaw => "audio/wav",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Linear16 => "Uncompressed 16-bit signed little-endian samples (Linear PCM) with a WAV header.",
            Self::Mp3 => "MP3 audio.",
            Self::OggOpus => "Opus encoded audio wrapped in an ogg container.",
            Self::Alaw => "ALAW encoded audio. 8-bit companded PCM.",
            Self::Mulaw => "MULAW encoded audio. 8-bit companded PCM.",
        }
    }
}

impl FromStr for AudioEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!("Unsupported audio encoding: {}", s),
                    ErrorContext::new()
                        .with_field_path("audio_encoding")
                        .with_details("expected one of LINEAR16, MP3, OGG_OPUS, ALAW, MULAW"),
                )
            })
    }
}

impl TryFrom<String> for AudioEncoding {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AudioEncoding> for &'static str {
    fn from(value: AudioEncoding) -> Self {
        value.as_str()
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthesis models offered by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ModelId {
    #[default]
    InworldTts1,
    InworldTts1Max,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [Self::InworldTts1, Self::InworldTts1Max];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InworldTts1 => "inworld-tts-1",
            Self::InworldTts1Max => "inworld-tts-1-max",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::InworldTts1 => "Inworld TTS (Fast, cost-efficient)",
            Self::InworldTts1Max => "Inworld TTS Max (More expressive, preview)",
        }
    }
}

impl FromStr for ModelId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!("Unsupported model: {}", s),
                    ErrorContext::new()
                        .with_field_path("model_id")
                        .with_details("expected inworld-tts-1 or inworld-tts-1-max"),
                )
            })
    }
}

impl TryFrom<String> for ModelId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ModelId> for &'static str {
    fn from(value: ModelId) -> Self {
        value.as_str()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Word/character alignment requested alongside the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestampType {
    #[default]
    #[serde(rename = "TIMESTAMP_TYPE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "WORD")]
    Word,
    #[serde(rename = "CHARACTER")]
    Character,
}

/// Validated settings every synthesis call starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct TtsSettings {
    pub voice_id: String,
    pub language: String,
    pub audio_encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub temperature: f32,
    pub model_id: ModelId,
    pub timestamp_type: TimestampType,
}

impl TtsSettings {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            audio_encoding: AudioEncoding::default(),
            sample_rate_hertz: DEFAULT_SAMPLE_RATE_HERTZ,
            temperature: DEFAULT_TEMPERATURE,
            model_id: ModelId::default(),
            timestamp_type: TimestampType::default(),
        }
    }
}

/// Per-call overrides. Unset fields fall back to [`TtsSettings`].
#[derive(Debug, Clone, Default)]
pub struct TtsOptions {
    pub voice: Option<String>,
    /// Encoding name as the host passes it, validated case-insensitively.
    pub audio_encoding: Option<String>,
    pub sample_rate_hertz: Option<u32>,
    pub temperature: Option<f32>,
    pub model_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
}

/// Request body for `POST /tts/v1/voice` and `/tts/v1/voice:stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub model_id: ModelId,
    pub temperature: f32,
    pub audio_config: AudioConfig,
    pub timestamp_type: TimestampType,
}

/// Audio output from TTS.
#[derive(Debug, Clone)]
pub struct AudioOutput {
    pub data: Bytes,
    pub content_type: &'static str,
    pub encoding: AudioEncoding,
}
