//! Provider configuration.
//!
//! Settings are fixed once at setup: they come from a YAML file, from
//! `INWORLD_*` environment variables, or from a host that fills
//! [`ProviderConfig`] directly. Validation happens when the config is turned
//! into [`TtsSettings`], so bad values are reported before any network call.

mod credential;

pub use credential::{resolve_api_key, ApiKey, API_KEY_ENV, KEYRING_SERVICE, KEYRING_USER};

use crate::tts::request::{validate_sample_rate, validate_settings, validate_temperature};
use crate::tts::{
    AudioEncoding, ModelId, TimestampType, TtsSettings, DEFAULT_LANGUAGE,
    DEFAULT_SAMPLE_RATE_HERTZ, DEFAULT_TEMPERATURE,
};
use crate::transport::DEFAULT_TIMEOUT_SECS;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "https://api.inworld.ai/";
pub const DEFAULT_ENTRY_ID: &str = "default";

fn default_api_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE_HERTZ
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_entry_id() -> String {
    DEFAULT_ENTRY_ID.to_string()
}

/// Everything a provider instance is configured with.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Optional here; see [`resolve_api_key`] for the fallbacks.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// When unset, setup picks the first voice the catalog lists for `language`.
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub audio_encoding: AudioEncoding,
    #[serde(default)]
    pub model_id: ModelId,
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hertz: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub timestamp_type: TimestampType,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_entry_id")]
    pub entry_id: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            voice_id: None,
            language: default_language(),
            audio_encoding: AudioEncoding::default(),
            model_id: ModelId::default(),
            sample_rate_hertz: default_sample_rate(),
            temperature: default_temperature(),
            timestamp_type: TimestampType::default(),
            timeout_secs: default_timeout_secs(),
            entry_id: default_entry_id(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("voice_id", &self.voice_id)
            .field("language", &self.language)
            .field("audio_encoding", &self.audio_encoding)
            .field("model_id", &self.model_id)
            .field("sample_rate_hertz", &self.sample_rate_hertz)
            .field("temperature", &self.temperature)
            .field("timestamp_type", &self.timestamp_type)
            .field("timeout_secs", &self.timeout_secs)
            .field("entry_id", &self.entry_id)
            .finish()
    }
}

fn parse_env<T: FromStr>(name: &str, field: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map(Some).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid value for {}: {}", name, e),
                ErrorContext::new()
                    .with_field_path(field)
                    .with_source("env"),
            )
        }),
        _ => Ok(None),
    }
}

impl ProviderConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded provider config file");
        Self::from_yaml_str(&content)
    }

    /// Apply `INWORLD_*` environment variables on top of the current values.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(v) = parse_env::<String>("INWORLD_API_URL", "api_url")? {
            self.api_url = v;
        }
        if let Some(v) = parse_env::<String>(API_KEY_ENV, "api_key")? {
            self.api_key = Some(v);
        }
        if let Some(v) = parse_env::<String>("INWORLD_VOICE_ID", "voice_id")? {
            self.voice_id = Some(v);
        }
        if let Some(v) = parse_env::<String>("INWORLD_LANGUAGE", "language")? {
            self.language = v;
        }
        if let Some(v) = parse_env::<AudioEncoding>("INWORLD_AUDIO_ENCODING", "audio_encoding")? {
            self.audio_encoding = v;
        }
        if let Some(v) = parse_env::<ModelId>("INWORLD_MODEL_ID", "model_id")? {
            self.model_id = v;
        }
        if let Some(v) = parse_env::<u32>("INWORLD_SAMPLE_RATE_HERTZ", "sample_rate_hertz")? {
            self.sample_rate_hertz = v;
        }
        if let Some(v) = parse_env::<f32>("INWORLD_TEMPERATURE", "temperature")? {
            self.temperature = v;
        }
        if let Some(v) = parse_env::<u64>("INWORLD_TIMEOUT_SECS", "timeout_secs")? {
            self.timeout_secs = v;
        }
        Ok(self)
    }

    /// Check everything except the voice, which setup may still have to pick.
    pub fn validate_options(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Language is empty",
                ErrorContext::new().with_field_path("language"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "Timeout must be at least one second",
                ErrorContext::new().with_field_path("timeout_secs"),
            ));
        }
        validate_temperature(self.temperature)?;
        validate_sample_rate(self.sample_rate_hertz)?;
        Ok(())
    }

    /// Validated synthesis settings. Requires `voice_id` to be set.
    pub fn settings(&self) -> Result<TtsSettings> {
        self.validate_options()?;
        let settings = TtsSettings {
            voice_id: self.voice_id.clone().unwrap_or_default(),
            language: self.language.clone(),
            audio_encoding: self.audio_encoding,
            sample_rate_hertz: self.sample_rate_hertz,
            temperature: self.temperature,
            model_id: self.model_id,
            timestamp_type: self.timestamp_type,
        };
        validate_settings(&settings)?;
        Ok(settings)
    }
}

/// Serializes tests that mutate `INWORLD_*` process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
