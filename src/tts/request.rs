//! Message + settings -> vendor request payload.
//!
//! Every check here runs before the transport is touched. Out-of-range values
//! are rejected, never clamped. Message text is forwarded byte-for-byte, so
//! bracketed delivery markup such as `[happy]` or `[sigh]` reaches the vendor
//! untouched.

use super::types::{
    AudioConfig, AudioEncoding, ModelId, SynthesisRequest, TtsOptions, TtsSettings,
    MAX_SAMPLE_RATE_HERTZ, MAX_TEMPERATURE, MIN_SAMPLE_RATE_HERTZ, MIN_TEMPERATURE,
};
use crate::{Error, ErrorContext, Result};

pub fn validate_temperature(temperature: f32) -> Result<f32> {
    if !temperature.is_finite() || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(Error::configuration_with_context(
            format!("Temperature {} is out of range", temperature),
            ErrorContext::new()
                .with_field_path("temperature")
                .with_details(format!("expected {:.1}..={:.1}", MIN_TEMPERATURE, MAX_TEMPERATURE))
                .with_source("request_transform"),
        ));
    }
    Ok(temperature)
}

pub fn validate_sample_rate(sample_rate_hertz: u32) -> Result<u32> {
    if !(MIN_SAMPLE_RATE_HERTZ..=MAX_SAMPLE_RATE_HERTZ).contains(&sample_rate_hertz) {
        return Err(Error::configuration_with_context(
            format!("Sample rate {} Hz is out of range", sample_rate_hertz),
            ErrorContext::new()
                .with_field_path("sample_rate_hertz")
                .with_details(format!(
                    "expected {}..={} Hz",
                    MIN_SAMPLE_RATE_HERTZ, MAX_SAMPLE_RATE_HERTZ
                ))
                .with_source("request_transform"),
        ));
    }
    Ok(sample_rate_hertz)
}

fn validate_voice(voice_id: &str) -> Result<()> {
    if voice_id.trim().is_empty() {
        return Err(Error::configuration_with_context(
            "No voice configured",
            ErrorContext::new()
                .with_field_path("voice_id")
                .with_source("request_transform"),
        ));
    }
    Ok(())
}

/// Re-check settings that may have been built by hand rather than loaded from config.
pub fn validate_settings(settings: &TtsSettings) -> Result<()> {
    validate_voice(&settings.voice_id)?;
    validate_temperature(settings.temperature)?;
    validate_sample_rate(settings.sample_rate_hertz)?;
    Ok(())
}

/// Build the payload for one synthesis call.
pub fn build_request(
    message: &str,
    settings: &TtsSettings,
    options: &TtsOptions,
) -> Result<SynthesisRequest> {
    if message.trim().is_empty() {
        return Err(Error::validation_with_context(
            "Message is empty",
            ErrorContext::new()
                .with_field_path("message")
                .with_source("request_transform"),
        ));
    }

    let voice_id = options
        .voice
        .clone()
        .unwrap_or_else(|| settings.voice_id.clone());
    validate_voice(&voice_id)?;

    let audio_encoding = match options.audio_encoding.as_deref() {
        Some(name) => name.parse::<AudioEncoding>()?,
        None => settings.audio_encoding,
    };
    let model_id = match options.model_id.as_deref() {
        Some(name) => name.parse::<ModelId>()?,
        None => settings.model_id,
    };
    let temperature = validate_temperature(options.temperature.unwrap_or(settings.temperature))?;
    let sample_rate_hertz =
        validate_sample_rate(options.sample_rate_hertz.unwrap_or(settings.sample_rate_hertz))?;

    Ok(SynthesisRequest {
        text: message.to_string(),
        voice_id,
        model_id,
        temperature,
        audio_config: AudioConfig {
            audio_encoding,
            sample_rate_hertz,
        },
        timestamp_type: settings.timestamp_type,
    })
}
