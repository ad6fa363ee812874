//! Vendor response -> audio the host can play.

use super::types::{AudioEncoding, AudioOutput};
use crate::transport::error_for_status;
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisResponse {
    audio_content: Option<String>,
}

/// Decode one base64 audio payload.
pub(crate) fn decode_base64_audio(encoded: &str) -> Result<Bytes> {
    STANDARD
        .decode(encoded.trim())
        .map(Bytes::from)
        .map_err(|e| invalid_response(format!("audioContent is not valid base64: {}", e)))
}

pub(crate) fn invalid_response(message: impl Into<String>) -> Error {
    Error::Remote {
        status: 200,
        class: "invalid_response".to_string(),
        message: message.into(),
    }
}

/// Map a finished synthesis response to [`AudioOutput`].
///
/// A success status with missing, undecodable or empty audio is a failure, so a
/// caller never receives partial audio.
pub fn decode_audio(
    status: u16,
    retry_after_secs: Option<u64>,
    body: &[u8],
    encoding: AudioEncoding,
) -> Result<AudioOutput> {
    if !(200..300).contains(&status) {
        return Err(error_for_status(status, body, retry_after_secs));
    }

    let parsed: SynthesisResponse = serde_json::from_slice(body)
        .map_err(|e| invalid_response(format!("synthesis response is not JSON: {}", e)))?;
    let encoded = parsed
        .audio_content
        .ok_or_else(|| invalid_response("synthesis response has no audioContent"))?;
    let data = decode_base64_audio(&encoded)?;
    if data.is_empty() {
        return Err(invalid_response("synthesis response carried no audio"));
    }

    Ok(AudioOutput {
        data,
        content_type: encoding.content_type(),
        encoding,
    })
}
