//! Newline-delimited JSON decoder for `voice:stream` responses.
//!
//! Each line is either `{"result": {"audioContent": "<base64>"}}` or
//! `{"error": {"message": "..."}}`. Audio chunks are yielded in arrival order;
//! an error line ends the stream with a typed error.

use super::response::{decode_base64_audio, invalid_response};
use crate::{BoxStream, Error, Result};
use bytes::Bytes;
use futures::{stream, StreamExt};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StreamLine {
    #[serde(default)]
    result: Option<StreamResult>,
    #[serde(default)]
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamResult {
    #[serde(default)]
    audio_content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// `Ok(None)` for lines that carry nothing playable (blank, timestamps only).
fn parse_line(line: &str) -> Result<Option<Bytes>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parsed: StreamLine = serde_json::from_str(trimmed)
        .map_err(|e| invalid_response(format!("stream chunk is not JSON: {}", e)))?;

    if let Some(err) = parsed.error {
        let message = err.message.unwrap_or_default();
        // gRPC-style codes: 16 unauthenticated, 8 resource exhausted.
        return Err(match err.code {
            Some(16) => Error::from_status(401, message, None),
            Some(8) => Error::from_status(429, message, None),
            _ => Error::Remote {
                status: 200,
                class: "server_error".to_string(),
                message,
            },
        });
    }

    match parsed.result.and_then(|r| r.audio_content) {
        Some(encoded) if !encoded.is_empty() => decode_base64_audio(&encoded).map(Some),
        _ => Ok(None),
    }
}

/// Turn the raw response body into decoded audio chunks.
///
/// A body that ends without a single audio chunk yields an `invalid_response`
/// error instead of finishing empty.
pub fn decode_audio_stream(input: BoxStream<'static, Bytes>) -> BoxStream<'static, Bytes> {
    let stream = stream::unfold(
        (input, Vec::<u8>::new(), false, false),
        |(mut input, mut buf, finished, yielded)| async move {
            if finished {
                return None;
            }
            loop {
                if let Some(idx) = buf.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=idx).collect();
                    let text = String::from_utf8_lossy(&line);
                    match parse_line(&text) {
                        Ok(Some(chunk)) => return Some((Ok(chunk), (input, buf, false, true))),
                        Ok(None) => continue,
                        Err(e) => return Some((Err(e), (input, Vec::new(), true, yielded))),
                    }
                }

                match input.next().await {
                    Some(Ok(bytes)) => buf.extend_from_slice(&bytes),
                    Some(Err(e)) => return Some((Err(e), (input, Vec::new(), true, yielded))),
                    None => {
                        // EOF: a final line may lack its newline.
                        let rest = std::mem::take(&mut buf);
                        let text = String::from_utf8_lossy(&rest);
                        let item = match parse_line(&text) {
                            Ok(Some(chunk)) => Ok(chunk),
                            Ok(None) if yielded => return None,
                            Ok(None) => Err(invalid_response("stream carried no audio")),
                            Err(e) => Err(e),
                        };
                        return Some((item, (input, Vec::new(), true, true)));
                    }
                }
            }
        },
    );
    Box::pin(stream)
}
