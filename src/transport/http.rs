use crate::config::ApiKey;
use crate::{BoxStream, Error, ErrorContext, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::Proxy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Correlation id header sent with every call. The vendor may ignore it; logs carry the same id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Fully read response: status, throttling hint, and body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub retry_after_secs: Option<u64>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Authenticated HTTP access to the vendor API.
///
/// One instance is shared by every call a provider makes; the credential inside
/// is never changed after construction.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: ApiKey,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_key: ApiKey, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Ok(proxy_url) = env::var("INWORLD_PROXY_URL") {
            match Proxy::all(&proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!(error = %e, "Ignoring invalid INWORLD_PROXY_URL"),
            }
        }

        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to create HTTP client: {}", e),
                ErrorContext::new().with_source("transport"),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid endpoint path {}: {}", path, e),
                    ErrorContext::new().with_field_path("api_url"),
                )
            })
    }

    fn headers(&self, request_id: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Basic {}", self.api_key.expose()))
            .map_err(|_| {
                Error::configuration_with_context(
                    "API key contains characters not allowed in a header",
                    ErrorContext::new().with_field_path("api_key"),
                )
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(id) = HeaderValue::from_str(request_id) {
            headers.insert(REQUEST_ID_HEADER, id);
        }
        Ok(headers)
    }

    pub async fn get(&self, path: &str, request_id: &str) -> Result<RawResponse> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .headers(self.headers(request_id)?)
            .send()
            .await
            .map_err(|e| Error::from_transport(&e, "transport"))?;
        read_response(response).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        request_id: &str,
    ) -> Result<RawResponse> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .headers(self.headers(request_id)?)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::from_transport(&e, "transport"))?;
        read_response(response).await
    }

    /// POST and hand back the body as a byte stream once the status is known to be a success.
    pub async fn post_stream<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        request_id: &str,
    ) -> Result<BoxStream<'static, Bytes>> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .headers(self.headers(request_id)?)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::from_transport(&e, "transport"))?;

        if !response.status().is_success() {
            let raw = read_response(response).await?;
            return Err(error_for_status(raw.status, &raw.body, raw.retry_after_secs));
        }

        let byte_stream = response
            .bytes_stream()
            .map_err(|e| Error::from_transport(&e, "stream"));
        Ok(Box::pin(byte_stream))
    }
}

async fn read_response(response: reqwest::Response) -> Result<RawResponse> {
    let status = response.status().as_u16();
    let retry_after_secs = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok());
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::from_transport(&e, "response_body"))?;
    Ok(RawResponse {
        status,
        retry_after_secs,
        body,
    })
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    // Keep a trailing slash so joins append instead of replacing the last segment.
    let normalized = format!("{}/", trimmed.trim_end_matches('/'));
    let url = Url::parse(&normalized).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid API URL {:?}: {}", raw, e),
            ErrorContext::new().with_field_path("api_url"),
        )
    })?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(Error::configuration_with_context(
            format!("API URL must be http or https, got {}", url.scheme()),
            ErrorContext::new().with_field_path("api_url"),
        ));
    }
    Ok(url)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Nested { error: ErrorDetail },
    Flat(ErrorDetail),
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Pull the vendor's explanation out of an error body, falling back to the raw text.
fn error_message(body: &[u8]) -> String {
    let parsed = serde_json::from_slice::<ErrorBody>(body).ok().and_then(|b| match b {
        ErrorBody::Nested { error } => error.message,
        ErrorBody::Flat(detail) => detail.message,
    });
    match parsed {
        Some(message) => message,
        None => {
            let text = String::from_utf8_lossy(body);
            text.chars().take(200).collect::<String>().trim().to_string()
        }
    }
}

/// Typed error for a non-success status.
pub fn error_for_status(status: u16, body: &[u8], retry_after_secs: Option<u64>) -> Error {
    let message = error_message(body);
    tracing::debug!(status, message = %message, "Inworld API returned an error status");
    Error::from_status(status, message, retry_after_secs)
}
