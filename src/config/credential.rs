//! API key handling.

use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::env;
use std::fmt;
use std::sync::Arc;

pub const API_KEY_ENV: &str = "INWORLD_API_KEY";
pub const KEYRING_SERVICE: &str = "inworld-tts";
pub const KEYRING_USER: &str = "api_key";

/// The vendor API key. Cheap to clone, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl AsRef<str>) -> Result<Self> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            return Err(Error::configuration_with_context(
                "API key is empty",
                ErrorContext::new()
                    .with_field_path("api_key")
                    .with_source("credential"),
            ));
        }
        Ok(Self(Arc::from(key)))
    }

    /// Raw key, for building the Authorization header only.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

fn from_keyring() -> Option<String> {
    let entry = Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    entry.get_password().ok()
}

/// Resolve the API key: explicit value, then `INWORLD_API_KEY`, then the OS keyring.
pub fn resolve_api_key(explicit: Option<&str>) -> Result<ApiKey> {
    if let Some(key) = explicit.filter(|k| !k.trim().is_empty()) {
        return ApiKey::new(key);
    }
    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            tracing::debug!("Using API key from {}", API_KEY_ENV);
            return ApiKey::new(key);
        }
    }
    if let Some(key) = from_keyring() {
        tracing::debug!(service = KEYRING_SERVICE, "Using API key from OS keyring");
        return ApiKey::new(key);
    }
    Err(Error::configuration_with_context(
        "No API key configured",
        ErrorContext::new()
            .with_field_path("api_key")
            .with_details(format!(
                "set api_key, {} or keyring entry {}/{}",
                API_KEY_ENV, KEYRING_SERVICE, KEYRING_USER
            ))
            .with_source("credential"),
    ))
}
