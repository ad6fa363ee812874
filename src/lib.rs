//! # inworld-tts
//!
//! Text-to-speech provider backed by the Inworld hosted speech synthesis API.
//!
//! A host application registers an [`InworldProvider`] and hands it text to
//! speak. The provider validates the request locally, makes a single HTTPS
//! call, and returns the audio bytes together with their media type, or a
//! typed [`Error`] that says which of configuration, authentication,
//! availability or throttling went wrong.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inworld_tts::{InworldProvider, ProviderConfig, SpeechProvider};
//!
//! #[tokio::main]
//! async fn main() -> inworld_tts::Result<()> {
//!     let config = ProviderConfig {
//!         api_key: Some("your-base64-api-key".into()),
//!         voice_id: Some("Ashley".into()),
//!         ..Default::default()
//!     };
//!     let provider = InworldProvider::setup(config).await?;
//!
//!     let audio = provider
//!         .get_tts_audio("[happy] The front door is unlocked.", "en", None)
//!         .await?;
//!     println!("{} bytes of {}", audio.data.len(), audio.content_type);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Provider settings, YAML/env loading, API key resolution |
//! | [`tts`] | Request/response transforms and the synthesis client |
//! | [`voices`] | Voice catalog grouped by language |
//! | [`provider`] | Host-facing provider contract |
//! | [`transport`] | Authenticated HTTP access to the vendor |
//! | [`error_code`] | Canonical failure codes |

pub mod config;
pub mod error_code;
pub mod provider;
pub mod transport;
pub mod tts;
pub mod voices;

pub use config::{ApiKey, ProviderConfig};
pub use provider::{InworldProvider, SpeechProvider, TtsAudio};
pub use tts::{AudioEncoding, AudioOutput, ModelId, TtsClient, TtsOptions, TtsSettings};
pub use voices::{Voice, VoiceCatalog};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
