use super::{SpeechProvider, TtsAudio};
use crate::config::{resolve_api_key, ProviderConfig};
use crate::transport::HttpTransport;
use crate::tts::{TtsClient, TtsOptions, TtsSettings};
use crate::voices::{VoiceCatalog, VoiceClient};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const TITLE: &str = "Inworld TTS";
pub const DOMAIN: &str = "inworld_tts";

const VALIDATION_TEXT: &str = "Test";

/// Setup-time failures collapse to "invalid auth" or "cannot connect".
fn setup_error(err: Error) -> Error {
    match err {
        Error::Configuration { .. }
        | Error::Authentication { .. }
        | Error::RateLimited { .. }
        | Error::Network { .. } => err,
        other => Error::network_with_context(
            format!("Cannot connect to Inworld API: {}", other),
            ErrorContext::new().with_source("setup"),
        ),
    }
}

/// Inworld-backed [`SpeechProvider`].
pub struct InworldProvider {
    client: TtsClient,
    voices: VoiceClient,
    catalog: VoiceCatalog,
    transport: Arc<HttpTransport>,
    unique_id: String,
}

impl InworldProvider {
    /// Validate the config, resolve the credential and run the one-time
    /// connectivity check (a voice listing) before handing out a provider.
    pub async fn setup(config: ProviderConfig) -> Result<Self> {
        tracing::debug!(config = ?config, "Setting up Inworld TTS provider");
        config.validate_options()?;

        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let transport = Arc::new(HttpTransport::new(
            &config.api_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )?);

        let voices = VoiceClient::new(transport.clone());
        let catalog = voices.catalog().await.map_err(|e| {
            tracing::debug!(error = %e, "API validation failed during setup");
            setup_error(e)
        })?;

        let mut config = config;
        if let Some(voice) = config.voice_id.as_deref() {
            if !catalog.contains(&config.language, voice) {
                tracing::warn!(
                    voice,
                    language = %config.language,
                    "Configured voice is not listed for the configured language"
                );
            }
        } else {
            let picked = catalog.default_voice(&config.language).ok_or_else(|| {
                Error::configuration_with_context(
                    format!("No voices available for language {}", config.language),
                    ErrorContext::new()
                        .with_field_path("voice_id")
                        .with_details(format!("available languages: {:?}", catalog.languages())),
                )
            })?;
            tracing::info!(
                voice = %picked.value,
                language = %config.language,
                "No voice configured, using first available"
            );
            config.voice_id = Some(picked.value.clone());
        }

        let settings = config.settings()?;
        let unique_id = format!("{}_{}", DOMAIN, config.entry_id);
        tracing::info!(
            unique_id = %unique_id,
            voice = %settings.voice_id,
            language = %settings.language,
            model = %settings.model_id,
            encoding = %settings.audio_encoding,
            "Inworld TTS provider ready"
        );

        Ok(Self {
            client: TtsClient::new(transport.clone(), settings),
            voices,
            catalog,
            transport,
            unique_id,
        })
    }

    pub fn settings(&self) -> &TtsSettings {
        self.client.settings()
    }

    /// Voices fetched during setup.
    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// Fetch the voice catalog again.
    pub async fn refresh_catalog(&self) -> Result<VoiceCatalog> {
        self.voices.catalog().await
    }

    pub fn client(&self) -> &TtsClient {
        &self.client
    }

    /// Check candidate settings with a short test synthesis before a host
    /// commits them.
    pub async fn validate_voice(&self, candidate: &TtsSettings) -> Result<()> {
        tracing::debug!(
            voice = %candidate.voice_id,
            model = %candidate.model_id,
            "Validating voice configuration"
        );
        let probe = TtsClient::new(self.transport.clone(), candidate.clone());
        probe
            .synthesize(VALIDATION_TEXT, &TtsOptions::default())
            .await
            .map(|_| ())
            .map_err(setup_error)
    }
}

#[async_trait]
impl SpeechProvider for InworldProvider {
    fn name(&self) -> &str {
        TITLE
    }

    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn supported_languages(&self) -> Vec<String> {
        vec![self.settings().language.clone()]
    }

    fn default_language(&self) -> &str {
        &self.settings().language
    }

    async fn get_tts_audio(
        &self,
        message: &str,
        language: &str,
        options: Option<&TtsOptions>,
    ) -> Result<TtsAudio> {
        if language != self.settings().language {
            return Err(Error::configuration_with_context(
                format!("Language '{}' not supported", language),
                ErrorContext::new()
                    .with_field_path("language")
                    .with_details(format!("configured language is {}", self.settings().language)),
            ));
        }
        let defaults = TtsOptions::default();
        let output = self
            .client
            .synthesize(message, options.unwrap_or(&defaults))
            .await?;
        Ok(output.into())
    }
}
