//! Integration tests for provider setup and voice validation

use crate::integration::mock_server::MockServerFixture;
use inworld_tts::error_code::ErrorCode;
use inworld_tts::{Error, InworldProvider, ProviderConfig, SpeechProvider, TtsSettings};
use serde_json::json;

#[tokio::test]
async fn test_setup_loads_catalog_and_identity() {
    let mut fixture = MockServerFixture::new().await;
    let voices = fixture
        .server
        .mock("GET", "/tts/v1/voices")
        .with_status(200)
        .with_body(MockServerFixture::voices_body())
        .expect(2)
        .create_async()
        .await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();

    assert_eq!(provider.name(), "Inworld TTS");
    assert_eq!(provider.unique_id(), "inworld_tts_test-entry");
    assert_eq!(provider.default_language(), "en");
    assert_eq!(provider.supported_languages(), vec!["en".to_string()]);
    assert_eq!(provider.catalog().languages(), vec!["en", "es"]);
    assert_eq!(provider.catalog().voices_for("en")[1].label, "Dennis (calm)");
    assert_eq!(provider.catalog().len(), 2);

    let refreshed = provider.refresh_catalog().await.unwrap();
    assert_eq!(&refreshed, provider.catalog());
    voices.assert_async().await;
}

#[tokio::test]
async fn test_setup_picks_first_voice_when_unset() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;

    let config = ProviderConfig {
        voice_id: None,
        language: "es".into(),
        ..fixture.config()
    };
    let provider = InworldProvider::setup(config).await.unwrap();

    assert_eq!(provider.settings().voice_id, "Diego");
}

#[tokio::test]
async fn test_setup_without_voices_for_language_fails() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;

    let config = ProviderConfig {
        voice_id: None,
        language: "fr".into(),
        ..fixture.config()
    };
    let err = InworldProvider::setup(config).await.err().unwrap();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[tokio::test]
async fn test_setup_rejects_invalid_key() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture
        .mock_voices(401, r#"{"error":{"code":16,"message":"unauthenticated"}}"#)
        .await;

    let err = InworldProvider::setup(fixture.config()).await.err().unwrap();

    assert!(err.is_authentication());
}

#[tokio::test]
async fn test_setup_server_error_reads_as_cannot_connect() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices(500, "internal").await;

    let err = InworldProvider::setup(fixture.config()).await.err().unwrap();

    assert!(matches!(err, Error::Network { .. }));
    assert_eq!(err.code(), ErrorCode::Unavailable);
}

#[tokio::test]
async fn test_setup_unreachable_host() {
    let config = ProviderConfig {
        api_url: "http://127.0.0.1:1".into(),
        api_key: Some("a2V5".into()),
        voice_id: Some("Ashley".into()),
        timeout_secs: 2,
        ..Default::default()
    };

    let err = InworldProvider::setup(config).await.err().unwrap();

    assert!(matches!(err, Error::Network { .. }));
}

#[tokio::test]
async fn test_setup_rejects_bad_options_before_any_request() {
    let mut fixture = MockServerFixture::new().await;
    let voices = fixture
        .server
        .mock("GET", "/tts/v1/voices")
        .expect(0)
        .create_async()
        .await;

    let config = ProviderConfig {
        temperature: 3.0,
        ..fixture.config()
    };
    let err = InworldProvider::setup(config).await.err().unwrap();

    assert!(matches!(err, Error::Configuration { .. }));
    voices.assert_async().await;
}

#[tokio::test]
async fn test_validate_voice_synthesizes_test_phrase() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let check = fixture
        .mock_synthesis(
            json!({"text": "Test", "voiceId": "Dennis", "modelId": "inworld-tts-1-max"}),
            b"audio",
        )
        .await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let candidate = TtsSettings {
        voice_id: "Dennis".into(),
        model_id: "inworld-tts-1-max".parse().unwrap(),
        ..provider.settings().clone()
    };
    provider.validate_voice(&candidate).await.unwrap();

    check.assert_async().await;
}

#[tokio::test]
async fn test_validate_voice_surfaces_auth_failure() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let _synth = fixture.mock_synthesis_error(403, r#"{"message":"forbidden"}"#).await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let err = provider
        .validate_voice(provider.settings())
        .await
        .unwrap_err();

    assert!(err.is_authentication());
    assert_eq!(err.code(), ErrorCode::PermissionDenied);
}
