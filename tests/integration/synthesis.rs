//! Integration tests for one-shot synthesis through the provider

use crate::integration::mock_server::MockServerFixture;
use inworld_tts::error_code::ErrorCode;
use inworld_tts::{AudioEncoding, Error, InworldProvider, SpeechProvider, TtsOptions};
use serde_json::json;

#[tokio::test]
async fn test_synthesis_returns_audio_and_media_type() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let synth = fixture
        .mock_synthesis(
            json!({
                "text": "Hello there",
                "voiceId": "Ashley",
                "modelId": "inworld-tts-1",
                "audioConfig": {"audioEncoding": "MP3", "sampleRateHertz": 48000}
            }),
            b"ID3-fake-mp3",
        )
        .await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let audio = provider.get_tts_audio("Hello there", "en", None).await.unwrap();

    assert_eq!(audio.content_type, "audio/mpeg");
    assert_eq!(&audio.data[..], b"ID3-fake-mp3");
    synth.assert_async().await;
}

#[tokio::test]
async fn test_encoding_override_changes_media_type() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let synth = fixture
        .mock_synthesis(
            json!({"voiceId": "Dennis", "audioConfig": {"audioEncoding": "OGG_OPUS"}}),
            b"OggS",
        )
        .await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let options = TtsOptions {
        voice: Some("Dennis".into()),
        audio_encoding: Some("ogg_opus".into()),
        ..Default::default()
    };
    let audio = provider
        .get_tts_audio("Good night", "en", Some(&options))
        .await
        .unwrap();

    assert_eq!(audio.content_type, "audio/opus");
    synth.assert_async().await;
}

#[tokio::test]
async fn test_markup_is_sent_verbatim() {
    let text = "[whispering] The baby is asleep. *laughs* [sigh] Okay.";
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let synth = fixture.mock_synthesis(json!({ "text": text }), b"RIFF").await;

    let mut config = fixture.config();
    config.audio_encoding = AudioEncoding::Linear16;
    let provider = InworldProvider::setup(config).await.unwrap();
    let audio = provider.get_tts_audio(text, "en", None).await.unwrap();

    assert_eq!(audio.content_type, "audio/wav");
    synth.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let _synth = fixture
        .mock_synthesis_error(401, r#"{"error":{"code":16,"message":"invalid api key"}}"#)
        .await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let err = provider.get_tts_audio("Hi", "en", None).await.unwrap_err();

    assert!(err.is_authentication());
    assert_eq!(err.code(), ErrorCode::Authentication);
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let _synth = fixture
        .server
        .mock("POST", "/tts/v1/voice")
        .with_status(429)
        .with_header("retry-after", "7")
        .with_body(r#"{"message":"quota exceeded"}"#)
        .create_async()
        .await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let err = provider.get_tts_audio("Hi", "en", None).await.unwrap_err();

    match err {
        Error::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, Some(7)),
        other => panic!("expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_remote() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let _synth = fixture.mock_synthesis_error(503, "upstream unavailable").await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let err = provider.get_tts_audio("Hi", "en", None).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::Unavailable);
}

#[tokio::test]
async fn test_missing_audio_content_is_an_error() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let _synth = fixture.mock_synthesis_error(200, r#"{"other":"field"}"#).await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let err = provider.get_tts_audio("Hi", "en", None).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ServerError);
}

#[tokio::test]
async fn test_invalid_options_never_reach_the_network() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let never = fixture.mock_synthesis_never().await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();

    let hot = TtsOptions {
        temperature: Some(2.5),
        ..Default::default()
    };
    let err = provider.get_tts_audio("Hi", "en", Some(&hot)).await.unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let low_rate = TtsOptions {
        sample_rate_hertz: Some(4_000),
        ..Default::default()
    };
    let err = provider
        .get_tts_audio("Hi", "en", Some(&low_rate))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let flac = TtsOptions {
        audio_encoding: Some("FLAC".into()),
        ..Default::default()
    };
    let err = provider.get_tts_audio("Hi", "en", Some(&flac)).await.unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let err = provider.get_tts_audio("   ", "en", None).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    never.assert_async().await;
}

#[tokio::test]
async fn test_unsupported_language_is_rejected_locally() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let never = fixture.mock_synthesis_never().await;

    let provider = InworldProvider::setup(fixture.config()).await.unwrap();
    let err = provider.get_tts_audio("Hola", "es", None).await.unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    never.assert_async().await;
}

#[tokio::test]
async fn test_failure_does_not_poison_later_calls() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture.mock_voices_ok().await;
    let provider = InworldProvider::setup(fixture.config()).await.unwrap();

    let failing = fixture.mock_synthesis_error(500, "boom").await;
    assert!(provider.get_tts_audio("first", "en", None).await.is_err());
    failing.remove_async().await;

    let _ok = fixture.mock_synthesis(json!({"text": "second"}), b"ok").await;
    let audio = provider.get_tts_audio("second", "en", None).await.unwrap();
    assert_eq!(&audio.data[..], b"ok");
}
