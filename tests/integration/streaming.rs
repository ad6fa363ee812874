//! Integration tests for streaming synthesis

use crate::integration::mock_server::{MockServerFixture, TEST_API_KEY};
use futures::StreamExt;
use inworld_tts::{AudioEncoding, Error, TtsClient, TtsOptions, TtsSettings};

fn client(fixture: &MockServerFixture) -> TtsClient {
    let mut settings = TtsSettings::new("Ashley");
    settings.audio_encoding = AudioEncoding::Linear16;
    TtsClient::builder()
        .api_key(TEST_API_KEY)
        .base_url(fixture.base_url.clone())
        .settings(settings)
        .timeout_secs(5)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_stream_yields_chunks_in_order() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_stream(&[b"one", b"two", b"three"]).await;

    let stream = client(&fixture)
        .synthesize_stream("Counting", &TtsOptions::default())
        .await
        .unwrap();
    assert_eq!(stream.content_type, "audio/wav");

    let chunks: Vec<_> = stream
        .chunks
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let joined: Vec<u8> = chunks.iter().flat_map(|c| c.to_vec()).collect();
    assert_eq!(joined, b"onetwothree");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_stream_error_line_ends_stream() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/tts/v1/voice:stream")
        .with_status(200)
        .with_body(concat!(
            "{\"result\":{\"audioContent\":\"YWJj\"}}\n",
            "{\"error\":{\"code\":8,\"message\":\"quota\"}}\n",
        ))
        .create_async()
        .await;

    let stream = client(&fixture)
        .synthesize_stream("Hi", &TtsOptions::default())
        .await
        .unwrap();
    let items: Vec<_> = stream.chunks.collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(&items[0].as_ref().unwrap()[..], b"abc");
    assert!(matches!(items[1], Err(Error::RateLimited { .. })));
}

#[tokio::test]
async fn test_stream_http_error_fails_before_streaming() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/tts/v1/voice:stream")
        .with_status(401)
        .with_body(r#"{"error":{"message":"bad key"}}"#)
        .create_async()
        .await;

    let err = client(&fixture)
        .synthesize_stream("Hi", &TtsOptions::default())
        .await
        .err()
        .unwrap();

    assert!(err.is_authentication());
}
