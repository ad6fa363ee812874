//! Mock Inworld API for integration tests

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use inworld_tts::ProviderConfig;
use mockito::{Matcher, Mock, Server, ServerGuard};

pub const TEST_API_KEY: &str = "dGVzdDprZXk=";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Provider config pointed at the mock server with an explicit key.
    pub fn config(&self) -> ProviderConfig {
        ProviderConfig {
            api_url: self.base_url.clone(),
            api_key: Some(TEST_API_KEY.to_string()),
            voice_id: Some("Ashley".to_string()),
            timeout_secs: 5,
            entry_id: "test-entry".to_string(),
            ..Default::default()
        }
    }

    pub fn voices_body() -> String {
        serde_json::json!({
            "voices": [
                {"voiceId": "Ashley", "displayName": "Ashley", "languages": ["en"]},
                {"voiceId": "Dennis", "displayName": "Dennis (calm)", "languages": ["en"]},
                {"voiceId": "Diego", "languages": ["es"]}
            ]
        })
        .to_string()
    }

    pub async fn mock_voices(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("GET", "/tts/v1/voices")
            .match_header("authorization", format!("Basic {}", TEST_API_KEY).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    pub async fn mock_voices_ok(&mut self) -> Mock {
        let body = Self::voices_body();
        self.mock_voices(200, &body).await
    }

    pub fn audio_body(audio: &[u8]) -> String {
        serde_json::json!({ "audioContent": STANDARD.encode(audio) }).to_string()
    }

    /// Successful synthesis whose request body must contain `expected`.
    pub async fn mock_synthesis(&mut self, expected: serde_json::Value, audio: &[u8]) -> Mock {
        self.server
            .mock("POST", "/tts/v1/voice")
            .match_header("authorization", format!("Basic {}", TEST_API_KEY).as_str())
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(expected))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Self::audio_body(audio))
            .create_async()
            .await
    }

    pub async fn mock_synthesis_error(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", "/tts/v1/voice")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// A synthesis endpoint that must never be hit.
    pub async fn mock_synthesis_never(&mut self) -> Mock {
        self.server
            .mock("POST", Matcher::Any)
            .with_status(500)
            .expect(0)
            .create_async()
            .await
    }

    pub async fn mock_stream(&mut self, chunks: &[&[u8]]) -> Mock {
        let body: String = chunks
            .iter()
            .map(|c| format!("{{\"result\":{{\"audioContent\":\"{}\"}}}}\n", STANDARD.encode(c)))
            .collect();
        self.server
            .mock("POST", "/tts/v1/voice:stream")
            .with_status(200)
            .with_header("content-type", "application/x-ndjson")
            .with_body(body)
            .create_async()
            .await
    }
}
