//! Speech synthesis: request transform, HTTP call, response transform.

mod client;
pub mod request;
pub mod response;
pub mod stream;
mod types;

pub use client::{AudioStream, TtsClient, TtsClientBuilder, SYNTHESIZE_PATH, SYNTHESIZE_STREAM_PATH};
pub use request::build_request;
pub use response::decode_audio;
pub use types::{
    AudioConfig, AudioEncoding, AudioOutput, ModelId, SynthesisRequest, TimestampType,
    TtsOptions, TtsSettings, DEFAULT_LANGUAGE, DEFAULT_SAMPLE_RATE_HERTZ, DEFAULT_TEMPERATURE,
    MAX_SAMPLE_RATE_HERTZ, MAX_TEMPERATURE, MIN_SAMPLE_RATE_HERTZ, MIN_TEMPERATURE,
};
