//! Voice catalog: what voices exist and which languages they speak.

mod client;
mod types;

pub use client::{VoiceClient, VOICES_PATH};
pub use types::{Voice, VoiceCatalog, VoiceOption};
