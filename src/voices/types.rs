//! Voice catalog types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One voice as listed by `GET /tts/v1/voices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub voice_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct VoiceListResponse {
    #[serde(default)]
    pub voices: Vec<Voice>,
}

/// A selectable voice: id plus the label shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceOption {
    pub value: String,
    pub label: String,
}

/// Voices grouped by language code. Languages iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceCatalog {
    by_language: BTreeMap<String, Vec<VoiceOption>>,
}

impl VoiceCatalog {
    pub fn from_voices(voices: &[Voice]) -> Self {
        let mut by_language: BTreeMap<String, Vec<VoiceOption>> = BTreeMap::new();
        for voice in voices {
            let label = voice
                .display_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(&voice.voice_id)
                .to_string();
            for language in &voice.languages {
                by_language
                    .entry(language.clone())
                    .or_default()
                    .push(VoiceOption {
                        value: voice.voice_id.clone(),
                        label: label.clone(),
                    });
            }
        }
        Self { by_language }
    }

    pub fn languages(&self) -> Vec<&str> {
        self.by_language.keys().map(String::as_str).collect()
    }

    pub fn voices_for(&self, language: &str) -> &[VoiceOption] {
        self.by_language
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, language: &str, voice_id: &str) -> bool {
        self.voices_for(language).iter().any(|v| v.value == voice_id)
    }

    /// First voice listed for the language.
    pub fn default_voice(&self, language: &str) -> Option<&VoiceOption> {
        self.voices_for(language).first()
    }

    pub fn is_empty(&self) -> bool {
        self.by_language.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_language.len()
    }
}
