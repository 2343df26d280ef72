//! Speech-Synthesis Collaborator
//!
//! Best-effort text-to-speech. The voice-selection policy is a pure
//! mapping from interview tone to a synthesis voice; the production
//! implementation targets the ElevenLabs REST API. Credentials are a
//! construction-time precondition: callers hold an
//! `Option<Arc<dyn SpeechSynthesizer>>` and skip synthesis entirely when
//! no key was configured.

use crate::session::Tone;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

// "Rachel" - warm, professional.
const VOICE_RACHEL: &str = "21m00Tcm4TlvDq8ikWAM";
// "Bella" - crisp, professional.
const VOICE_BELLA: &str = "EXAVITQu4vr4xnSDxMaL";
// "Elli" - friendly.
const VOICE_ELLI: &str = "MF3mGyEYCl7XYWbV9V6O";

/// Selects the synthesis voice for an interview tone.
pub fn voice_for_tone(tone: Tone) -> &'static str {
    match tone {
        Tone::Friendly => VOICE_ELLI,
        Tone::Adversarial => VOICE_BELLA,
        Tone::Neutral => VOICE_RACHEL,
    }
}

/// Failure of the speech side channel. Callers on the conversation path
/// absorb this at a single degradation boundary; only the standalone TTS
/// endpoint surfaces it.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("synthesis service returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
}

/// An opaque text -> audio service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Renders `text` as MP3 audio using the given voice.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError>;
}

/// ElevenLabs implementation of [`SpeechSynthesizer`].
pub struct ElevenLabsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ElevenLabsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: ELEVENLABS_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (used to point tests at a stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
        let url = format!("{}/text-to-speech/{}", self.base_url, voice_id);
        let body = json!({
            "text": text,
            "model_id": "eleven_monolingual_v1",
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
                "style": 0.5,
                "use_speaker_boost": true,
            },
        });

        let response = self
            .http
            .post(&url)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .timeout(SYNTHESIS_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SynthesisError::UpstreamStatus(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
