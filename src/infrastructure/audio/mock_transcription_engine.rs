use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::Transcript;

use super::audio_decoder::decode_audio;

pub const MOCK_TRANSCRIPT: &str = "This is a scaffold transcription.";

/// Deterministic engine for scaffold mode. Reports the real clip duration
/// when the audio decodes, zero otherwise.
pub struct MockTranscriptionEngine {
    latency: Duration,
}

impl MockTranscriptionEngine {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockTranscriptionEngine {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<Transcript, TranscriptionError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let duration = decode_audio(audio_data, None)
            .map(|audio| audio.duration_secs())
            .unwrap_or(0.0);

        Ok(Transcript::new(MOCK_TRANSCRIPT, "en", duration))
    }
}
