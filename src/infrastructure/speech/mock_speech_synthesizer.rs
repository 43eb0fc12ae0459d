use std::f32::consts::TAU;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{SpeechSynthesizer, SynthesisError, SynthesisRequest};
use crate::infrastructure::audio::wav_encoder::encode_wav_pcm16;

const SAMPLE_RATE: u32 = 16_000;
const TONE_HZ: f32 = 440.0;
const SECONDS_PER_WORD: f32 = 0.4;

/// Scaffold-mode synthesizer that renders a short sine tone per request.
pub struct MockSpeechSynthesizer {
    speakers: Vec<String>,
    latency: Duration,
}

impl MockSpeechSynthesizer {
    pub fn new(speakers: Vec<String>, latency: Duration) -> Self {
        Self { speakers, latency }
    }
}

impl Default for MockSpeechSynthesizer {
    fn default() -> Self {
        Self::new(
            vec!["Claribel Dervla".to_string(), "Dmitrii".to_string()],
            Duration::ZERO,
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn speakers(&self) -> Result<Vec<String>, SynthesisError> {
        Ok(self.speakers.clone())
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let words = request.text.split_whitespace().count().max(1) as f32;
        let seconds = words * SECONDS_PER_WORD / request.speed.max(0.1);
        let total = (seconds * SAMPLE_RATE as f32) as usize;

        let samples: Vec<f32> = (0..total)
            .map(|i| 0.2 * (TAU * TONE_HZ * i as f32 / SAMPLE_RATE as f32).sin())
            .collect();

        encode_wav_pcm16(&samples, SAMPLE_RATE)
            .map_err(|e| SynthesisError::SynthesisFailed(e.to_string()))
    }
}
