use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesizer, SynthesisError, SynthesisRequest};

const OPENAI_VOICES: [&str; 6] = ["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

pub struct OpenAiSpeechSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
    speed: f32,
}

impl OpenAiSpeechSynthesizer {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| "tts-1".to_string()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeechSynthesizer {
    async fn speakers(&self) -> Result<Vec<String>, SynthesisError> {
        Ok(OPENAI_VOICES.iter().map(|v| v.to_string()).collect())
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        let body = SpeechBody {
            model: &self.model,
            input: &request.text,
            voice: request.speaker.as_deref().unwrap_or(OPENAI_VOICES[0]),
            response_format: "wav",
            speed: request.speed,
        };

        tracing::debug!(model = %self.model, voice = body.voice, "Sending text to OpenAI speech API");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {}", e)))?;

        tracing::info!(bytes = audio.len(), "OpenAI speech synthesis completed");

        Ok(audio.to_vec())
    }
}
