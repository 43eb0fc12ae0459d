use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesizer, SynthesisError, SynthesisRequest};

/// Client for an XTTS inference server exposing `/speakers_list` and
/// `/tts_to_audio/`.
pub struct XttsServerSynthesizer {
    client: reqwest::Client,
    base_url: String,
    speakers: Vec<String>,
}

#[derive(Serialize)]
struct TtsToAudioRequest<'a> {
    text: &'a str,
    speaker_wav: &'a str,
    language: &'a str,
}

impl XttsServerSynthesizer {
    /// Connects to the server and caches the speakers of the loaded model.
    pub async fn connect(base_url: &str, model_name: &str) -> Result<Self, SynthesisError> {
        let client = reqwest::Client::new();
        let base_url = base_url.trim_end_matches('/').to_string();

        tracing::info!(base_url = %base_url, model = model_name, "Connecting to XTTS server");

        let response = client
            .get(format!("{}/speakers_list", base_url))
            .send()
            .await
            .map_err(|e| SynthesisError::ModelLoadFailed(format!("speakers_list: {}", e)))?;

        if !response.status().is_success() {
            return Err(SynthesisError::ModelLoadFailed(format!(
                "speakers_list returned status {}",
                response.status()
            )));
        }

        let speakers: Vec<String> = response
            .json()
            .await
            .map_err(|e| SynthesisError::ModelLoadFailed(format!("parse speakers: {}", e)))?;

        tracing::info!(speakers = speakers.len(), "XTTS model ready");

        Ok(Self {
            client,
            base_url,
            speakers,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for XttsServerSynthesizer {
    async fn speakers(&self) -> Result<Vec<String>, SynthesisError> {
        Ok(self.speakers.clone())
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        if (request.speed - 1.0).abs() > f32::EPSILON {
            tracing::debug!(speed = request.speed, "XTTS server ignores per-request speed");
        }

        let body = TtsToAudioRequest {
            text: &request.text,
            speaker_wav: request.speaker.as_deref().unwrap_or_default(),
            language: request.language.code(),
        };

        let response = self
            .client
            .post(format!("{}/tts_to_audio/", self.base_url))
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

        if audio.is_empty() {
            return Err(SynthesisError::SynthesisFailed(
                "server returned empty audio".to_string(),
            ));
        }

        tracing::info!(bytes = audio.len(), language = %request.language, "XTTS synthesis completed");

        Ok(audio.to_vec())
    }
}
