use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{AudioFormat, Transcript};

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

/// `verbose_json` body shared by the OpenAI and Azure transcription APIs.
#[derive(Debug, Deserialize)]
pub(super) struct VerboseTranscription {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl From<VerboseTranscription> for Transcript {
    fn from(body: VerboseTranscription) -> Self {
        Transcript::new(
            body.text,
            body.language.unwrap_or_default(),
            body.duration.unwrap_or(0.0),
        )
    }
}

/// Upload part named after the sniffed container so the API can pick a decoder.
pub(super) fn audio_part(audio_data: &[u8]) -> Result<multipart::Part, TranscriptionError> {
    let format = AudioFormat::sniff(audio_data).unwrap_or(AudioFormat::Wav);
    multipart::Part::bytes(audio_data.to_vec())
        .file_name(format!("audio.{}", format.extension()))
        .mime_str(format.as_mime())
        .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<Transcript, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", audio_part(audio_data)?);

        tracing::debug!(model = %self.model, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let body: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse response: {}", e)))?;

        let transcript = Transcript::from(body);

        tracing::info!(
            chars = transcript.text.len(),
            language = %transcript.language,
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript)
    }
}
