use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::SpeechRequest;
use crate::domain::{AudioFormat, LanguagePreference, VoiceSettings};
use crate::presentation::state::TtsState;

use super::error::error_response;

fn default_audio_format() -> AudioFormat {
    AudioFormat::Wav
}

#[derive(Debug, Deserialize)]
pub struct GenerateSpeechRequest {
    pub text: String,
    #[serde(default)]
    pub voice_settings: Option<VoiceSettings>,
    #[serde(default = "default_audio_format")]
    pub audio_format: AudioFormat,
    #[serde(default)]
    pub language: Option<LanguagePreference>,
}

#[derive(Debug, Serialize)]
pub struct GenerateSpeechResponse {
    pub audio_url: String,
    pub duration: f64,
    pub file_size: u64,
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn generate_speech_handler(
    State(state): State<TtsState>,
    payload: Result<Json<GenerateSpeechRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected speech request body");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    let request = SpeechRequest {
        text: body.text,
        voice_settings: body.voice_settings.unwrap_or_default(),
        audio_format: body.audio_format,
        language: body.language,
    };

    match state.speech_service.synthesize(request).await {
        Ok(outcome) => {
            tracing::info!(
                file = %outcome.artifact,
                bytes = outcome.file_size,
                language = %outcome.language,
                "Speech generated"
            );
            (
                StatusCode::OK,
                Json(GenerateSpeechResponse {
                    audio_url: format!("/audio/{}", outcome.artifact),
                    duration: outcome.estimated_duration_secs,
                    file_size: outcome.file_size,
                    status: "success",
                    message: "Speech generated successfully",
                }),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}
