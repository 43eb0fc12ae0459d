use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{
    AdmissionError, SpeechServiceError, TranscriptionServiceError,
};

/// Error body shared by both services.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for AdmissionError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Rejecting request");
        error_response(StatusCode::TOO_MANY_REQUESTS, "Too many concurrent requests")
    }
}

impl IntoResponse for TranscriptionServiceError {
    fn into_response(self) -> Response {
        match self {
            TranscriptionServiceError::TooLarge { size, limit } => {
                tracing::warn!(size, limit, "Audio upload over the size limit");
                error_response(StatusCode::PAYLOAD_TOO_LARGE, "Audio file too large")
            }
            TranscriptionServiceError::ModelUnavailable(e) => {
                tracing::error!(error = %e, "Whisper model unavailable");
                error_response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Failed to load Whisper model",
                )
            }
            other => {
                tracing::error!(error = %other, "Transcription error");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Transcription failed: {}", other),
                )
            }
        }
    }
}

impl IntoResponse for SpeechServiceError {
    fn into_response(self) -> Response {
        match self {
            SpeechServiceError::ModelNotLoaded => {
                error_response(StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            SpeechServiceError::EmptyText => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            SpeechServiceError::TextTooLong { .. }
            | SpeechServiceError::InvalidSpeed(_)
            | SpeechServiceError::UnsupportedFormat(_) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            other => {
                tracing::error!(error = %other, "TTS generation error");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to generate speech: {}", other),
                )
            }
        }
    }
}
