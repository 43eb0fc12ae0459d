use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::AudioUpload;
use crate::presentation::state::SttState;

use super::error::error_response;

pub const AUDIO_FIELD: &str = "audio";

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
    pub language: String,
    pub duration: f64,
    pub processing_time: f64,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<SttState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected transcription request body");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    let _permit = match state.admission_gate.try_admit() {
        Ok(permit) => permit,
        Err(e) => return e.into_response(),
    };

    let upload = match read_audio_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            tracing::warn!("Transcription request without an audio field");
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Field required: {}", AUDIO_FIELD),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Audio file too large");
            }
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to read multipart: {}", e.body_text()),
            );
        }
    };

    tracing::debug!(
        filename = %upload.filename,
        bytes = upload.data.len(),
        in_flight = state.admission_gate.in_flight(),
        "Audio upload received"
    );

    match state.transcription_service.transcribe(upload).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(TranscriptionResponse {
                transcription: outcome.transcript.text,
                language: outcome.transcript.language,
                duration: outcome.transcript.duration_secs,
                processing_time: outcome.processing_time.as_secs_f64(),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn read_audio_field(
    multipart: &mut Multipart,
) -> Result<Option<AudioUpload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await?;
        return Ok(Some(AudioUpload { filename, data }));
    }
    Ok(None)
}
