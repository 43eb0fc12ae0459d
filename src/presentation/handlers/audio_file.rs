use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::ports::ArtifactStoreError;
use crate::domain::{ArtifactName, AudioFormat};
use crate::presentation::state::TtsState;

use super::error::error_response;

const NOT_FOUND: &str = "Audio file not found";

pub async fn audio_file_handler(
    State(state): State<TtsState>,
    Path(filename): Path<String>,
) -> Response {
    let Ok(name) = ArtifactName::parse(&filename) else {
        tracing::warn!(filename = %filename, "Rejected audio file name");
        return error_response(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    match state.speech_service.store().fetch(&name).await {
        Ok(bytes) => {
            let mime = name.format().unwrap_or(AudioFormat::Wav).as_mime();
            ([(header::CONTENT_TYPE, mime)], bytes).into_response()
        }
        Err(ArtifactStoreError::NotFound(_)) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => {
            tracing::error!(file = %name, error = %e, "Failed to read audio file");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
