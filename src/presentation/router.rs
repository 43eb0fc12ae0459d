use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, HttpMakeClassifier, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    audio_file_handler, generate_speech_handler, stt_health_handler, stt_status_handler,
    transcribe_handler, tts_health_handler, tts_status_handler, voices_handler,
};
use crate::presentation::state::{SttState, TtsState};

/// Headroom for multipart boundaries and the non-audio fields.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn create_stt_router(state: SttState) -> Router {
    let body_limit = state
        .transcription_service
        .max_audio_size()
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/transcribe", post(transcribe_handler))
        .route("/health", get(stt_health_handler))
        .route("/status", get(stt_status_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer())
        .layer(cors_layer())
        .with_state(state)
}

pub fn create_tts_router(state: TtsState) -> Router {
    Router::new()
        .route("/generate-speech", post(generate_speech_handler))
        .route("/voices", get(voices_handler))
        .route("/health", get(tts_health_handler))
        .route("/status", get(tts_status_handler))
        .route("/audio/{filename}", get(audio_file_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn trace_layer() -> TraceLayer<HttpMakeClassifier> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
