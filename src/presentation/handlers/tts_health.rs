use axum::Json;
use axum::extract::State;
use chrono::Local;
use serde::Serialize;

use crate::infrastructure::device::gpu_available;
use crate::presentation::state::TtsState;

#[derive(Debug, Serialize)]
pub struct TtsHealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub gpu_available: bool,
    pub memory_usage: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TtsStatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub model_name: String,
    pub model_loaded: bool,
    pub model_loading: bool,
    pub device: String,
    pub audio_output_dir: String,
    pub max_text_length: usize,
    pub timestamp: String,
}

pub async fn tts_health_handler(State(state): State<TtsState>) -> Json<TtsHealthResponse> {
    let model_loaded = state.speech_service.synthesizer().is_loaded();
    let gpu_available = gpu_available();

    Json(TtsHealthResponse {
        status: if model_loaded { "healthy" } else { "loading" },
        model_loaded,
        gpu_available,
        // candle exposes no device memory query
        memory_usage: gpu_available.then(|| "Unknown".to_string()),
    })
}

pub async fn tts_status_handler(State(state): State<TtsState>) -> Json<TtsStatusResponse> {
    let slot = state.speech_service.synthesizer();

    Json(TtsStatusResponse {
        service: "TTS Service",
        version: env!("CARGO_PKG_VERSION"),
        model_name: state.settings.model_name.clone(),
        model_loaded: slot.is_loaded(),
        model_loading: slot.is_loading(),
        device: state.device.to_string(),
        audio_output_dir: state.settings.audio_output_dir.clone(),
        max_text_length: state.speech_service.max_text_length(),
        timestamp: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    })
}
