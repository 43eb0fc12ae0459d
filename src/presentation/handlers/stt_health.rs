use axum::Json;
use axum::extract::State;
use chrono::Local;
use serde::Serialize;

use crate::domain::AudioFormat;
use crate::infrastructure::device::gpu_available;
use crate::presentation::state::SttState;

#[derive(Debug, Serialize)]
pub struct SttHealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub gpu_available: bool,
    pub supported_formats: Vec<AudioFormat>,
}

#[derive(Debug, Serialize)]
pub struct SttStatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub model_loaded: bool,
    pub current_requests: usize,
    pub max_concurrent_requests: usize,
    pub device: String,
    pub temp_dir: String,
    pub max_audio_size_mb: f64,
    pub timestamp: String,
}

pub async fn stt_health_handler(State(state): State<SttState>) -> Json<SttHealthResponse> {
    let model_loaded = state.transcription_service.engine().is_loaded();

    Json(SttHealthResponse {
        status: if model_loaded { "healthy" } else { "loading" },
        model_loaded,
        gpu_available: gpu_available(),
        supported_formats: AudioFormat::SUPPORTED_INPUTS.to_vec(),
    })
}

pub async fn stt_status_handler(State(state): State<SttState>) -> Json<SttStatusResponse> {
    Json(SttStatusResponse {
        service: "STT Service",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.transcription_service.engine().is_loaded(),
        current_requests: state.admission_gate.in_flight(),
        max_concurrent_requests: state.admission_gate.limit(),
        device: state.device.to_string(),
        temp_dir: state.settings.temp_audio_dir.clone(),
        max_audio_size_mb: state.transcription_service.max_audio_size() as f64 / 1024.0 / 1024.0,
        timestamp: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    })
}
