use std::sync::Arc;
use std::time::Duration;

use speech_services::application::ports::{ArtifactStore, AudioConverter};
use speech_services::application::services::{
    AdmissionGate, ModelSlot, TempFileJanitor, TranscriptionService,
};
use speech_services::infrastructure::audio::{
    FallbackAudioConverter, FfmpegAudioConverter, SymphoniaAudioConverter,
    TranscriptionEngineFactory, check_ffmpeg_binary,
};
use speech_services::infrastructure::device::resolve_device;
use speech_services::infrastructure::observability::{TracingConfig, init_tracing};
use speech_services::infrastructure::storage::LocalArtifactStore;
use speech_services::presentation::config::{ServiceKind, Settings, TranscriptionProviderSetting};
use speech_services::presentation::{SttState, create_stt_router, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let service = ServiceKind::Stt;
    let settings = Settings::load(service)?;

    init_tracing(&TracingConfig::new(
        service.name(),
        &settings.logging.level,
        settings.logging.enable_json,
    ))?;

    let mut stt = settings.stt.clone();
    if settings.scaffold.enabled {
        tracing::warn!("Scaffold mode enabled, using mock transcription engine");
        stt.provider = TranscriptionProviderSetting::Mock;
    }

    let device = resolve_device(settings.device.torch_device, settings.device.enable_gpu);
    tracing::info!(%device, provider = ?stt.provider, model = %stt.whisper_model, "Starting STT service");

    if let Err(e) = check_ffmpeg_binary(&stt.ffmpeg_binary) {
        tracing::warn!(error = %e, "ffmpeg unavailable, conversions fall back to symphonia");
    }

    let store: Arc<dyn ArtifactStore> = Arc::new(LocalArtifactStore::new(&stt.temp_audio_dir)?);
    let converter: Arc<dyn AudioConverter> = Arc::new(FallbackAudioConverter::new(
        Arc::new(FfmpegAudioConverter::new(stt.ffmpeg_binary.clone())),
        Arc::new(SymphoniaAudioConverter),
    ));

    let janitor = Arc::new(TempFileJanitor::new(
        Arc::clone(&store),
        Duration::from_secs(stt.temp_file_max_age_secs),
    ));
    let _periodic_sweep = janitor.spawn_periodic(Duration::from_secs(stt.cleanup_interval_secs));

    let engine = Arc::new(ModelSlot::new(
        "whisper",
        TranscriptionEngineFactory::loader(stt.clone(), device, settings.scaffold.mock_latency()),
    ));
    engine.spawn_load();

    let transcription_service = Arc::new(TranscriptionService::new(
        engine,
        store,
        converter,
        janitor,
        stt.max_audio_size,
    ));

    let state = SttState {
        transcription_service,
        admission_gate: Arc::new(AdmissionGate::new(stt.max_concurrent_requests)),
        settings: stt,
        device,
    };

    serve(create_stt_router(state), &settings.server).await
}
