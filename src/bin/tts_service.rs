use std::sync::Arc;
use std::time::Duration;

use speech_services::application::ports::{ArtifactStore, AudioConverter};
use speech_services::application::services::{ModelSlot, SpeechService, TempFileJanitor};
use speech_services::infrastructure::audio::{FfmpegAudioConverter, check_ffmpeg_binary};
use speech_services::infrastructure::device::resolve_device;
use speech_services::infrastructure::observability::{TracingConfig, init_tracing};
use speech_services::infrastructure::speech::SpeechSynthesizerFactory;
use speech_services::infrastructure::storage::LocalArtifactStore;
use speech_services::presentation::config::{ServiceKind, Settings, SpeechProviderSetting};
use speech_services::presentation::{TtsState, create_tts_router, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let service = ServiceKind::Tts;
    let settings = Settings::load(service)?;

    init_tracing(&TracingConfig::new(
        service.name(),
        &settings.logging.level,
        settings.logging.enable_json,
    ))?;

    let mut tts = settings.tts.clone();
    if settings.scaffold.enabled {
        tracing::warn!("Scaffold mode enabled, using mock speech synthesizer");
        tts.provider = SpeechProviderSetting::Mock;
    }

    let device = resolve_device(settings.device.torch_device, settings.device.enable_gpu);
    tracing::info!(%device, provider = ?tts.provider, model = %tts.model_name, "Starting TTS service");

    if let Err(e) = check_ffmpeg_binary(&tts.ffmpeg_binary) {
        tracing::warn!(error = %e, "ffmpeg unavailable, mp3 output will fail");
    }

    let store: Arc<dyn ArtifactStore> = Arc::new(LocalArtifactStore::new(&tts.audio_output_dir)?);
    let converter: Arc<dyn AudioConverter> =
        Arc::new(FfmpegAudioConverter::new(tts.ffmpeg_binary.clone()));

    let janitor = Arc::new(TempFileJanitor::new(
        Arc::clone(&store),
        Duration::from_secs(tts.audio_file_max_age_secs),
    ));
    let _periodic_sweep = janitor.spawn_periodic(Duration::from_secs(tts.cleanup_interval_secs));

    let synthesizer = Arc::new(ModelSlot::new(
        "xtts",
        SpeechSynthesizerFactory::loader(tts.clone(), settings.scaffold.mock_latency()),
    ));
    synthesizer.spawn_load();

    let speech_service = Arc::new(SpeechService::new(
        synthesizer,
        store,
        converter,
        janitor,
        tts.max_text_length,
        tts.default_language,
    ));

    let state = TtsState {
        speech_service,
        settings: tts,
        device,
    };

    serve(create_tts_router(state), &settings.server).await
}
