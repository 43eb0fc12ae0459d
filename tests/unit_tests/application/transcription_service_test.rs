use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use speech_services::application::ports::{
    ArtifactStore, AudioConversionError, AudioConverter, ConversionTarget, ModelLoadError,
    ModelLoader, TranscriptionEngine, TranscriptionError, WHISPER_SAMPLE_RATE,
};
use speech_services::application::services::{
    AudioUpload, ModelSlot, TempFileJanitor, TranscriptionService, TranscriptionServiceError,
};
use speech_services::domain::Transcript;
use speech_services::infrastructure::storage::LocalArtifactStore;

use crate::support::silent_wav;

struct EchoEngine {
    seen: Mutex<Vec<Vec<u8>>>,
    fail: bool,
}

impl EchoEngine {
    fn new(fail: bool) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            fail,
        }
    }
}

#[async_trait]
impl TranscriptionEngine for EchoEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<Transcript, TranscriptionError> {
        self.seen.lock().unwrap().push(audio_data.to_vec());
        if self.fail {
            return Err(TranscriptionError::TranscriptionFailed("decoder crashed".to_string()));
        }
        Ok(Transcript::new("  hello world \n", "", 2.5))
    }
}

/// Records the conversions it was asked to do and writes a marker file.
#[derive(Default)]
struct MarkerConverter {
    targets: Mutex<Vec<ConversionTarget>>,
    fail: bool,
}

#[async_trait]
impl AudioConverter for MarkerConverter {
    async fn convert(
        &self,
        _input: &Path,
        output: &Path,
        target: ConversionTarget,
    ) -> Result<(), AudioConversionError> {
        self.targets.lock().unwrap().push(target);
        if self.fail {
            return Err(AudioConversionError::ProcessFailed("exit status 1".to_string()));
        }
        tokio::fs::write(output, b"converted").await?;
        Ok(())
    }
}

struct Fixture {
    dir: tempfile::TempDir,
    engine: Arc<EchoEngine>,
    converter: Arc<MarkerConverter>,
    service: TranscriptionService,
}

fn fixture(engine: EchoEngine, converter: MarkerConverter, max_audio_size: usize) -> Fixture {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn ArtifactStore> = Arc::new(LocalArtifactStore::new(dir.path()).unwrap());
    let engine = Arc::new(engine);
    let converter = Arc::new(converter);
    let slot = Arc::new(ModelSlot::preloaded(
        "whisper",
        Arc::clone(&engine) as Arc<dyn TranscriptionEngine>,
    ));
    let janitor = Arc::new(TempFileJanitor::new(
        Arc::clone(&store),
        Duration::from_secs(1800),
    ));
    let service = TranscriptionService::new(
        slot,
        store,
        Arc::clone(&converter) as Arc<dyn AudioConverter>,
        janitor,
        max_audio_size,
    );

    Fixture {
        dir,
        engine,
        converter,
        service,
    }
}

fn upload(filename: &str, data: Vec<u8>) -> AudioUpload {
    AudioUpload {
        filename: filename.to_string(),
        data: Bytes::from(data),
    }
}

fn dir_is_empty(dir: &tempfile::TempDir) -> bool {
    std::fs::read_dir(dir.path()).unwrap().next().is_none()
}

#[tokio::test]
async fn given_wav_upload_when_transcribing_then_original_bytes_reach_engine_unconverted() {
    let fx = fixture(EchoEngine::new(false), MarkerConverter::default(), 1 << 20);
    let wav = silent_wav(0.1, 16_000);

    let outcome = fx.service.transcribe(upload("clip.WAV", wav.clone())).await.unwrap();

    assert_eq!(outcome.transcript.text, "hello world");
    assert_eq!(outcome.transcript.language, "unknown");
    assert_eq!(outcome.transcript.duration_secs, 2.5);
    assert!(fx.converter.targets.lock().unwrap().is_empty());
    assert_eq!(fx.engine.seen.lock().unwrap()[0], wav);
    assert!(dir_is_empty(&fx.dir));
}

#[tokio::test]
async fn given_mp3_upload_when_transcribing_then_converted_audio_reaches_engine() {
    let fx = fixture(EchoEngine::new(false), MarkerConverter::default(), 1 << 20);

    fx.service
        .transcribe(upload("voice.mp3", b"ID3 not really".to_vec()))
        .await
        .unwrap();

    let targets = fx.converter.targets.lock().unwrap().clone();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].sample_rate, Some(WHISPER_SAMPLE_RATE));
    assert_eq!(targets[0].channels, Some(1));
    assert_eq!(fx.engine.seen.lock().unwrap()[0], b"converted");
    assert!(dir_is_empty(&fx.dir));
}

#[tokio::test]
async fn given_failing_conversion_when_transcribing_then_original_bytes_are_used() {
    let converter = MarkerConverter {
        fail: true,
        ..MarkerConverter::default()
    };
    let fx = fixture(EchoEngine::new(false), converter, 1 << 20);

    let outcome = fx
        .service
        .transcribe(upload("voice.ogg", b"OggS payload".to_vec()))
        .await
        .unwrap();

    assert_eq!(outcome.transcript.text, "hello world");
    assert_eq!(fx.engine.seen.lock().unwrap()[0], b"OggS payload");
}

#[tokio::test]
async fn given_upload_over_limit_when_transcribing_then_too_large_and_nothing_written() {
    let fx = fixture(EchoEngine::new(false), MarkerConverter::default(), 8);

    let result = fx.service.transcribe(upload("clip.wav", vec![0u8; 9])).await;

    assert!(matches!(
        result,
        Err(TranscriptionServiceError::TooLarge { size: 9, limit: 8 })
    ));
    assert!(fx.engine.seen.lock().unwrap().is_empty());
    assert!(dir_is_empty(&fx.dir));
}

#[tokio::test]
async fn given_upload_exactly_at_limit_when_transcribing_then_accepted() {
    let fx = fixture(EchoEngine::new(false), MarkerConverter::default(), 8);

    assert!(fx.service.transcribe(upload("clip.wav", vec![0u8; 8])).await.is_ok());
}

#[tokio::test]
async fn given_engine_failure_when_transcribing_then_error_and_temp_files_removed() {
    let fx = fixture(EchoEngine::new(true), MarkerConverter::default(), 1 << 20);

    let result = fx.service.transcribe(upload("voice.flac", b"fLaC".to_vec())).await;

    assert!(matches!(result, Err(TranscriptionServiceError::Engine(_))));
    assert!(dir_is_empty(&fx.dir));
}

#[tokio::test]
async fn given_model_that_fails_to_load_when_transcribing_then_model_unavailable() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn ArtifactStore> = Arc::new(LocalArtifactStore::new(dir.path()).unwrap());
    let loader: ModelLoader<dyn TranscriptionEngine> =
        Arc::new(|| Err(ModelLoadError::Failed("no weights".to_string())));
    let janitor = Arc::new(TempFileJanitor::new(Arc::clone(&store), Duration::from_secs(1)));
    let service = TranscriptionService::new(
        Arc::new(ModelSlot::new("whisper", loader)),
        store,
        Arc::new(MarkerConverter::default()),
        janitor,
        1 << 20,
    );

    let result = service.transcribe(upload("clip.wav", vec![1, 2, 3])).await;

    assert!(matches!(
        result,
        Err(TranscriptionServiceError::ModelUnavailable(_))
    ));
}
