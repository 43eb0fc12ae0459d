use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use speech_services::application::ports::{
    AudioConversionError, AudioConverter, ConversionTarget,
};
use speech_services::infrastructure::audio::FallbackAudioConverter;

struct ScriptedConverter {
    calls: AtomicUsize,
    outcome: fn() -> Result<(), AudioConversionError>,
}

impl ScriptedConverter {
    fn new(outcome: fn() -> Result<(), AudioConversionError>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioConverter for ScriptedConverter {
    async fn convert(
        &self,
        _input: &Path,
        _output: &Path,
        _target: ConversionTarget,
    ) -> Result<(), AudioConversionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.outcome)()
    }
}

fn succeed() -> Result<(), AudioConversionError> {
    Ok(())
}

fn process_failed() -> Result<(), AudioConversionError> {
    Err(AudioConversionError::ProcessFailed("primary".to_string()))
}

fn decoding_failed() -> Result<(), AudioConversionError> {
    Err(AudioConversionError::DecodingFailed("fallback".to_string()))
}

async fn run(converter: &FallbackAudioConverter) -> Result<(), AudioConversionError> {
    converter
        .convert(
            Path::new("in.mp3"),
            Path::new("out.wav"),
            ConversionTarget::whisper_wav(),
        )
        .await
}

#[tokio::test]
async fn given_primary_succeeds_when_converting_then_fallback_is_not_called() {
    let primary = ScriptedConverter::new(succeed);
    let fallback = ScriptedConverter::new(succeed);
    let converter = FallbackAudioConverter::new(primary.clone(), fallback.clone());

    run(&converter).await.unwrap();

    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn given_primary_fails_when_converting_then_fallback_result_is_returned() {
    let primary = ScriptedConverter::new(process_failed);
    let fallback = ScriptedConverter::new(succeed);
    let converter = FallbackAudioConverter::new(primary.clone(), fallback.clone());

    run(&converter).await.unwrap();

    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 1);
}

#[tokio::test]
async fn given_both_fail_when_converting_then_fallback_error_is_returned() {
    let converter = FallbackAudioConverter::new(
        ScriptedConverter::new(process_failed),
        ScriptedConverter::new(decoding_failed),
    );

    let result = run(&converter).await;

    assert!(matches!(result, Err(AudioConversionError::DecodingFailed(msg)) if msg == "fallback"));
}
