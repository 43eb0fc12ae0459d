use std::collections::HashMap;
use std::time::Duration;

use speech_services::application::ports::TranscriptionError;
use speech_services::infrastructure::audio::{MOCK_TRANSCRIPT, TranscriptionEngineFactory};
use speech_services::infrastructure::device::ComputeDevice;
use speech_services::presentation::config::{
    ServiceKind, Settings, SttSettings, TranscriptionProviderSetting,
};

fn stt_settings(provider: TranscriptionProviderSetting) -> SttSettings {
    let mut settings = Settings::load_with(ServiceKind::Stt, HashMap::new())
        .unwrap()
        .stt;
    settings.provider = provider;
    settings
}

#[tokio::test]
async fn given_mock_provider_when_creating_then_scaffold_engine_is_returned() {
    let settings = stt_settings(TranscriptionProviderSetting::Mock);

    let engine =
        TranscriptionEngineFactory::create(&settings, ComputeDevice::Cpu, Duration::ZERO).unwrap();
    let transcript = engine.transcribe(b"garbage").await.unwrap();

    assert_eq!(transcript.text, MOCK_TRANSCRIPT);
}

#[test]
fn given_openai_provider_without_key_when_creating_then_model_load_error() {
    let settings = stt_settings(TranscriptionProviderSetting::OpenAi);

    let result = TranscriptionEngineFactory::create(&settings, ComputeDevice::Cpu, Duration::ZERO);

    assert!(matches!(result, Err(TranscriptionError::ModelLoadFailed(_))));
}

#[test]
fn given_azure_provider_without_deployment_when_creating_then_model_load_error() {
    let mut settings = stt_settings(TranscriptionProviderSetting::Azure);
    settings.base_url = Some("https://example.openai.azure.com".to_string());
    settings.api_key = Some("key".to_string());

    let result = TranscriptionEngineFactory::create(&settings, ComputeDevice::Cpu, Duration::ZERO);

    assert!(matches!(result, Err(TranscriptionError::ModelLoadFailed(msg)) if msg.contains("azure_deployment")));
}

#[test]
fn given_openai_provider_with_key_when_creating_then_engine_is_built() {
    let mut settings = stt_settings(TranscriptionProviderSetting::OpenAi);
    settings.api_key = Some("sk-test".to_string());

    assert!(
        TranscriptionEngineFactory::create(&settings, ComputeDevice::Cpu, Duration::ZERO).is_ok()
    );
}

#[test]
fn given_mock_provider_when_running_loader_then_engine_is_produced() {
    let loader = TranscriptionEngineFactory::loader(
        stt_settings(TranscriptionProviderSetting::Mock),
        ComputeDevice::Cpu,
        Duration::ZERO,
    );

    assert!(loader().is_ok());
}
