use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    ModelLoadError, ModelLoader, TranscriptionEngine, TranscriptionError,
};
use crate::infrastructure::device::ComputeDevice;
use crate::presentation::config::{SttSettings, TranscriptionProviderSetting};

use super::azure_whisper_engine::AzureWhisperEngine;
use super::candle_whisper_engine::CandleWhisperEngine;
use super::mock_transcription_engine::MockTranscriptionEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &SttSettings,
        device: ComputeDevice,
        mock_latency: Duration,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match settings.provider {
            TranscriptionProviderSetting::Local => {
                let engine = CandleWhisperEngine::new(&settings.whisper_model, device)?;
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::OpenAi => {
                let key = settings.api_key.clone().ok_or_else(|| {
                    TranscriptionError::ModelLoadFailed(
                        "API key required for OpenAI Whisper".to_string(),
                    )
                })?;
                let engine = OpenAiWhisperEngine::new(
                    key,
                    settings.base_url.clone(),
                    Some(settings.whisper_model.clone()),
                );
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Azure => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    TranscriptionError::ModelLoadFailed("base_url required for Azure".to_string())
                })?;
                let deployment = settings.azure_deployment.as_deref().ok_or_else(|| {
                    TranscriptionError::ModelLoadFailed(
                        "azure_deployment required for Azure".to_string(),
                    )
                })?;
                let key = settings.api_key.as_deref().ok_or_else(|| {
                    TranscriptionError::ModelLoadFailed(
                        "API key required for Azure Whisper".to_string(),
                    )
                })?;
                let engine =
                    AzureWhisperEngine::new(base_url, deployment, key, &settings.azure_api_version);
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Mock => {
                Ok(Arc::new(MockTranscriptionEngine::new(mock_latency)))
            }
        }
    }

    /// Deferred construction for a [`ModelSlot`](crate::application::services::ModelSlot).
    pub fn loader(
        settings: SttSettings,
        device: ComputeDevice,
        mock_latency: Duration,
    ) -> ModelLoader<dyn TranscriptionEngine> {
        Arc::new(move || {
            Self::create(&settings, device, mock_latency)
                .map_err(|e| ModelLoadError::Failed(e.to_string()))
        })
    }
}
