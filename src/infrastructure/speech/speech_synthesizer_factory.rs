use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::application::ports::{ModelLoadError, ModelLoader, SpeechSynthesizer, SynthesisError};
use crate::presentation::config::{SpeechProviderSetting, TtsSettings};

use super::mock_speech_synthesizer::MockSpeechSynthesizer;
use super::openai_speech_synthesizer::OpenAiSpeechSynthesizer;
use super::xtts_server_synthesizer::XttsServerSynthesizer;

pub struct SpeechSynthesizerFactory;

impl SpeechSynthesizerFactory {
    pub async fn create(
        settings: &TtsSettings,
        mock_latency: Duration,
    ) -> Result<Arc<dyn SpeechSynthesizer>, SynthesisError> {
        match settings.provider {
            SpeechProviderSetting::Xtts => {
                let synthesizer =
                    XttsServerSynthesizer::connect(&settings.base_url, &settings.model_name).await?;
                Ok(Arc::new(synthesizer))
            }
            SpeechProviderSetting::OpenAi => {
                let key = settings.api_key.clone().ok_or_else(|| {
                    SynthesisError::ModelLoadFailed(
                        "API key required for OpenAI speech".to_string(),
                    )
                })?;
                Ok(Arc::new(OpenAiSpeechSynthesizer::new(
                    key,
                    Some(settings.base_url.clone()),
                    Some(settings.voice_model.clone()),
                )))
            }
            SpeechProviderSetting::Mock => Ok(Arc::new(MockSpeechSynthesizer::new(
                vec!["Claribel Dervla".to_string(), "Dmitrii".to_string()],
                mock_latency,
            ))),
        }
    }

    /// Loader run on the blocking pool; drives the async constructor on the
    /// current runtime.
    pub fn loader(settings: TtsSettings, mock_latency: Duration) -> ModelLoader<dyn SpeechSynthesizer> {
        Arc::new(move || {
            let handle = Handle::try_current()
                .map_err(|e| ModelLoadError::Failed(format!("no async runtime: {}", e)))?;
            handle
                .block_on(Self::create(&settings, mock_latency))
                .map_err(|e| ModelLoadError::Failed(e.to_string()))
        })
    }
}
