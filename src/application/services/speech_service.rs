use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, AudioConversionError, AudioConverter, ConversionTarget,
    SpeechSynthesizer, SynthesisError, SynthesisRequest,
};
use crate::domain::{
    ArtifactId, ArtifactName, AudioFormat, Language, LanguagePreference, VoiceSettings,
};
use crate::infrastructure::observability::sanitize_text;

use super::language_detector::resolve_language;
use super::model_slot::ModelSlot;
use super::temp_janitor::TempFileJanitor;

const WORDS_PER_MINUTE: f64 = 150.0;
const ENGLISH_SPEAKER: &str = "Claribel Dervla";
const RUSSIAN_SPEAKER: &str = "Dmitrii";

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_settings: VoiceSettings,
    pub audio_format: AudioFormat,
    pub language: Option<LanguagePreference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOutcome {
    pub artifact: ArtifactName,
    pub file_size: u64,
    pub estimated_duration_secs: f64,
    pub language: Language,
    pub speaker: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("TTS model not loaded")]
    ModelNotLoaded,
    #[error("Text cannot be empty")]
    EmptyText,
    #[error("text exceeds {limit} characters ({length} given)")]
    TextTooLong { length: usize, limit: usize },
    #[error("speed must be between 0.5 and 2.0, got {0}")]
    InvalidSpeed(f64),
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(AudioFormat),
    #[error("{0}")]
    Synthesis(#[from] SynthesisError),
    #[error("encoding: {0}")]
    Encoding(#[from] AudioConversionError),
    #[error("storage: {0}")]
    Storage(#[from] ArtifactStoreError),
}

pub struct SpeechService {
    synthesizer: Arc<ModelSlot<dyn SpeechSynthesizer>>,
    store: Arc<dyn ArtifactStore>,
    converter: Arc<dyn AudioConverter>,
    janitor: Arc<TempFileJanitor>,
    max_text_length: usize,
    default_language: Language,
}

impl SpeechService {
    pub fn new(
        synthesizer: Arc<ModelSlot<dyn SpeechSynthesizer>>,
        store: Arc<dyn ArtifactStore>,
        converter: Arc<dyn AudioConverter>,
        janitor: Arc<TempFileJanitor>,
        max_text_length: usize,
        default_language: Language,
    ) -> Self {
        Self {
            synthesizer,
            store,
            converter,
            janitor,
            max_text_length,
            default_language,
        }
    }

    pub fn synthesizer(&self) -> &Arc<ModelSlot<dyn SpeechSynthesizer>> {
        &self.synthesizer
    }

    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    /// Speakers of the loaded model, or nothing while it is still loading.
    pub async fn model_speakers(&self) -> Vec<String> {
        let Some(synthesizer) = self.synthesizer.loaded() else {
            return Vec::new();
        };
        synthesizer.speakers().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to list model speakers");
            Vec::new()
        })
    }

    pub async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechOutcome, SpeechServiceError> {
        self.validate(&request)?;

        let Some(synthesizer) = self.synthesizer.loaded() else {
            self.synthesizer.spawn_load();
            return Err(SpeechServiceError::ModelNotLoaded);
        };

        let clean_text = request.text.trim();
        if clean_text.is_empty() {
            return Err(SpeechServiceError::EmptyText);
        }

        tracing::info!(text = %sanitize_text(clean_text), "Generating speech");

        let language = resolve_language(
            request.language,
            request.voice_settings.language,
            clean_text,
            self.default_language,
        );

        let available = synthesizer.speakers().await?;
        let speaker = select_speaker(
            language,
            request.voice_settings.requested_speaker(),
            &available,
        );

        tracing::info!(
            language = %language,
            speaker = speaker.as_deref().unwrap_or("<model default>"),
            emotion = ?request.voice_settings.emotion(),
            "Using language for text generation"
        );

        let wav = synthesizer
            .synthesize(&SynthesisRequest {
                text: clean_text.to_string(),
                language,
                speaker: speaker.clone(),
                speed: request.voice_settings.speed() as f32,
            })
            .await?;

        let id = ArtifactId::new();
        let artifact = ArtifactName::speech(&id, request.audio_format);
        self.store_audio(&id, &artifact, request.audio_format, wav)
            .await?;

        let file_size = self.store.head(&artifact).await?;
        self.janitor.schedule();

        Ok(SpeechOutcome {
            artifact,
            file_size,
            estimated_duration_secs: estimate_speech_duration(clean_text),
            language,
            speaker,
        })
    }

    fn validate(&self, request: &SpeechRequest) -> Result<(), SpeechServiceError> {
        let length = request.text.chars().count();
        if length > self.max_text_length {
            return Err(SpeechServiceError::TextTooLong {
                length,
                limit: self.max_text_length,
            });
        }

        if !request.voice_settings.speed_in_range() {
            return Err(SpeechServiceError::InvalidSpeed(
                request.voice_settings.speed(),
            ));
        }

        if !request.audio_format.is_speech_output() {
            return Err(SpeechServiceError::UnsupportedFormat(request.audio_format));
        }

        Ok(())
    }

    async fn store_audio(
        &self,
        id: &ArtifactId,
        artifact: &ArtifactName,
        format: AudioFormat,
        wav: Vec<u8>,
    ) -> Result<(), SpeechServiceError> {
        if format == AudioFormat::Wav {
            self.store.put(artifact, Bytes::from(wav)).await?;
            return Ok(());
        }

        let source = ArtifactName::speech_source(id);
        self.store.put(&source, Bytes::from(wav)).await?;

        let encoded = self
            .converter
            .convert(
                &self.store.local_path(&source),
                &self.store.local_path(artifact),
                ConversionTarget::encode_as(format),
            )
            .await;

        if let Err(e) = self.store.delete(&source).await {
            tracing::warn!(file = %source, error = %e, "Failed to remove intermediate audio");
        }

        Ok(encoded?)
    }
}

/// Chooses the speaker passed to the voice model.
///
/// An explicitly requested speaker the model knows wins. Otherwise the
/// per-language default is used when available, then the first speaker
/// the model offers. Models without speakers get none.
pub fn select_speaker(
    language: Language,
    requested: Option<&str>,
    available: &[String],
) -> Option<String> {
    if let Some(requested) = requested {
        if available.iter().any(|s| s == requested) {
            return Some(requested.to_string());
        }
    }

    let preferred = match language {
        Language::English => ENGLISH_SPEAKER,
        Language::Russian => RUSSIAN_SPEAKER,
    };

    if available.iter().any(|s| s == preferred) {
        return Some(preferred.to_string());
    }

    available.first().cloned()
}

/// Rough speaking time at 150 words per minute.
pub fn estimate_speech_duration(text: &str) -> f64 {
    let words = text.split_whitespace().count() as f64;
    words / WORDS_PER_MINUTE * 60.0
}
