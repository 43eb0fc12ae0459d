use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, AudioConverter, ConversionTarget, ModelLoadError,
    TranscriptionEngine, TranscriptionError,
};
use crate::domain::{ArtifactId, ArtifactName, AudioFormat, Transcript};

use super::model_slot::ModelSlot;
use super::temp_janitor::TempFileJanitor;

#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub transcript: Transcript,
    pub processing_time: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("audio file too large: {size} bytes exceeds {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("model unavailable: {0}")]
    ModelUnavailable(#[from] ModelLoadError),
    #[error("storage: {0}")]
    Storage(#[from] ArtifactStoreError),
    #[error("{0}")]
    Engine(#[from] TranscriptionError),
}

pub struct TranscriptionService {
    engine: Arc<ModelSlot<dyn TranscriptionEngine>>,
    store: Arc<dyn ArtifactStore>,
    converter: Arc<dyn AudioConverter>,
    janitor: Arc<TempFileJanitor>,
    max_audio_size: usize,
}

impl TranscriptionService {
    pub fn new(
        engine: Arc<ModelSlot<dyn TranscriptionEngine>>,
        store: Arc<dyn ArtifactStore>,
        converter: Arc<dyn AudioConverter>,
        janitor: Arc<TempFileJanitor>,
        max_audio_size: usize,
    ) -> Self {
        Self {
            engine,
            store,
            converter,
            janitor,
            max_audio_size,
        }
    }

    pub fn engine(&self) -> &Arc<ModelSlot<dyn TranscriptionEngine>> {
        &self.engine
    }

    pub fn max_audio_size(&self) -> usize {
        self.max_audio_size
    }

    pub async fn transcribe(
        &self,
        upload: AudioUpload,
    ) -> Result<TranscriptionOutcome, TranscriptionServiceError> {
        let started = Instant::now();

        if upload.data.len() > self.max_audio_size {
            return Err(TranscriptionServiceError::TooLarge {
                size: upload.data.len(),
                limit: self.max_audio_size,
            });
        }

        let engine = self.engine.load().await?;

        let id = ArtifactId::new();
        let input = ArtifactName::upload(&id, &upload.filename);
        let converted = ArtifactName::converted(&id);

        let result = self
            .run(engine.as_ref(), &upload, &input, &converted)
            .await;

        for name in [&input, &converted] {
            match self.store.delete(name).await {
                Ok(()) | Err(ArtifactStoreError::NotFound(_)) => {}
                Err(e) => tracing::warn!(file = %name, error = %e, "Failed to clean up temp file"),
            }
        }

        let transcript = result?;
        self.janitor.schedule();

        let processing_time = started.elapsed();
        tracing::info!(
            language = %transcript.language,
            duration_secs = transcript.duration_secs,
            processing_ms = processing_time.as_millis() as u64,
            chars = transcript.text.len(),
            "Transcription completed"
        );

        Ok(TranscriptionOutcome {
            transcript,
            processing_time,
        })
    }

    async fn run(
        &self,
        engine: &dyn TranscriptionEngine,
        upload: &AudioUpload,
        input: &ArtifactName,
        converted: &ArtifactName,
    ) -> Result<Transcript, TranscriptionServiceError> {
        self.store.put(input, upload.data.clone()).await?;

        let mut audio_source = input;
        if AudioFormat::from_filename(&upload.filename) != Some(AudioFormat::Wav) {
            match self
                .converter
                .convert(
                    &self.store.local_path(input),
                    &self.store.local_path(converted),
                    ConversionTarget::whisper_wav(),
                )
                .await
            {
                Ok(()) => audio_source = converted,
                Err(e) => {
                    tracing::warn!(error = %e, filename = %upload.filename, "Audio conversion failed, using original");
                }
            }
        }

        let audio = self.store.fetch(audio_source).await?;

        tracing::info!(bytes = audio.len(), model = %self.engine.name(), "Transcribing audio");
        Ok(engine.transcribe(&audio).await?)
    }
}
