use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{AudioConversionError, AudioConverter, ConversionTarget};

/// Tries the primary converter and falls back to the secondary on error.
pub struct FallbackAudioConverter {
    primary: Arc<dyn AudioConverter>,
    fallback: Arc<dyn AudioConverter>,
}

impl FallbackAudioConverter {
    pub fn new(primary: Arc<dyn AudioConverter>, fallback: Arc<dyn AudioConverter>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl AudioConverter for FallbackAudioConverter {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        target: ConversionTarget,
    ) -> Result<(), AudioConversionError> {
        match self.primary.convert(input, output, target).await {
            Ok(()) => Ok(()),
            Err(primary_err) => {
                tracing::error!(error = %primary_err, "Audio conversion error, trying fallback converter");
                self.fallback
                    .convert(input, output, target)
                    .await
                    .inspect_err(|e| tracing::error!(error = %e, "Fallback audio conversion error"))
            }
        }
    }
}
