use async_trait::async_trait;

use crate::domain::Language;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: Language,
    pub speaker: Option<String>,
    pub speed: f32,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speaker names the underlying voice model knows. May be empty.
    async fn speakers(&self) -> Result<Vec<String>, SynthesisError>;

    /// Renders the request to WAV bytes.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
