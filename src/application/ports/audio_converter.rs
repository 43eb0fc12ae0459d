use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::AudioFormat;

pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionTarget {
    pub format: AudioFormat,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
}

impl ConversionTarget {
    /// 16 kHz mono 16-bit PCM, the input Whisper expects.
    pub fn whisper_wav() -> Self {
        Self {
            format: AudioFormat::Wav,
            sample_rate: Some(WHISPER_SAMPLE_RATE),
            channels: Some(1),
        }
    }

    pub fn encode_as(format: AudioFormat) -> Self {
        Self {
            format,
            sample_rate: None,
            channels: None,
        }
    }
}

#[async_trait]
pub trait AudioConverter: Send + Sync {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        target: ConversionTarget,
    ) -> Result<(), AudioConversionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioConversionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("audio encoding failed: {0}")]
    EncodingFailed(String),
    #[error("transcoder process failed: {0}")]
    ProcessFailed(String),
    #[error("transcoder binary not available: {0}")]
    BinaryNotFound(String),
    #[error("unsupported conversion target: {0}")]
    UnsupportedTarget(AudioFormat),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
