use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{AudioConversionError, AudioConverter, ConversionTarget};
use crate::domain::AudioFormat;

use super::audio_decoder::decode_audio;
use super::wav_encoder::encode_wav_pcm16;

/// In-process converter: symphonia decode, rubato resample, hound encode.
/// Only produces WAV.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaAudioConverter;

#[async_trait]
impl AudioConverter for SymphoniaAudioConverter {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        target: ConversionTarget,
    ) -> Result<(), AudioConversionError> {
        if target.format != AudioFormat::Wav {
            return Err(AudioConversionError::UnsupportedTarget(target.format));
        }
        if target.channels.is_some_and(|c| c != 1) {
            return Err(AudioConversionError::EncodingFailed(
                "only mono output is supported".to_string(),
            ));
        }

        let data = tokio::fs::read(input).await?;
        let sample_rate = target.sample_rate;

        let wav = tokio::task::spawn_blocking(move || {
            let audio = decode_audio(&data, sample_rate)?;
            encode_wav_pcm16(&audio.samples, audio.sample_rate)
        })
        .await
        .map_err(|e| AudioConversionError::DecodingFailed(format!("decoder task: {}", e)))??;

        tokio::fs::write(output, wav).await?;
        Ok(())
    }
}
