use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::application::ports::AudioConversionError;

/// Encodes mono float samples as 16-bit PCM WAV.
pub fn encode_wav_pcm16(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, AudioConversionError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| AudioConversionError::EncodingFailed(format!("wav header: {}", e)))?;
        for &sample in samples {
            let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(scaled)
                .map_err(|e| AudioConversionError::EncodingFailed(format!("wav sample: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| AudioConversionError::EncodingFailed(format!("wav finalize: {}", e)))?;
    }

    Ok(cursor.into_inner())
}
