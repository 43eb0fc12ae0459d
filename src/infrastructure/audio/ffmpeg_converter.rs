use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioConversionError, AudioConverter, ConversionTarget};
use crate::domain::AudioFormat;

pub const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

/// Transcodes audio by shelling out to an `ffmpeg` binary.
pub struct FfmpegAudioConverter {
    binary: String,
}

impl FfmpegAudioConverter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn codec_for(format: AudioFormat) -> Option<&'static str> {
        match format {
            AudioFormat::Wav => Some("pcm_s16le"),
            AudioFormat::Mp3 => Some("libmp3lame"),
            AudioFormat::Flac => Some("flac"),
            AudioFormat::Ogg => Some("libvorbis"),
            _ => None,
        }
    }
}

impl Default for FfmpegAudioConverter {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG_BINARY)
    }
}

#[async_trait]
impl AudioConverter for FfmpegAudioConverter {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        target: ConversionTarget,
    ) -> Result<(), AudioConversionError> {
        let codec = Self::codec_for(target.format)
            .ok_or(AudioConversionError::UnsupportedTarget(target.format))?;

        let mut command = Command::new(&self.binary);
        command
            .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(input)
            .args(["-acodec", codec]);
        if let Some(channels) = target.channels {
            command.arg("-ac").arg(channels.to_string());
        }
        if let Some(rate) = target.sample_rate {
            command.arg("-ar").arg(rate.to_string());
        }
        command
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            binary = %self.binary,
            input = %input.display(),
            output = %output.display(),
            codec,
            "Running ffmpeg conversion"
        );

        let result = command.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AudioConversionError::BinaryNotFound(self.binary.clone())
            } else {
                AudioConversionError::Io(e)
            }
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(AudioConversionError::ProcessFailed(format!(
                "{} exited with {}: {}",
                self.binary, result.status, stderr
            )));
        }

        Ok(())
    }
}

/// Confirms the transcoder binary can be executed.
pub fn check_ffmpeg_binary(binary: &str) -> Result<(), AudioConversionError> {
    let output = std::process::Command::new(binary)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| AudioConversionError::BinaryNotFound(format!("{}: {}", binary, e)))?;

    if output.success() {
        Ok(())
    } else {
        Err(AudioConversionError::BinaryNotFound(format!(
            "{} -version exited with {}",
            binary, output
        )))
    }
}
