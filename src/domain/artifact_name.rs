use std::fmt;

use super::artifact_id::ArtifactId;
use super::audio_format::AudioFormat;

const MAX_UPLOAD_NAME_LEN: usize = 96;

/// Flat file name of an artifact inside a service's working directory.
///
/// Names never contain path separators or `..`, so joining one onto the
/// store root cannot escape it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub fn upload(id: &ArtifactId, original_filename: &str) -> Self {
        Self(format!(
            "input_{}_{}",
            id.as_uuid(),
            sanitize_filename(original_filename)
        ))
    }

    pub fn converted(id: &ArtifactId) -> Self {
        Self(format!("converted_{}.wav", id.as_uuid()))
    }

    pub fn speech(id: &ArtifactId, format: AudioFormat) -> Self {
        Self(format!("tts_{}.{}", id.as_uuid(), format.extension()))
    }

    /// Intermediate WAV rendered before encoding to a compressed format.
    pub fn speech_source(id: &ArtifactId) -> Self {
        Self(format!("tts_{}.src.wav", id.as_uuid()))
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidArtifactName> {
        if raw.is_empty()
            || raw.starts_with('.')
            || raw.contains("..")
            || raw
                .chars()
                .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(InvalidArtifactName(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn format(&self) -> Option<AudioFormat> {
        AudioFormat::from_filename(&self.0)
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid artifact name: {0}")]
pub struct InvalidArtifactName(pub String);

fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    let mut sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", ".");
    }

    if sanitized.len() > MAX_UPLOAD_NAME_LEN {
        sanitized = sanitized[sanitized.len() - MAX_UPLOAD_NAME_LEN..].to_string();
    }

    if sanitized.is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}
