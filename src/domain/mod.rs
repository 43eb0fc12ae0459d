mod artifact_id;
mod artifact_name;
mod audio_format;
mod language;
mod transcript;
mod voice;

pub use artifact_id::ArtifactId;
pub use artifact_name::{ArtifactName, InvalidArtifactName};
pub use audio_format::AudioFormat;
pub use language::{Language, LanguagePreference};
pub use transcript::Transcript;
pub use voice::{DEFAULT_SPEAKER, Emotion, MAX_SPEED, MIN_SPEED, VoiceInfo, VoiceSettings};
