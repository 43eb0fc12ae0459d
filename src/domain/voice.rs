use serde::{Deserialize, Serialize};

use super::language::LanguagePreference;

pub const DEFAULT_SPEAKER: &str = "default";
pub const MIN_SPEED: f64 = 0.5;
pub const MAX_SPEED: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Neutral,
    Professional,
    Friendly,
    Excited,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub speaker: Option<String>,
    pub speed: Option<f64>,
    pub emotion: Option<Emotion>,
    pub language: Option<LanguagePreference>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            speaker: Some(DEFAULT_SPEAKER.to_string()),
            speed: Some(1.0),
            emotion: Some(Emotion::Neutral),
            language: None,
        }
    }
}

impl VoiceSettings {
    pub fn speed(&self) -> f64 {
        self.speed.unwrap_or(1.0)
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion.unwrap_or_default()
    }

    /// Speaker explicitly asked for, ignoring the `default` placeholder.
    pub fn requested_speaker(&self) -> Option<&str> {
        self.speaker
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != DEFAULT_SPEAKER)
    }

    pub fn speed_in_range(&self) -> bool {
        (MIN_SPEED..=MAX_SPEED).contains(&self.speed())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceInfo {
    pub id: String,
    pub name: String,
    pub language: String,
    pub gender: String,
    pub description: String,
}

impl VoiceInfo {
    pub fn builtin() -> Vec<VoiceInfo> {
        vec![
            VoiceInfo {
                id: "default".to_string(),
                name: "Default Voice".to_string(),
                language: "en".to_string(),
                gender: "neutral".to_string(),
                description: "Default XTTSv2 voice".to_string(),
            },
            VoiceInfo {
                id: "professional".to_string(),
                name: "Professional Voice".to_string(),
                language: "en".to_string(),
                gender: "neutral".to_string(),
                description: "Professional tone for business communications".to_string(),
            },
        ]
    }

    pub fn from_speaker(speaker: &str) -> Self {
        Self {
            id: speaker.to_string(),
            name: speaker.to_string(),
            language: "multilingual".to_string(),
            gender: "unknown".to_string(),
            description: "Speaker provided by the loaded voice model".to_string(),
        }
    }
}
