/// Result of running an audio clip through a transcription engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub language: String,
    pub duration_secs: f64,
}

impl Transcript {
    pub fn new(text: impl Into<String>, language: impl Into<String>, duration_secs: f64) -> Self {
        let language = language.into();
        Self {
            text: text.into().trim().to_string(),
            language: if language.trim().is_empty() {
                "unknown".to_string()
            } else {
                language
            },
            duration_secs,
        }
    }
}
