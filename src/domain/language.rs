use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the speech service synthesizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
        }
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "en" => Ok(Self::English),
            "ru" => Ok(Self::Russian),
            other => Err(format!("Invalid language: {}. Expected: en or ru", other)),
        }
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Language as requested by a caller: a concrete one, or `auto` for detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguagePreference {
    Auto,
    Fixed(Language),
}

impl TryFrom<String> for LanguagePreference {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == "auto" {
            return Ok(Self::Auto);
        }
        Language::try_from(s)
            .map(Self::Fixed)
            .map_err(|_| "language must be one of: en, ru, auto".to_string())
    }
}

impl From<LanguagePreference> for String {
    fn from(pref: LanguagePreference) -> Self {
        match pref {
            LanguagePreference::Auto => "auto".to_string(),
            LanguagePreference::Fixed(language) => language.code().to_string(),
        }
    }
}
