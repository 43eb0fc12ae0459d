use crate::domain::{Language, LanguagePreference};

const RUSSIAN_ALPHABET: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";

/// Picks English or Russian by counting letters from each alphabet.
/// Ties, including text with no letters at all, go to English.
pub fn detect_language(text: &str) -> Language {
    let lowered = text.to_lowercase();
    let (russian, english) = lowered.chars().fold((0usize, 0usize), |(ru, en), c| {
        if RUSSIAN_ALPHABET.contains(c) {
            (ru + 1, en)
        } else if c.is_ascii_lowercase() {
            (ru, en + 1)
        } else {
            (ru, en)
        }
    });

    if russian > english {
        Language::Russian
    } else {
        Language::English
    }
}

/// Request-level language wins over the voice settings; `auto` or absence
/// at both levels falls through to detection.
pub fn resolve_language(
    request_language: Option<LanguagePreference>,
    voice_language: Option<LanguagePreference>,
    text: &str,
    default_language: Language,
) -> Language {
    match request_language.or(voice_language) {
        Some(LanguagePreference::Fixed(language)) => language,
        Some(LanguagePreference::Auto) | None if text.trim().is_empty() => default_language,
        _ => detect_language(text),
    }
}
