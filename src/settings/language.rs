//! Tones and languages offered in the panel

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rewrite tone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    Friendly,
    Formal,
    Concise,
    /// Also the fallback for unknown stored values
    #[default]
    #[serde(other)]
    Professional,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Friendly,
        Tone::Formal,
        Tone::Concise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
            Tone::Concise => "concise",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code for automatic language detection
pub const AUTO: &str = "auto";

/// Supported language codes and display names
pub const LANGUAGES: &[(&str, &str)] = &[
    (AUTO, "Auto-detect"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
];

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn is_known_language(code: &str) -> bool {
    language_name(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tone_falls_back_to_professional() {
        let tone: Tone = serde_json::from_str("\"pirate\"").unwrap();
        assert_eq!(tone, Tone::Professional);
        let tone: Tone = serde_json::from_str("\"concise\"").unwrap();
        assert_eq!(tone, Tone::Concise);
    }

    #[test]
    fn test_language_names() {
        assert_eq!(language_name("de"), Some("German"));
        assert_eq!(language_name(AUTO), Some("Auto-detect"));
        assert_eq!(language_name("xx"), None);
    }
}
