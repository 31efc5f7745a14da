//! Settings errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The extension storage could not be reached (extension reloaded)
    #[error("settings store unavailable: {0}")]
    Unavailable(String),

    /// Stored data did not match the expected shape
    #[error("invalid settings: {0}")]
    Invalid(String),

    #[error("Please enter your {provider} API key")]
    MissingApiKey { provider: &'static str },

    #[error("Invalid {provider} API key format. Key should start with \"{prefix}\"")]
    BadApiKeyFormat {
        provider: &'static str,
        prefix: &'static str,
    },

    #[error("Please enter a word to add")]
    EmptyWord,

    #[error("Please enter single words only (no spaces): {0}")]
    NotASingleWord(String),

    #[error("Word is too long (max {max} characters)")]
    WordTooLong { max: usize },

    #[error("\"{0}\" is already in your dictionary")]
    DuplicateWord(String),

    #[error("Dictionary is full (max {max} words)")]
    DictionaryFull { max: usize },
}
