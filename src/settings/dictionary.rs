//! Custom dictionary: words the assistant must leave alone

use serde::{Deserialize, Serialize};

use super::errors::SettingsError;

pub const MAX_WORD_LEN: usize = 50;
pub const MAX_WORDS: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomDictionary {
    words: Vec<String>,
}

impl CustomDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive membership
    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.words.iter().any(|w| w.to_lowercase() == word)
    }

    /// Add a single word after validating it
    pub fn add(&mut self, word: &str) -> Result<(), SettingsError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(SettingsError::EmptyWord);
        }
        if word.chars().any(char::is_whitespace) {
            return Err(SettingsError::NotASingleWord(word.to_string()));
        }
        if word.chars().count() > MAX_WORD_LEN {
            return Err(SettingsError::WordTooLong { max: MAX_WORD_LEN });
        }
        if self.contains(word) {
            return Err(SettingsError::DuplicateWord(word.to_string()));
        }
        if self.words.len() >= MAX_WORDS {
            return Err(SettingsError::DictionaryFull { max: MAX_WORDS });
        }
        self.words.push(word.to_string());
        Ok(())
    }

    /// Remove an exact word; returns whether it was present
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| w != word);
        self.words.len() != before
    }
}
