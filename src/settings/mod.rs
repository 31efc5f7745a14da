//! User settings
//!
//! Read once when the panel opens. The store belongs to the extension and
//! can vanish mid-session (extension reloaded); callers then continue with
//! [`Settings::default`].
//!
//! ## Modules
//!
//! - `language`: Tones and supported languages
//! - `dictionary`: Custom dictionary validation
//! - `errors`: Settings error type

pub mod dictionary;
pub mod errors;
pub mod language;

use serde::{Deserialize, Serialize};
use std::future::Future;

pub use dictionary::CustomDictionary;
pub use errors::SettingsError;
pub use language::{is_known_language, language_name, Tone, AUTO, LANGUAGES};

/// Allowed `maxTokens` values
pub const MAX_TOKEN_OPTIONS: [u32; 6] = [512, 1024, 2048, 4096, 8192, 16384];
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Storage keys read by [`SettingsStore`] implementations
pub const SETTINGS_KEYS: &[&str] = &[
    "apiProvider",
    "claudeApiKey",
    "openaiApiKey",
    "maxTokens",
    "theme",
    "defaultGrammarLang",
    "defaultTone",
    "defaultFromLang",
    "defaultToLang",
    "customDictionary",
];

/// Which model vendor the background worker calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    Openai,
    #[default]
    #[serde(other)]
    Claude,
}

impl ApiProvider {
    pub fn display_name(self) -> &'static str {
        match self {
            ApiProvider::Claude => "Claude",
            ApiProvider::Openai => "OpenAI",
        }
    }

    /// Required key prefix
    pub fn key_prefix(self) -> &'static str {
        match self {
            ApiProvider::Claude => "sk-ant-",
            ApiProvider::Openai => "sk-",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    #[serde(other)]
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_provider: ApiProvider,
    #[serde(skip_serializing)]
    pub claude_api_key: Option<String>,
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
    pub max_tokens: u32,
    pub theme: Theme,
    pub default_grammar_lang: String,
    pub default_tone: Tone,
    pub default_from_lang: String,
    pub default_to_lang: String,
    pub custom_dictionary: CustomDictionary,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_provider: ApiProvider::default(),
            claude_api_key: None,
            openai_api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            theme: Theme::default(),
            default_grammar_lang: AUTO.to_string(),
            default_tone: Tone::default(),
            default_from_lang: AUTO.to_string(),
            default_to_lang: "en".to_string(),
            custom_dictionary: CustomDictionary::default(),
        }
    }
}

impl Settings {
    /// Snap out-of-range values to something the panel can show
    pub fn normalized(mut self) -> Self {
        self.max_tokens = nearest_max_tokens(self.max_tokens);
        if !is_known_language(&self.default_grammar_lang) {
            self.default_grammar_lang = AUTO.to_string();
        }
        if !is_known_language(&self.default_from_lang) {
            self.default_from_lang = AUTO.to_string();
        }
        // Translating "to auto" means nothing
        if self.default_to_lang == AUTO || !is_known_language(&self.default_to_lang) {
            self.default_to_lang = "en".to_string();
        }
        self
    }

    /// Key for the selected provider, if non-blank
    pub fn active_api_key(&self) -> Option<&str> {
        let key = match self.api_provider {
            ApiProvider::Claude => self.claude_api_key.as_deref(),
            ApiProvider::Openai => self.openai_api_key.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.active_api_key().is_some()
    }

    /// Check the active key the way the options page does before saving
    pub fn validate_api_key(&self) -> Result<(), SettingsError> {
        let provider = self.api_provider;
        let key = self.active_api_key().ok_or(SettingsError::MissingApiKey {
            provider: provider.display_name(),
        })?;
        if !key.starts_with(provider.key_prefix()) {
            return Err(SettingsError::BadApiKeyFormat {
                provider: provider.display_name(),
                prefix: provider.key_prefix(),
            });
        }
        Ok(())
    }
}

/// Closest allowed value; ties go to the smaller option
pub fn nearest_max_tokens(value: u32) -> u32 {
    MAX_TOKEN_OPTIONS
        .iter()
        .copied()
        .min_by_key(|option| option.abs_diff(value))
        .unwrap_or(DEFAULT_MAX_TOKENS)
}

/// Asynchronous key-value store holding [`Settings`]
pub trait SettingsStore {
    fn load(&self) -> impl Future<Output = Result<Settings, SettingsError>>;
}

/// Load settings, falling back to defaults when the store is unavailable
pub async fn load_or_default<S: SettingsStore>(store: &S) -> Settings {
    match store.load().await {
        Ok(settings) => settings.normalized(),
        Err(err) => {
            log::warn!("settings: {}, using defaults", err);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"defaultTone":"casual"}"#).unwrap();
        assert_eq!(settings.default_tone, Tone::Casual);
        assert_eq!(settings.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(settings.default_to_lang, "en");
        assert_eq!(settings.api_provider, ApiProvider::Claude);
    }

    #[test]
    fn test_unknown_stored_values_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"apiProvider":"gemini","defaultTone":"pirate","theme":"neon"}"#)
                .unwrap();
        assert_eq!(settings.api_provider, ApiProvider::Claude);
        assert_eq!(settings.default_tone, Tone::Professional);
        assert_eq!(settings.theme, Theme::Auto);

        let settings: Settings = serde_json::from_str(r#"{"apiProvider":"openai"}"#).unwrap();
        assert_eq!(settings.api_provider, ApiProvider::Openai);
    }

    #[test]
    fn test_max_tokens_snaps_to_nearest_option() {
        assert_eq!(nearest_max_tokens(1000), 1024);
        assert_eq!(nearest_max_tokens(3000), 2048);
        assert_eq!(nearest_max_tokens(100_000), 16384);
        assert_eq!(nearest_max_tokens(4096), 4096);
    }

    #[test]
    fn test_normalized_repairs_languages() {
        let settings = Settings {
            default_grammar_lang: "klingon".into(),
            default_to_lang: AUTO.into(),
            max_tokens: 700,
            ..Settings::default()
        }
        .normalized();
        assert_eq!(settings.default_grammar_lang, AUTO);
        assert_eq!(settings.default_to_lang, "en");
        assert_eq!(settings.max_tokens, 512);
    }

    #[test]
    fn test_api_keys_are_not_serialized() {
        let settings = Settings {
            claude_api_key: Some("sk-ant-secret".into()),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_validate_api_key() {
        let mut settings = Settings::default();
        assert!(matches!(settings.validate_api_key(), Err(SettingsError::MissingApiKey { .. })));

        settings.claude_api_key = Some("sk-live".into());
        assert!(matches!(settings.validate_api_key(), Err(SettingsError::BadApiKeyFormat { .. })));

        settings.claude_api_key = Some("sk-ant-abc".into());
        assert!(settings.validate_api_key().is_ok());
        assert!(settings.is_configured());
    }

    struct FailingStore;

    impl SettingsStore for FailingStore {
        async fn load(&self) -> Result<Settings, SettingsError> {
            Err(SettingsError::Unavailable("Extension context invalidated.".into()))
        }
    }

    struct StaticStore(Settings);

    impl SettingsStore for StaticStore {
        async fn load(&self) -> Result<Settings, SettingsError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_load_or_default_degrades() {
        assert_eq!(block_on(load_or_default(&FailingStore)), Settings::default());

        let stored = Settings {
            default_tone: Tone::Formal,
            max_tokens: 9000,
            ..Settings::default()
        };
        let loaded = block_on(load_or_default(&StaticStore(stored)));
        assert_eq!(loaded.default_tone, Tone::Formal);
        assert_eq!(loaded.max_tokens, 8192);
    }
}
