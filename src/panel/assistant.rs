//! Boundary with the model collaborator
//!
//! The content script never calls a model API itself. Requests go to the
//! extension's background worker as runtime messages; this module defines
//! the message shapes and the trait the panel talks to.

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::settings::Tone;

/// What to do with the selected text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum AssistAction {
    #[serde(rename = "checkGrammar")]
    Check { language: String, tone: Tone },
    #[serde(rename = "rewriteText")]
    Rewrite { tone: Tone },
    #[serde(rename = "translateText", rename_all = "camelCase")]
    Translate { from_lang: String, to_lang: String },
}

impl AssistAction {
    /// Label for the loading indicator
    pub fn progress_label(&self) -> &'static str {
        match self {
            AssistAction::Check { .. } => "Checking grammar...",
            AssistAction::Rewrite { .. } => "Rewriting...",
            AssistAction::Translate { .. } => "Translating...",
        }
    }
}

/// Runtime message sent to the background worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistRequest {
    #[serde(flatten)]
    pub action: AssistAction,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_dictionary: Vec<String>,
}

/// Reply from the background worker.
///
/// Grammar checks answer with `correctedText`, translations with
/// `translatedText`; `resultText` is accepted for any action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssistReply {
    pub success: bool,
    #[serde(alias = "correctedText", alias = "translatedText")]
    pub result_text: Option<String>,
    pub error: Option<String>,
}

pub const GENERIC_ERROR: &str = "An error occurred";
pub const EMPTY_RESULT_ERROR: &str = "The assistant returned an empty response";

impl AssistReply {
    /// Collapse the reply into the text or the error to show verbatim
    pub fn into_result(self) -> Result<String, String> {
        if !self.success {
            return Err(self.error.unwrap_or_else(|| GENERIC_ERROR.to_string()));
        }
        match self.result_text {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(EMPTY_RESULT_ERROR.to_string()),
        }
    }
}

/// Asynchronous model collaborator
pub trait Assistant {
    /// Run one request. Every failure (missing key, network, bad upstream
    /// payload) arrives as `Err(message)`.
    fn request(&self, request: AssistRequest) -> impl Future<Output = Result<String, String>>;

    /// Cheap liveness check for the extension runtime
    fn is_reachable(&self) -> bool {
        true
    }
}
