//! What the panel shows

use serde::{Deserialize, Serialize};

use crate::diff::{DiffScript, DiffStats};

/// Panel display state, serialized for the JS renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PanelState {
    /// Open, nothing requested yet (or no panel at all)
    Idle,
    Loading { label: String },
    /// A changed result ready for review
    Result {
        text: String,
        diff: DiffScript,
        stats: DiffStats,
    },
    /// The model returned the text unchanged; nothing to replace or copy
    NoChanges,
    /// Dismissible inline error
    Error { message: String },
    /// Softer notice, e.g. "copied to clipboard, paste manually"
    Notice { message: String },
}

impl PanelState {
    pub fn error(message: impl Into<String>) -> Self {
        PanelState::Error { message: message.into() }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        PanelState::Notice { message: message.into() }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading { .. })
    }
}

/// How one submitted request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelOutcome {
    Completed,
    NoChanges,
    Failed,
    /// The panel was dismissed or reopened before the reply arrived
    Discarded,
}
