//! Panel errors
//!
//! None of these reach the host page: the binding layer turns them into
//! panel messages or rejected promises for the extension's own script.

use thiserror::Error;

pub const CONTEXT_LOST_MESSAGE: &str =
    "GrammarWise was updated or reloaded. Please refresh this page to continue.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// Nothing (or only whitespace) is selected
    #[error("no text selected")]
    NoSelection,

    /// A request is already in flight for this panel
    #[error("a request is already in progress")]
    Busy,

    /// Replace or copy with no result to use
    #[error("no result to use")]
    NoResult,

    /// The extension runtime is gone (extension reloaded)
    #[error("{}", CONTEXT_LOST_MESSAGE)]
    ContextLost,

    /// The panel is not open
    #[error("panel is not open")]
    Dismissed,

    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}
