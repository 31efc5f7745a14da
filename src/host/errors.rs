//! Errors raised while talking to the host page

use thiserror::Error;

/// A host page operation failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The element is no longer connected to the document
    #[error("element is detached from the document")]
    Detached,

    /// The element does not support the requested operation
    #[error("unsupported surface: {0}")]
    Unsupported(String),

    /// An offset did not fall on a character boundary of the value
    #[error("offset {offset} is not a character boundary (value length {len})")]
    BadOffset { offset: usize, len: usize },

    /// The browser threw while running the operation
    #[error("browser error: {0}")]
    Js(String),
}
