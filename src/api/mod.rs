//! GrammarWise WASM API
//!
//! JavaScript-facing surface for the content script. Everything here is a
//! thin wrapper: capture, diff, request and injection logic lives in the
//! host-agnostic modules.
//!
//! # Module Structure
//!
//! - `helpers`: Serialization and error conversion shared by all exports
//! - `types`: Result shapes returned to JS
//! - `panel`: The `GrammarPanel` class
//! - `diff`: Standalone `diffWords` / `diffStats`

pub mod diff;
pub mod helpers;
pub mod panel;
pub mod types;

pub use diff::{diff_stats_js, diff_words_js};
pub use panel::GrammarPanel;
