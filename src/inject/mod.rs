//! Text injection
//!
//! Writes the assistant's text back where the selection came from. The
//! strategies run in a fixed order from most precise to most universal; the
//! first one that confirms the write wins. When none does, the text goes to
//! the clipboard and the caller tells the user to paste it.
//!
//! ## Modules
//!
//! - `strategy`: The strategy trait and the built-in chain
//! - `profiles`: Known canvas-rendered editors

pub mod profiles;
pub mod strategy;

use serde::{Deserialize, Serialize};

use crate::host::HostPage;
use crate::selection::HostSnapshot;

pub use profiles::{profile_for_host, HostProfile, HOST_PROFILES};
pub use strategy::{
    CanvasEditorPaste, ContentEditableInsert, DirectValue, FocusedSurfaceRetry, InjectionStrategy,
    RawSelection,
};

/// Why the text ended up on the clipboard instead of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackReason {
    /// The selection was not inside an editable element
    NoEditableTarget,
    /// The element the selection came from has left the document
    DetachedOrigin,
    /// Every strategy declined or failed
    StrategiesExhausted,
}

impl FallbackReason {
    /// Notice shown to the user
    pub fn user_message(self) -> &'static str {
        match self {
            FallbackReason::DetachedOrigin => {
                "The text field changed while you were reviewing. Text copied to clipboard, paste it manually."
            }
            FallbackReason::NoEditableTarget | FallbackReason::StrategiesExhausted => {
                "Text copied to clipboard. Paste it manually in the desired location."
            }
        }
    }
}

/// Notice for when the clipboard refused the text as well
pub const MANUAL_COPY_MESSAGE: &str =
    "Could not replace the text or copy it automatically. Select the corrected text in the panel and copy it manually.";

/// Outcome of an injection. There is no partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum InjectionResult {
    Replaced,
    CopiedToClipboard(FallbackReason),
    /// Neither the page nor the clipboard took the text
    ManualCopyNeeded(FallbackReason),
}

impl InjectionResult {
    pub fn is_replaced(&self) -> bool {
        matches!(self, InjectionResult::Replaced)
    }

    /// Panel notice, `None` once the page holds the text
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            InjectionResult::Replaced => None,
            InjectionResult::CopiedToClipboard(reason) => Some(reason.user_message()),
            InjectionResult::ManualCopyNeeded(_) => Some(MANUAL_COPY_MESSAGE),
        }
    }
}

/// Ordered strategy chain with a clipboard fallback
pub struct TextInjector<H: HostPage + 'static> {
    strategies: Vec<Box<dyn InjectionStrategy<H>>>,
}

impl<H: HostPage + 'static> Default for TextInjector<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostPage + 'static> TextInjector<H> {
    /// The standard chain
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(DirectValue),
            Box::new(ContentEditableInsert),
            Box::new(FocusedSurfaceRetry),
            Box::new(RawSelection),
            Box::new(CanvasEditorPaste),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn InjectionStrategy<H>>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Replace the snapshot's text with `text`. Never fails: the worst case
    /// is a clipboard copy.
    pub fn inject(&self, host: &H, snapshot: &HostSnapshot<H>, text: &str) -> InjectionResult {
        for strategy in &self.strategies {
            match strategy.attempt(host, snapshot, text) {
                Ok(true) => {
                    log::info!("inject: replaced selection via {}", strategy.name());
                    return InjectionResult::Replaced;
                }
                Ok(false) => log::debug!("inject: {} declined", strategy.name()),
                Err(err) => log::debug!("inject: {} failed: {}", strategy.name(), err),
            }
        }

        let reason = match snapshot.origin() {
            None => FallbackReason::NoEditableTarget,
            Some(origin) if !host.is_attached(origin) => FallbackReason::DetachedOrigin,
            Some(_) => FallbackReason::StrategiesExhausted,
        };
        if let Err(err) = host.write_text(text) {
            log::warn!("inject: clipboard fallback failed ({:?}): {}", reason, err);
            return InjectionResult::ManualCopyNeeded(reason);
        }
        log::info!("inject: falling back to clipboard ({:?})", reason);
        InjectionResult::CopiedToClipboard(reason)
    }
}
