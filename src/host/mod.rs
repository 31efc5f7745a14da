//! Host page capability interface
//!
//! Everything the core reads from or writes to the page goes through
//! [`HostPage`]. The browser binding lives in `crate::dom`; tests drive the
//! same tracker, injector and panel logic against in-memory fakes.
//!
//! The page owns the focused element and the live selection. Nothing here
//! assumes exclusive access: any handle may go stale between two calls.

pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub use errors::HostError;

/// Which kind of editing surface an element is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditableSurfaceKind {
    /// `<input>` (text-like types) or `<textarea>`
    PlainInput,
    /// Element with `isContentEditable`
    ContentEditable,
    /// Anything else: static text, canvas editors, no focus at all
    Unsupported,
}

impl EditableSurfaceKind {
    pub fn is_editable(self) -> bool {
        !matches!(self, EditableSurfaceKind::Unsupported)
    }
}

/// Viewport rectangle of the selection, used only for positioning the panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionBounds {
    /// A zero-size rectangle at a pointer position
    pub fn at_point(x: f64, y: f64) -> Self {
        Self { left: x, top: y, width: 0.0, height: 0.0 }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Write-only clipboard access
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), HostError>;
}

/// Minimal view of the host page needed to capture and replace a selection
pub trait HostPage: Clipboard {
    /// Handle to an element (input, textarea, editable region)
    type Surface: Clone + PartialEq + Debug;
    /// Handle to a live document range
    type Range: Clone + Debug;

    // ---- selection ----

    /// Text of the live document selection, untrimmed
    fn selected_text(&self) -> Option<String>;

    /// Clone of the first range of the live selection
    fn current_range(&self) -> Option<Self::Range>;

    fn selection_bounds(&self) -> Option<SelectionBounds>;

    /// Put `range` back onto the live selection
    fn restore_range(&self, range: &Self::Range) -> Result<(), HostError>;

    /// Insert text at the live selection using the browser's own editing
    /// command. `Ok(false)` means the browser refused the command.
    fn insert_at_caret(&self, text: &str) -> Result<bool, HostError>;

    // ---- surfaces ----

    /// Currently focused element, if it is not the document body
    fn focused_surface(&self) -> Option<Self::Surface>;

    fn classify(&self, surface: &Self::Surface) -> EditableSurfaceKind;

    /// Whether the element is still connected to the document
    fn is_attached(&self, surface: &Self::Surface) -> bool;

    fn focus(&self, surface: &Self::Surface) -> Result<(), HostError>;

    /// `selectionStart` / `selectionEnd` of a plain input, in UTF-16 units
    fn read_selection_offsets(&self, surface: &Self::Surface) -> Result<(usize, usize), HostError>;

    fn read_value(&self, surface: &Self::Surface) -> Result<String, HostError>;

    fn write_value(&self, surface: &Self::Surface, value: &str) -> Result<(), HostError>;

    /// Collapse the input's selection to `caret` (UTF-16 units)
    fn set_caret(&self, surface: &Self::Surface, caret: usize) -> Result<(), HostError>;

    /// Fire bubbling `input` and `change` events so page frameworks resync
    fn dispatch_change_notification(&self, surface: &Self::Surface) -> Result<(), HostError>;

    // ---- canvas editors ----

    /// Event target of a known canvas-rendered editor on this page
    fn canvas_editor_target(&self) -> Option<Self::Surface>;

    /// Dispatch a synthetic paste carrying `text`. `Ok(true)` when the event
    /// reached the target.
    fn dispatch_paste(&self, target: &Self::Surface, text: &str) -> Result<bool, HostError>;

    // ---- misc ----

    /// Milliseconds since the epoch
    fn now_ms(&self) -> f64;
}
