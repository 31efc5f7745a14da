//! Immutable record of one captured selection

use serde::{Deserialize, Serialize};

use crate::host::{EditableSurfaceKind, HostPage, SelectionBounds};
use crate::text::TextRange;

/// How the capture was triggered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CaptureTrigger {
    /// Mouse-up after a drag or double click, page coordinates
    Pointer { x: f64, y: f64 },
    /// Keyboard shortcut
    Keyboard,
    /// Context menu entry; the text came from the browser, not the page
    ContextMenu,
}

/// What was selected and where.
///
/// Fields are private: the text must stay exactly what was sent to the
/// assistant for the lifetime of one result cycle.
#[derive(Debug, Clone)]
pub struct SelectionSnapshot<S, R> {
    text: String,
    origin: Option<S>,
    kind: EditableSurfaceKind,
    range: Option<R>,
    input_range: Option<TextRange>,
    bounds: Option<SelectionBounds>,
    trigger: CaptureTrigger,
    captured_at: f64,
}

/// Snapshot type for a given host
pub type HostSnapshot<H> = SelectionSnapshot<<H as HostPage>::Surface, <H as HostPage>::Range>;

impl<S: Clone, R: Clone> SelectionSnapshot<S, R> {
    /// `text` must already be trimmed and non-empty
    pub(crate) fn new(
        text: String,
        origin: Option<S>,
        kind: EditableSurfaceKind,
        range: Option<R>,
        trigger: CaptureTrigger,
        captured_at: f64,
    ) -> Self {
        debug_assert!(!text.is_empty() && text.trim() == text);
        let kind = if origin.is_some() { kind } else { EditableSurfaceKind::Unsupported };
        Self {
            text,
            origin,
            kind,
            range,
            input_range: None,
            bounds: None,
            trigger,
            captured_at,
        }
    }

    pub(crate) fn with_input_range(mut self, range: Option<TextRange>) -> Self {
        self.input_range = range;
        self
    }

    pub(crate) fn with_bounds(mut self, bounds: Option<SelectionBounds>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Same text and range, pointed at a different element.
    ///
    /// Capture-time input offsets belong to the old element and are dropped.
    pub fn retarget(&self, surface: S, kind: EditableSurfaceKind) -> Self {
        Self {
            text: self.text.clone(),
            origin: Some(surface),
            kind,
            range: self.range.clone(),
            input_range: None,
            bounds: self.bounds,
            trigger: self.trigger,
            captured_at: self.captured_at,
        }
    }

    /// Trimmed selected text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Editable element the selection came from
    pub fn origin(&self) -> Option<&S> {
        self.origin.as_ref()
    }

    pub fn kind(&self) -> EditableSurfaceKind {
        self.kind
    }

    /// Live range captured from the page selection
    pub fn range(&self) -> Option<&R> {
        self.range.as_ref()
    }

    /// Input offsets (UTF-16) at capture time, plain inputs only
    pub fn input_range(&self) -> Option<TextRange> {
        self.input_range
    }

    pub fn bounds(&self) -> Option<SelectionBounds> {
        self.bounds
    }

    pub fn trigger(&self) -> CaptureTrigger {
        self.trigger
    }

    pub fn captured_at(&self) -> f64 {
        self.captured_at
    }
}

/// Serializable summary of a snapshot for the JS side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub text: String,
    pub kind: EditableSurfaceKind,
    pub has_range: bool,
    pub bounds: Option<SelectionBounds>,
    pub trigger: CaptureTrigger,
    pub captured_at: f64,
}

impl<S: Clone, R: Clone> From<&SelectionSnapshot<S, R>> for SnapshotInfo {
    fn from(snapshot: &SelectionSnapshot<S, R>) -> Self {
        Self {
            text: snapshot.text.clone(),
            kind: snapshot.kind,
            has_range: snapshot.range.is_some(),
            bounds: snapshot.bounds,
            trigger: snapshot.trigger,
            captured_at: snapshot.captured_at,
        }
    }
}
