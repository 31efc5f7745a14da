//! Selection tracker
//!
//! Holds at most one snapshot. Every successful capture replaces the
//! previous snapshot wholesale; an empty selection leaves it alone.

use serde::{Deserialize, Serialize};

use super::snapshot::{CaptureTrigger, HostSnapshot, SelectionSnapshot};
use crate::host::{EditableSurfaceKind, HostPage, SelectionBounds};
use crate::text::{slice_utf16, trim_range, TextRange};

/// Tracker lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackerState {
    Idle,
    Capturing,
    Captured,
}

pub struct SelectionTracker<H: HostPage> {
    current: Option<HostSnapshot<H>>,
    state: TrackerState,
}

impl<H: HostPage> Default for SelectionTracker<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostPage> SelectionTracker<H> {
    pub fn new() -> Self {
        Self {
            current: None,
            state: TrackerState::Idle,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn current(&self) -> Option<&HostSnapshot<H>> {
        self.current.as_ref()
    }

    /// Drop the snapshot (panel dismissed)
    pub fn clear(&mut self) {
        self.current = None;
        self.state = TrackerState::Idle;
    }

    /// Capture the live page selection.
    ///
    /// Returns `None` for an empty or whitespace-only selection, in which
    /// case the previous snapshot is kept.
    pub fn capture_selection(&mut self, host: &H, trigger: CaptureTrigger) -> Option<&HostSnapshot<H>> {
        let previous = self.state;
        self.state = TrackerState::Capturing;

        let focused = host.focused_surface();
        let kind = focused
            .as_ref()
            .map(|surface| host.classify(surface))
            .unwrap_or(EditableSurfaceKind::Unsupported);

        // Inputs keep their selection out of the page Selection on some
        // browsers, so read it off the element itself.
        let from_input = match (&focused, kind) {
            (Some(surface), EditableSurfaceKind::PlainInput) => read_input_selection(host, surface),
            _ => None,
        };

        let (text, origin, kind, input_range) = match from_input {
            Some((text, range)) => (text, focused, kind, Some(range)),
            None => {
                let text = host
                    .selected_text()
                    .map(|t| t.trim().to_string())
                    .unwrap_or_default();
                // A focused input with a collapsed caret is not where this
                // text came from.
                let origin = match kind {
                    EditableSurfaceKind::ContentEditable => focused,
                    _ => None,
                };
                (text, origin, kind, None)
            }
        };

        if text.is_empty() {
            log::debug!("capture: empty selection, keeping previous snapshot");
            self.state = previous;
            return None;
        }

        let bounds = host.selection_bounds().or(match trigger {
            CaptureTrigger::Pointer { x, y } => Some(SelectionBounds::at_point(x, y)),
            _ => None,
        });

        let snapshot = SelectionSnapshot::new(
            text,
            origin,
            kind,
            host.current_range(),
            trigger,
            host.now_ms(),
        )
        .with_input_range(input_range)
        .with_bounds(bounds);

        log::debug!(
            "capture: {} chars from {:?} ({:?})",
            snapshot.text().chars().count(),
            snapshot.kind(),
            trigger
        );
        self.state = TrackerState::Captured;
        self.current = Some(snapshot);
        self.current.as_ref()
    }

    /// Capture text handed over by the browser (context menu, shortcut).
    ///
    /// The page selection may be gone or meaningless here (canvas editors),
    /// so no range is kept; the focused element is taken as the origin.
    pub fn capture_from_external_text(&mut self, host: &H, text: &str) -> Option<&HostSnapshot<H>> {
        let text = text.trim();
        if text.is_empty() {
            log::debug!("capture: empty external text, keeping previous snapshot");
            return None;
        }
        self.state = TrackerState::Capturing;

        let focused = host.focused_surface();
        let kind = focused
            .as_ref()
            .map(|surface| host.classify(surface))
            .unwrap_or(EditableSurfaceKind::Unsupported);
        let origin = focused.filter(|_| kind.is_editable());

        let snapshot = SelectionSnapshot::new(
            text.to_string(),
            origin,
            kind,
            None,
            CaptureTrigger::ContextMenu,
            host.now_ms(),
        )
        .with_bounds(host.selection_bounds());

        log::debug!("capture: external text, origin {:?}", snapshot.kind());
        self.state = TrackerState::Captured;
        self.current = Some(snapshot);
        self.current.as_ref()
    }
}

/// Selected text of a plain input and its trimmed UTF-16 range
fn read_input_selection<H: HostPage>(host: &H, surface: &H::Surface) -> Option<(String, TextRange)> {
    let offsets = host.read_selection_offsets(surface).ok()?;
    let value = host.read_value(surface).ok()?;
    let range = trim_range(&value, TextRange::from(offsets))?;
    if range.is_empty() {
        return None;
    }
    let text = slice_utf16(&value, range)?.to_string();
    Some((text, range))
}
