//! Injection strategies
//!
//! Each strategy either replaces the snapshot text completely and returns
//! `Ok(true)`, or leaves the page as it found it. `Ok(false)` means the
//! strategy does not apply or could not confirm the write; an `Err` is a
//! browser failure. The injector treats both as "try the next one".

use crate::host::{EditableSurfaceKind, HostError, HostPage};
use crate::selection::HostSnapshot;
use crate::text::{
    find_unique_utf16, normalize_whitespace, slice_utf16, splice_utf16, trim_range, utf16_len,
    TextRange,
};

/// One way of writing text into the page
pub trait InjectionStrategy<H: HostPage> {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn attempt(&self, host: &H, snapshot: &HostSnapshot<H>, text: &str) -> Result<bool, HostError>;
}

/// Splice the text into an `<input>` / `<textarea>` value
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectValue;

impl<H: HostPage> InjectionStrategy<H> for DirectValue {
    fn name(&self) -> &'static str {
        "direct-value"
    }

    fn attempt(&self, host: &H, snapshot: &HostSnapshot<H>, text: &str) -> Result<bool, HostError> {
        match snapshot.origin() {
            Some(surface) if snapshot.kind() == EditableSurfaceKind::PlainInput => {
                replace_in_input(host, surface, snapshot, text)
            }
            _ => Ok(false),
        }
    }
}

/// Native insertion into a content-editable region
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentEditableInsert;

impl<H: HostPage> InjectionStrategy<H> for ContentEditableInsert {
    fn name(&self) -> &'static str {
        "content-editable"
    }

    fn attempt(&self, host: &H, snapshot: &HostSnapshot<H>, text: &str) -> Result<bool, HostError> {
        match snapshot.origin() {
            Some(surface) if snapshot.kind() == EditableSurfaceKind::ContentEditable => {
                insert_into_editable(host, surface, snapshot, text)
            }
            _ => Ok(false),
        }
    }
}

/// Retry the first two strategies on whatever is focused now.
///
/// Covers single-page apps that re-render the field and swap the element
/// while focus stays in the same logical input.
#[derive(Debug, Default, Clone, Copy)]
pub struct FocusedSurfaceRetry;

impl<H: HostPage> InjectionStrategy<H> for FocusedSurfaceRetry {
    fn name(&self) -> &'static str {
        "focused-retry"
    }

    fn attempt(&self, host: &H, snapshot: &HostSnapshot<H>, text: &str) -> Result<bool, HostError> {
        // Static page text: whatever has focus is not where it came from.
        let Some(origin) = snapshot.origin() else {
            return Ok(false);
        };
        let Some(focused) = host.focused_surface() else {
            return Ok(false);
        };
        // Same live element: the first two strategies already had it.
        if origin == &focused && host.is_attached(&focused) {
            return Ok(false);
        }

        let kind = host.classify(&focused);
        let retargeted = snapshot.retarget(focused.clone(), kind);
        match kind {
            EditableSurfaceKind::PlainInput => {
                // Only the live selection ties a new element to the old one.
                if !live_selection_covers(host, &focused, snapshot.text()) {
                    return Ok(false);
                }
                replace_in_input(host, &focused, &retargeted, text)
            }
            EditableSurfaceKind::ContentEditable => insert_into_editable(host, &focused, &retargeted, text),
            EditableSurfaceKind::Unsupported => Ok(false),
        }
    }
}

/// Insert through the live document selection, no element handle involved
#[derive(Debug, Default, Clone, Copy)]
pub struct RawSelection;

impl<H: HostPage> InjectionStrategy<H> for RawSelection {
    fn name(&self) -> &'static str {
        "raw-selection"
    }

    fn attempt(&self, host: &H, snapshot: &HostSnapshot<H>, text: &str) -> Result<bool, HostError> {
        if let Some(range) = snapshot.range() {
            if let Err(err) = host.restore_range(range) {
                log::debug!("raw-selection: range restore failed: {}", err);
            }
        }
        if !selection_matches(host, snapshot.text()) {
            return Ok(false);
        }
        host.insert_at_caret(text)
    }
}

/// Clipboard plus synthetic paste for canvas-rendered editors.
///
/// Best effort: the editor decides what to do with the paste event.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanvasEditorPaste;

impl<H: HostPage> InjectionStrategy<H> for CanvasEditorPaste {
    fn name(&self) -> &'static str {
        "canvas-paste"
    }

    fn attempt(&self, host: &H, _snapshot: &HostSnapshot<H>, text: &str) -> Result<bool, HostError> {
        let Some(target) = host.canvas_editor_target() else {
            return Ok(false);
        };
        host.write_text(text)?;
        host.dispatch_paste(&target, text)
    }
}

/// Replace the snapshot text inside a plain input value.
///
/// The value is read back after writing; on mismatch or a later failure the
/// previous value is put back so the field is never left half-edited.
pub(crate) fn replace_in_input<H: HostPage>(
    host: &H,
    surface: &H::Surface,
    snapshot: &HostSnapshot<H>,
    text: &str,
) -> Result<bool, HostError> {
    if !host.is_attached(surface) {
        return Err(HostError::Detached);
    }

    let value = host.read_value(surface)?;
    let Some(target) = resolve_input_target(host, surface, &value, snapshot) else {
        log::debug!("direct-value: snapshot text not found in field");
        return Ok(false);
    };
    let (updated, caret) = splice_utf16(&value, target, text).ok_or(HostError::BadOffset {
        offset: target.end,
        len: utf16_len(&value),
    })?;

    host.write_value(surface, &updated)?;

    let committed = host.read_value(surface).and_then(|readback| {
        if readback != updated {
            log::debug!("direct-value: page rejected the new value");
            return Ok(false);
        }
        host.set_caret(surface, caret)?;
        host.dispatch_change_notification(surface)?;
        Ok(true)
    });

    if !matches!(committed, Ok(true)) {
        if let Err(err) = host.write_value(surface, &value) {
            log::warn!("direct-value: could not restore previous value: {}", err);
        }
    }
    committed
}

/// Where in `value` the snapshot text lives now.
///
/// Tried in order: the live selection, the capture-time offsets, the only
/// occurrence of the text in the value.
fn resolve_input_target<H: HostPage>(
    host: &H,
    surface: &H::Surface,
    value: &str,
    snapshot: &HostSnapshot<H>,
) -> Option<TextRange> {
    let covers = |range: TextRange| slice_utf16(value, range) == Some(snapshot.text());

    if let Ok(live) = host.read_selection_offsets(surface) {
        if let Some(range) = trim_range(value, TextRange::from(live)) {
            if covers(range) {
                return Some(range);
            }
        }
    }

    if let Some(range) = snapshot.input_range().filter(|r| covers(*r)) {
        return Some(range);
    }

    find_unique_utf16(value, snapshot.text())
}

/// Whether the input's own trimmed selection is exactly `expected`
fn live_selection_covers<H: HostPage>(host: &H, surface: &H::Surface, expected: &str) -> bool {
    let (Ok(value), Ok(live)) = (host.read_value(surface), host.read_selection_offsets(surface)) else {
        return false;
    };
    trim_range(&value, TextRange::from(live))
        .and_then(|range| slice_utf16(&value, range))
        .is_some_and(|selected| selected == expected)
}

/// Restore the selection in an editable region and insert natively
pub(crate) fn insert_into_editable<H: HostPage>(
    host: &H,
    surface: &H::Surface,
    snapshot: &HostSnapshot<H>,
    text: &str,
) -> Result<bool, HostError> {
    if !host.is_attached(surface) {
        return Err(HostError::Detached);
    }
    // Focus first: focusing an editable region can reset its selection.
    if let Err(err) = host.focus(surface) {
        log::debug!("content-editable: focus failed: {}", err);
    }
    if let Some(range) = snapshot.range() {
        if let Err(err) = host.restore_range(range) {
            log::debug!("content-editable: range restore failed: {}", err);
        }
    }
    if !selection_matches(host, snapshot.text()) {
        log::debug!("content-editable: live selection no longer covers the snapshot");
        return Ok(false);
    }
    host.insert_at_caret(text)
}

/// Inserting over a selection that is not the snapshot text would duplicate
/// or clobber unrelated content.
fn selection_matches<H: HostPage>(host: &H, expected: &str) -> bool {
    host.selected_text()
        .map(|live| normalize_whitespace(&live) == normalize_whitespace(expected))
        .unwrap_or(false)
}
