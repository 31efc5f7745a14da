//! Browser implementation of the host capability interface
//!
//! Every browser call that can throw is mapped to [`HostError::Js`]; nothing
//! escapes to the page's own error handlers.
//!
//! ## Modules
//!
//! - `events`: Synthetic input/change/paste events and the native value setter
//! - `clipboard`: Clipboard writes
//! - `runtime`: Extension runtime messaging and settings storage

pub mod clipboard;
pub mod events;
pub mod runtime;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlDocument, HtmlElement, HtmlIFrameElement, HtmlInputElement,
    HtmlTextAreaElement, Range, Selection, Window,
};

use crate::host::{EditableSurfaceKind, HostError, HostPage, SelectionBounds};
use crate::inject::profile_for_host;

pub use runtime::{ChromeStorage, RuntimeAssistant};

/// `<input type=...>` values that hold free text
const TEXT_INPUT_TYPES: &[&str] = &["text", "search", "email", "url", "tel", ""];

/// Live page accessed through `web-sys`
#[derive(Debug, Clone, Default)]
pub struct DomHost;

impl DomHost {
    pub fn new() -> Self {
        Self
    }

    fn window(&self) -> Result<Window, HostError> {
        web_sys::window().ok_or_else(|| HostError::Unsupported("no window".into()))
    }

    fn document(&self) -> Result<Document, HostError> {
        self.window()?
            .document()
            .ok_or_else(|| HostError::Unsupported("no document".into()))
    }

    fn selection(&self) -> Option<Selection> {
        self.window().ok()?.get_selection().ok().flatten()
    }
}

/// Message text of a thrown JS value
pub(crate) fn js_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

pub(crate) fn js_error(err: JsValue) -> HostError {
    HostError::Js(js_message(&err))
}

/// Input-like element wrapper; inputs and textareas share no DOM interface
enum TextField<'a> {
    Input(&'a HtmlInputElement),
    TextArea(&'a HtmlTextAreaElement),
}

impl<'a> TextField<'a> {
    fn of(element: &'a Element) -> Result<Self, HostError> {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Ok(TextField::Input(input));
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Ok(TextField::TextArea(area));
        }
        Err(HostError::Unsupported(element.tag_name()))
    }

    fn value(&self) -> String {
        match self {
            TextField::Input(input) => input.value(),
            TextField::TextArea(area) => area.value(),
        }
    }

    fn offsets(&self) -> Result<(usize, usize), HostError> {
        let (start, end) = match self {
            TextField::Input(input) => (
                input.selection_start().map_err(js_error)?,
                input.selection_end().map_err(js_error)?,
            ),
            TextField::TextArea(area) => (
                area.selection_start().map_err(js_error)?,
                area.selection_end().map_err(js_error)?,
            ),
        };
        match (start, end) {
            (Some(start), Some(end)) => Ok((start as usize, end as usize)),
            _ => Err(HostError::Unsupported("input has no selection".into())),
        }
    }

    fn set_selection_range(&self, start: u32, end: u32) -> Result<(), HostError> {
        match self {
            TextField::Input(input) => input.set_selection_range(start, end),
            TextField::TextArea(area) => area.set_selection_range(start, end),
        }
        .map_err(js_error)
    }

    fn fallback_set_value(&self, value: &str) {
        match self {
            TextField::Input(input) => input.set_value(value),
            TextField::TextArea(area) => area.set_value(value),
        }
    }

    fn is_writable(&self) -> bool {
        match self {
            TextField::Input(input) => {
                TEXT_INPUT_TYPES.contains(&input.type_().to_ascii_lowercase().as_str())
                    && !input.read_only()
                    && !input.disabled()
            }
            TextField::TextArea(area) => !area.read_only() && !area.disabled(),
        }
    }
}

impl HostPage for DomHost {
    type Surface = Element;
    type Range = Range;

    fn selected_text(&self) -> Option<String> {
        let selection = self.selection()?;
        let text = String::from(selection.to_string());
        (!text.is_empty()).then_some(text)
    }

    fn current_range(&self) -> Option<Range> {
        let selection = self.selection()?;
        if selection.range_count() == 0 {
            return None;
        }
        selection.get_range_at(0).ok().map(|range| range.clone_range())
    }

    fn selection_bounds(&self) -> Option<SelectionBounds> {
        let range = self.current_range()?;
        let rect = range.get_bounding_client_rect();
        if rect.width() == 0.0 && rect.height() == 0.0 {
            return None;
        }
        Some(SelectionBounds {
            left: rect.x(),
            top: rect.y(),
            width: rect.width(),
            height: rect.height(),
        })
    }

    fn restore_range(&self, range: &Range) -> Result<(), HostError> {
        let selection = self
            .selection()
            .ok_or_else(|| HostError::Unsupported("no selection object".into()))?;
        selection.remove_all_ranges().map_err(js_error)?;
        selection.add_range(range).map_err(js_error)
    }

    fn insert_at_caret(&self, text: &str) -> Result<bool, HostError> {
        let document: HtmlDocument = self
            .document()?
            .dyn_into()
            .map_err(|_| HostError::Unsupported("not an HTML document".into()))?;
        document
            .exec_command_with_show_ui_and_value("insertText", false, text)
            .map_err(js_error)
    }

    fn focused_surface(&self) -> Option<Element> {
        let document = self.document().ok()?;
        let active = document.active_element()?;
        let is_body = document
            .body()
            .is_some_and(|body| AsRef::<Element>::as_ref(&body) == &active);
        (!is_body).then_some(active)
    }

    fn classify(&self, surface: &Element) -> EditableSurfaceKind {
        if let Ok(field) = TextField::of(surface) {
            return if field.is_writable() {
                EditableSurfaceKind::PlainInput
            } else {
                EditableSurfaceKind::Unsupported
            };
        }
        match surface.dyn_ref::<HtmlElement>() {
            Some(element) if element.is_content_editable() => EditableSurfaceKind::ContentEditable,
            _ => EditableSurfaceKind::Unsupported,
        }
    }

    fn is_attached(&self, surface: &Element) -> bool {
        surface.is_connected()
    }

    fn focus(&self, surface: &Element) -> Result<(), HostError> {
        surface
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| HostError::Unsupported(surface.tag_name()))?
            .focus()
            .map_err(js_error)
    }

    fn read_selection_offsets(&self, surface: &Element) -> Result<(usize, usize), HostError> {
        TextField::of(surface)?.offsets()
    }

    fn read_value(&self, surface: &Element) -> Result<String, HostError> {
        Ok(TextField::of(surface)?.value())
    }

    fn write_value(&self, surface: &Element, value: &str) -> Result<(), HostError> {
        let field = TextField::of(surface)?;
        if !surface.is_connected() {
            return Err(HostError::Detached);
        }
        // Framework-controlled inputs track the value through the prototype
        // setter; assigning through it makes the following input event count.
        if let Err(err) = events::set_native_value(surface, value) {
            log::debug!("dom: native value setter unavailable: {}", js_message(&err));
            field.fallback_set_value(value);
        }
        Ok(())
    }

    fn set_caret(&self, surface: &Element, caret: usize) -> Result<(), HostError> {
        let caret = u32::try_from(caret).map_err(|_| HostError::BadOffset {
            offset: caret,
            len: u32::MAX as usize,
        })?;
        TextField::of(surface)?.set_selection_range(caret, caret)
    }

    fn dispatch_change_notification(&self, surface: &Element) -> Result<(), HostError> {
        events::dispatch_bubbling(surface, "input").map_err(js_error)?;
        events::dispatch_bubbling(surface, "change").map_err(js_error)?;
        Ok(())
    }

    fn canvas_editor_target(&self) -> Option<Element> {
        let hostname = self.window().ok()?.location().hostname().ok()?;
        let profile = profile_for_host(&hostname)?;
        let element = self
            .document()
            .ok()?
            .query_selector(profile.target_selector)
            .ok()
            .flatten()?;
        if !profile.in_iframe {
            return Some(element);
        }
        let frame = element.dyn_into::<HtmlIFrameElement>().ok()?;
        let body = frame.content_document()?.body()?;
        log::debug!("dom: {} paste target found", profile.name);
        Some(body.into())
    }

    fn dispatch_paste(&self, target: &Element, text: &str) -> Result<bool, HostError> {
        if !target.is_connected() {
            return Err(HostError::Detached);
        }
        events::dispatch_paste(target, text).map_err(js_error)?;
        Ok(true)
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
