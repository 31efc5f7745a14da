//! In-memory host page and assistant shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use grammarwise_wasm::host::{Clipboard, EditableSurfaceKind, HostError, HostPage, SelectionBounds};
use grammarwise_wasm::panel::{AssistRequest, Assistant};
use grammarwise_wasm::text::{slice_utf16, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct FakeRange {
    pub surface: Option<SurfaceId>,
    pub text: String,
}

#[derive(Debug, Clone)]
struct FakeSurface {
    kind: EditableSurfaceKind,
    value: String,
    selection: (usize, usize),
    attached: bool,
    reverts_writes: bool,
    events: Vec<&'static str>,
}

#[derive(Debug, Default)]
struct Page {
    surfaces: Vec<FakeSurface>,
    focused: Option<SurfaceId>,
    selection: Option<FakeRange>,
    bounds: Option<SelectionBounds>,
    clipboard: Vec<String>,
    pasted: Vec<(SurfaceId, String)>,
    canvas_target: Option<SurfaceId>,
    refuse_insert: bool,
    clipboard_denied: bool,
    clock: f64,
}

impl Page {
    fn surface(&self, id: SurfaceId) -> &FakeSurface {
        &self.surfaces[id.0]
    }

    fn surface_mut(&mut self, id: SurfaceId) -> &mut FakeSurface {
        &mut self.surfaces[id.0]
    }
}

/// Fake page. Clones share the same page, so a test can keep a handle while
/// the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    page: Rc<RefCell<Page>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&self, kind: EditableSurfaceKind, value: &str) -> SurfaceId {
        let mut page = self.page.borrow_mut();
        page.surfaces.push(FakeSurface {
            kind,
            value: value.to_string(),
            selection: (0, 0),
            attached: true,
            reverts_writes: false,
            events: Vec::new(),
        });
        SurfaceId(page.surfaces.len() - 1)
    }

    pub fn add_input(&self, value: &str) -> SurfaceId {
        self.add(EditableSurfaceKind::PlainInput, value)
    }

    pub fn add_editable(&self, content: &str) -> SurfaceId {
        self.add(EditableSurfaceKind::ContentEditable, content)
    }

    /// Non-editable page text
    pub fn add_static(&self, content: &str) -> SurfaceId {
        self.add(EditableSurfaceKind::Unsupported, content)
    }

    /// Focus an input and set its selection (UTF-16 offsets)
    pub fn select_in_input(&self, id: SurfaceId, start: usize, end: usize) {
        let mut page = self.page.borrow_mut();
        page.focused = Some(id);
        page.selection = None;
        page.surface_mut(id).selection = (start, end);
    }

    /// Select `text` in the document selection inside `id`.
    /// Editable regions also take focus.
    pub fn select_text(&self, id: SurfaceId, text: &str) {
        let mut page = self.page.borrow_mut();
        if page.surface(id).kind == EditableSurfaceKind::ContentEditable {
            page.focused = Some(id);
        }
        page.selection = Some(FakeRange {
            surface: Some(id),
            text: text.to_string(),
        });
    }

    pub fn clear_selection(&self) {
        let mut page = self.page.borrow_mut();
        page.selection = None;
        if let Some(id) = page.focused {
            let caret = page.surface(id).selection.1;
            page.surface_mut(id).selection = (caret, caret);
        }
    }

    pub fn focus_on(&self, id: Option<SurfaceId>) {
        self.page.borrow_mut().focused = id;
    }

    pub fn set_bounds(&self, bounds: SelectionBounds) {
        self.page.borrow_mut().bounds = Some(bounds);
    }

    pub fn detach(&self, id: SurfaceId) {
        let mut page = self.page.borrow_mut();
        page.surface_mut(id).attached = false;
        if page.focused == Some(id) {
            page.focused = None;
        }
    }

    /// Re-render: the old element leaves the document and a copy with the
    /// same value takes focus
    pub fn rerender(&self, id: SurfaceId) -> SurfaceId {
        let old = self.page.borrow().surface(id).clone();
        self.detach(id);
        let new = self.add(old.kind, &old.value);
        let mut page = self.page.borrow_mut();
        page.surface_mut(new).selection = old.selection;
        page.focused = Some(new);
        if let Some(selection) = page.selection.as_mut() {
            if selection.surface == Some(id) {
                selection.surface = Some(new);
            }
        }
        new
    }

    /// The page's framework puts the old value back after every write
    pub fn revert_writes(&self, id: SurfaceId) {
        self.page.borrow_mut().surface_mut(id).reverts_writes = true;
    }

    pub fn refuse_insert(&self) {
        self.page.borrow_mut().refuse_insert = true;
    }

    pub fn deny_clipboard(&self) {
        self.page.borrow_mut().clipboard_denied = true;
    }

    pub fn set_canvas_target(&self, id: SurfaceId) {
        self.page.borrow_mut().canvas_target = Some(id);
    }

    pub fn set_value(&self, id: SurfaceId, value: &str) {
        self.page.borrow_mut().surface_mut(id).value = value.to_string();
    }

    pub fn advance_clock(&self, ms: f64) {
        self.page.borrow_mut().clock += ms;
    }

    // ---- inspection ----

    pub fn value(&self, id: SurfaceId) -> String {
        self.page.borrow().surface(id).value.clone()
    }

    pub fn caret(&self, id: SurfaceId) -> (usize, usize) {
        self.page.borrow().surface(id).selection
    }

    pub fn events(&self, id: SurfaceId) -> Vec<&'static str> {
        self.page.borrow().surface(id).events.clone()
    }

    pub fn clipboard(&self) -> Vec<String> {
        self.page.borrow().clipboard.clone()
    }

    pub fn pasted(&self) -> Vec<(SurfaceId, String)> {
        self.page.borrow().pasted.clone()
    }
}

impl Clipboard for FakeHost {
    fn write_text(&self, text: &str) -> Result<(), HostError> {
        let mut page = self.page.borrow_mut();
        if page.clipboard_denied {
            return Err(HostError::Js("Document is not focused.".into()));
        }
        page.clipboard.push(text.to_string());
        Ok(())
    }
}

impl HostPage for FakeHost {
    type Surface = SurfaceId;
    type Range = FakeRange;

    fn selected_text(&self) -> Option<String> {
        self.page.borrow().selection.as_ref().map(|s| s.text.clone())
    }

    fn current_range(&self) -> Option<FakeRange> {
        self.page.borrow().selection.clone()
    }

    fn selection_bounds(&self) -> Option<SelectionBounds> {
        let page = self.page.borrow();
        page.selection.as_ref().and(page.bounds)
    }

    fn restore_range(&self, range: &FakeRange) -> Result<(), HostError> {
        let mut page = self.page.borrow_mut();
        if let Some(id) = range.surface {
            if !page.surface(id).attached {
                return Err(HostError::Detached);
            }
        }
        page.selection = Some(range.clone());
        Ok(())
    }

    fn insert_at_caret(&self, text: &str) -> Result<bool, HostError> {
        let mut page = self.page.borrow_mut();
        if page.refuse_insert {
            return Ok(false);
        }
        let Some(FakeRange { surface: Some(id), text: selected }) = page.selection.clone() else {
            return Ok(false);
        };
        let surface = page.surface_mut(id);
        if !surface.attached || surface.kind != EditableSurfaceKind::ContentEditable {
            return Ok(false);
        }
        let Some(at) = surface.value.find(&selected) else {
            return Ok(false);
        };
        surface.value.replace_range(at..at + selected.len(), text);
        surface.events.push("input");
        page.selection = None;
        Ok(true)
    }

    fn focused_surface(&self) -> Option<SurfaceId> {
        self.page.borrow().focused
    }

    fn classify(&self, surface: &SurfaceId) -> EditableSurfaceKind {
        self.page.borrow().surface(*surface).kind
    }

    fn is_attached(&self, surface: &SurfaceId) -> bool {
        self.page.borrow().surface(*surface).attached
    }

    fn focus(&self, surface: &SurfaceId) -> Result<(), HostError> {
        let mut page = self.page.borrow_mut();
        if !page.surface(*surface).attached {
            return Err(HostError::Detached);
        }
        page.focused = Some(*surface);
        Ok(())
    }

    fn read_selection_offsets(&self, surface: &SurfaceId) -> Result<(usize, usize), HostError> {
        let page = self.page.borrow();
        let surface = page.surface(*surface);
        match surface.kind {
            EditableSurfaceKind::PlainInput => Ok(surface.selection),
            _ => Err(HostError::Unsupported("not an input".into())),
        }
    }

    fn read_value(&self, surface: &SurfaceId) -> Result<String, HostError> {
        Ok(self.page.borrow().surface(*surface).value.clone())
    }

    fn write_value(&self, surface: &SurfaceId, value: &str) -> Result<(), HostError> {
        let mut page = self.page.borrow_mut();
        let surface = page.surface_mut(*surface);
        if !surface.attached {
            return Err(HostError::Detached);
        }
        if !surface.reverts_writes {
            surface.value = value.to_string();
        }
        Ok(())
    }

    fn set_caret(&self, surface: &SurfaceId, caret: usize) -> Result<(), HostError> {
        self.page.borrow_mut().surface_mut(*surface).selection = (caret, caret);
        Ok(())
    }

    fn dispatch_change_notification(&self, surface: &SurfaceId) -> Result<(), HostError> {
        let mut page = self.page.borrow_mut();
        let events = &mut page.surface_mut(*surface).events;
        events.push("input");
        events.push("change");
        Ok(())
    }

    fn canvas_editor_target(&self) -> Option<SurfaceId> {
        self.page.borrow().canvas_target
    }

    fn dispatch_paste(&self, target: &SurfaceId, text: &str) -> Result<bool, HostError> {
        self.page.borrow_mut().pasted.push((*target, text.to_string()));
        Ok(true)
    }

    fn now_ms(&self) -> f64 {
        self.page.borrow().clock
    }
}

/// Slice of an input value by UTF-16 range, for assertions
pub fn input_slice(host: &FakeHost, id: SurfaceId, start: usize, end: usize) -> Option<String> {
    let value = host.value(id);
    slice_utf16(&value, TextRange::new(start, end)).map(str::to_string)
}

/// Assistant whose replies are fed in by the test.
///
/// Each request consumes the next queued reply; a gated reply stays pending
/// until the test sends on the returned channel.
#[derive(Clone, Default)]
pub struct FakeAssistant {
    state: Rc<AssistantState>,
}

#[derive(Default)]
struct AssistantState {
    replies: RefCell<VecDeque<oneshot::Receiver<Result<String, String>>>>,
    requests: RefCell<Vec<AssistRequest>>,
    unreachable: Cell<bool>,
}

impl FakeAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, reply: Result<&str, &str>) -> &Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(reply.map(str::to_string).map_err(str::to_string));
        self.state.replies.borrow_mut().push_back(rx);
        self
    }

    pub fn gate(&self) -> oneshot::Sender<Result<String, String>> {
        let (tx, rx) = oneshot::channel();
        self.state.replies.borrow_mut().push_back(rx);
        tx
    }

    pub fn go_unreachable(&self) {
        self.state.unreachable.set(true);
    }

    pub fn requests(&self) -> Vec<AssistRequest> {
        self.state.requests.borrow().clone()
    }
}

impl Assistant for FakeAssistant {
    async fn request(&self, request: AssistRequest) -> Result<String, String> {
        self.state.requests.borrow_mut().push(request);
        let next = self.state.replies.borrow_mut().pop_front();
        match next {
            Some(rx) => rx.await.unwrap_or_else(|_| Err("reply channel dropped".to_string())),
            None => Err("no reply scripted".to_string()),
        }
    }

    fn is_reachable(&self) -> bool {
        !self.state.unreachable.get()
    }
}
