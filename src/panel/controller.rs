//! Panel controller
//!
//! One controller per panel instance. A panel session holds the snapshot
//! captured when the panel opened and keeps it unchanged through the whole
//! request/review/replace cycle. Only one request may be in flight per
//! session; replies that arrive after the session ended are dropped.

use std::cell::{Cell, RefCell};

use super::assistant::{AssistAction, AssistRequest, Assistant};
use super::errors::PanelError;
use super::state::{PanelOutcome, PanelState};
use crate::diff::{diff_words, DiffScript};
use crate::host::HostPage;
use crate::inject::{InjectionResult, TextInjector};
use crate::selection::{CaptureTrigger, HostSnapshot, SelectionTracker, SnapshotInfo};
use crate::settings::Settings;

/// State of one open panel
struct PanelSession<H: HostPage> {
    id: u64,
    snapshot: HostSnapshot<H>,
    busy: bool,
    state: PanelState,
    result: Option<String>,
}

pub struct PanelController<H: HostPage + 'static, A: Assistant> {
    host: H,
    assistant: A,
    injector: TextInjector<H>,
    tracker: RefCell<SelectionTracker<H>>,
    session: RefCell<Option<PanelSession<H>>>,
    settings: RefCell<Settings>,
    next_session: Cell<u64>,
}

impl<H: HostPage + 'static, A: Assistant> PanelController<H, A> {
    pub fn new(host: H, assistant: A) -> Self {
        Self::with_injector(host, assistant, TextInjector::new())
    }

    pub fn with_injector(host: H, assistant: A, injector: TextInjector<H>) -> Self {
        Self {
            host,
            assistant,
            injector,
            tracker: RefCell::new(SelectionTracker::new()),
            session: RefCell::new(None),
            settings: RefCell::new(Settings::default()),
            next_session: Cell::new(1),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn settings(&self) -> Settings {
        self.settings.borrow().clone()
    }

    pub fn apply_settings(&self, settings: Settings) {
        *self.settings.borrow_mut() = settings.normalized();
    }

    /// Grammar check with the configured defaults
    pub fn default_action(&self) -> AssistAction {
        let settings = self.settings.borrow();
        AssistAction::Check {
            language: settings.default_grammar_lang.clone(),
            tone: settings.default_tone,
        }
    }

    // ---- lifecycle ----

    /// Open the panel on the live page selection.
    ///
    /// An empty selection leaves any open panel and its snapshot untouched.
    pub fn open(&self, trigger: CaptureTrigger) -> Result<SnapshotInfo, PanelError> {
        let snapshot = self
            .tracker
            .borrow_mut()
            .capture_selection(&self.host, trigger)
            .cloned()
            .ok_or(PanelError::NoSelection)?;
        Ok(self.start_session(snapshot))
    }

    /// Open the panel on text supplied by the browser (context menu)
    pub fn open_with_text(&self, text: &str) -> Result<SnapshotInfo, PanelError> {
        let snapshot = self
            .tracker
            .borrow_mut()
            .capture_from_external_text(&self.host, text)
            .cloned()
            .ok_or(PanelError::NoSelection)?;
        Ok(self.start_session(snapshot))
    }

    fn start_session(&self, snapshot: HostSnapshot<H>) -> SnapshotInfo {
        let id = self.next_session.get();
        self.next_session.set(id + 1);
        let info = SnapshotInfo::from(&snapshot);
        log::info!("panel: session {} opened ({:?})", id, info.kind);
        *self.session.borrow_mut() = Some(PanelSession {
            id,
            snapshot,
            busy: false,
            state: PanelState::Idle,
            result: None,
        });
        info
    }

    /// Close the panel. A reply still in flight will be discarded.
    pub fn dismiss(&self) {
        if let Some(session) = self.session.borrow_mut().take() {
            log::info!("panel: session {} dismissed", session.id);
        }
        self.tracker.borrow_mut().clear();
    }

    pub fn is_open(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.session.borrow().as_ref().is_some_and(|s| s.busy)
    }

    pub fn state(&self) -> PanelState {
        self.session
            .borrow()
            .as_ref()
            .map(|s| s.state.clone())
            .unwrap_or(PanelState::Idle)
    }

    pub fn snapshot(&self) -> Option<SnapshotInfo> {
        self.session.borrow().as_ref().map(|s| SnapshotInfo::from(&s.snapshot))
    }

    /// Diff of the current result against the captured text
    pub fn diff(&self) -> Option<DiffScript> {
        match self.state() {
            PanelState::Result { diff, .. } => Some(diff),
            _ => None,
        }
    }

    /// Clear an error or notice back to the idle view
    pub fn dismiss_message(&self) {
        if let Some(session) = self.session.borrow_mut().as_mut() {
            if matches!(session.state, PanelState::Error { .. } | PanelState::Notice { .. }) {
                session.state = match &session.result {
                    Some(text) => result_state(session.snapshot.text(), text),
                    None => PanelState::Idle,
                };
            }
        }
    }

    // ---- requests ----

    /// Send the captured text to the assistant.
    ///
    /// Rejected with [`PanelError::Busy`] while a previous request for this
    /// panel is still pending.
    pub async fn submit(&self, action: AssistAction) -> Result<PanelOutcome, PanelError> {
        let (id, request) = {
            let mut guard = self.session.borrow_mut();
            let session = guard.as_mut().ok_or(PanelError::Dismissed)?;
            if session.busy {
                log::debug!("panel: session {} busy, ignoring request", session.id);
                return Err(PanelError::Busy);
            }
            if !self.assistant.is_reachable() {
                log::warn!("panel: extension runtime unreachable");
                session.state = PanelState::error(PanelError::ContextLost.to_string());
                return Err(PanelError::ContextLost);
            }
            session.busy = true;
            session.result = None;
            session.state = PanelState::Loading {
                label: action.progress_label().to_string(),
            };
            let request = AssistRequest {
                action,
                text: session.snapshot.text().to_string(),
                custom_dictionary: self.settings.borrow().custom_dictionary.words().to_vec(),
            };
            (session.id, request)
        };

        let original = request.text.clone();
        let reply = self.assistant.request(request).await;

        let mut guard = self.session.borrow_mut();
        let Some(session) = guard.as_mut().filter(|s| s.id == id) else {
            log::debug!("panel: discarding reply for closed session {}", id);
            return Ok(PanelOutcome::Discarded);
        };
        session.busy = false;

        let outcome = match reply {
            Ok(text) if text.trim() == original.trim() => {
                session.state = PanelState::NoChanges;
                PanelOutcome::NoChanges
            }
            Ok(text) => {
                session.state = result_state(&original, &text);
                session.result = Some(text);
                PanelOutcome::Completed
            }
            Err(message) => {
                log::info!("panel: request failed: {}", message);
                session.state = PanelState::error(message);
                PanelOutcome::Failed
            }
        };
        Ok(outcome)
    }

    // ---- results ----

    /// Write the result into the page (the "Replace" action).
    ///
    /// On success the panel closes; on clipboard fallback it stays open with
    /// a paste-manually notice.
    pub fn replace(&self) -> Result<InjectionResult, PanelError> {
        let (snapshot, text) = {
            let guard = self.session.borrow();
            let session = guard.as_ref().ok_or(PanelError::Dismissed)?;
            if session.busy {
                return Err(PanelError::Busy);
            }
            let text = session.result.clone().ok_or(PanelError::NoResult)?;
            (session.snapshot.clone(), text)
        };

        let result = self.injector.inject(&self.host, &snapshot, &text);
        match result.notice() {
            None => self.dismiss(),
            Some(message) => {
                if let Some(session) = self.session.borrow_mut().as_mut() {
                    session.state = PanelState::notice(message);
                }
            }
        }
        Ok(result)
    }

    /// Copy the result to the clipboard (the "Copy" action)
    pub fn copy_result(&self) -> Result<(), PanelError> {
        let text = {
            let guard = self.session.borrow();
            let session = guard.as_ref().ok_or(PanelError::Dismissed)?;
            session.result.clone().ok_or(PanelError::NoResult)?
        };
        self.host
            .write_text(&text)
            .map_err(|err| PanelError::Clipboard(err.to_string()))
    }
}

fn result_state(original: &str, text: &str) -> PanelState {
    let diff = diff_words(original, text);
    let stats = diff.stats();
    PanelState::Result {
        text: text.to_string(),
        diff,
        stats,
    }
}
