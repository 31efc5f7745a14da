//! `GrammarPanel`: the content script's handle on one panel controller

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::helpers::{deserialize, require_text, serialize, to_js_error};
use super::types::{ReplaceReport, SubmitReport};
use crate::dom::{ChromeStorage, DomHost, RuntimeAssistant};
use crate::panel::{AssistAction, PanelController, PanelError};
use crate::selection::{CaptureTrigger, SnapshotInfo};
use crate::settings::{load_or_default, Settings};

type Controller = PanelController<DomHost, RuntimeAssistant>;

#[wasm_bindgen]
pub struct GrammarPanel {
    inner: Rc<Controller>,
}

/// Snapshot info, or `null` when there was nothing to capture
fn opened(result: Result<SnapshotInfo, PanelError>) -> Result<JsValue, JsValue> {
    match result {
        Ok(info) => serialize(&info, "snapshot"),
        Err(PanelError::NoSelection) => Ok(JsValue::NULL),
        Err(err) => Err(to_js_error(err)),
    }
}

#[wasm_bindgen]
impl GrammarPanel {
    /// `send_message` forwards one request object to the background worker
    /// and returns a promise of its reply.
    #[wasm_bindgen(constructor)]
    pub fn new(send_message: js_sys::Function) -> GrammarPanel {
        GrammarPanel {
            inner: Rc::new(PanelController::new(DomHost::new(), RuntimeAssistant::new(send_message))),
        }
    }

    /// Load stored settings (defaults if storage is unreachable)
    #[wasm_bindgen(js_name = loadSettings)]
    pub fn load_settings(&self) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let settings = load_or_default(&ChromeStorage).await;
            inner.apply_settings(settings);
            serialize(&inner.settings(), "settings")
        })
    }

    /// Apply settings pushed from the options page
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&self, settings: JsValue) -> Result<(), JsValue> {
        let settings: Settings = deserialize(settings, "Invalid settings")?;
        self.inner.apply_settings(settings);
        Ok(())
    }

    /// Capture after a mouse-up at page coordinates `(x, y)`
    #[wasm_bindgen(js_name = captureSelection)]
    pub fn capture_selection(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        opened(self.inner.open(CaptureTrigger::Pointer { x, y }))
    }

    /// Capture after a keyboard shortcut
    #[wasm_bindgen(js_name = captureKeyboardSelection)]
    pub fn capture_keyboard_selection(&self) -> Result<JsValue, JsValue> {
        opened(self.inner.open(CaptureTrigger::Keyboard))
    }

    /// Open on text handed over by the context menu
    #[wasm_bindgen(js_name = openWithText)]
    pub fn open_with_text(&self, text: &str) -> Result<JsValue, JsValue> {
        require_text(text, "selection text")?;
        opened(self.inner.open_with_text(text))
    }

    /// Send a request; `action` defaults to a grammar check with the stored
    /// language and tone. Rejects while another request is in flight.
    pub fn submit(&self, action: JsValue) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let action: AssistAction = if action.is_undefined() || action.is_null() {
                inner.default_action()
            } else {
                deserialize(action, "Invalid action")?
            };
            let outcome = inner.submit(action).await.map_err(to_js_error)?;
            serialize(
                &SubmitReport {
                    outcome,
                    state: inner.state(),
                },
                "submit",
            )
        })
    }

    /// Write the result into the page, or copy it when that is impossible
    pub fn replace(&self) -> Result<JsValue, JsValue> {
        let result = self.inner.replace().map_err(to_js_error)?;
        serialize(&ReplaceReport::from(result), "replace")
    }

    #[wasm_bindgen(js_name = copyResult)]
    pub fn copy_result(&self) -> Result<(), JsValue> {
        self.inner.copy_result().map_err(to_js_error)
    }

    pub fn dismiss(&self) {
        self.inner.dismiss();
    }

    #[wasm_bindgen(js_name = dismissMessage)]
    pub fn dismiss_message(&self) {
        self.inner.dismiss_message();
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.state(), "state")
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.snapshot(), "snapshot")
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.inner.is_busy()
    }
}
