//! Extension runtime collaborators
//!
//! The grammar service is reached through a message-sending function handed
//! in by the content script (normally a wrapper over
//! `chrome.runtime.sendMessage`). Settings come from `chrome.storage.sync`.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::js_message;
use crate::panel::{AssistReply, AssistRequest, Assistant};
use crate::settings::{Settings, SettingsError, SettingsStore, SETTINGS_KEYS};

/// Walk `global.a.b.c`, returning `None` at the first missing link
fn lookup(path: &[&str]) -> Option<JsValue> {
    let mut value: JsValue = js_sys::global().into();
    for key in path {
        if !value.is_object() {
            return None;
        }
        value = js_sys::Reflect::get(&value, &JsValue::from_str(key)).ok()?;
    }
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

/// Assistant backed by the extension's background worker
pub struct RuntimeAssistant {
    send: js_sys::Function,
}

impl RuntimeAssistant {
    pub fn new(send: js_sys::Function) -> Self {
        Self { send }
    }

    async fn exchange(&self, request: &AssistRequest) -> Result<AssistReply, String> {
        let message = request
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| e.to_string())?;
        let pending = self
            .send
            .call1(&JsValue::NULL, &message)
            .map_err(|e| js_message(&e))?;
        let reply = JsFuture::from(js_sys::Promise::resolve(&pending))
            .await
            .map_err(|e| js_message(&e))?;
        if reply.is_undefined() || reply.is_null() {
            return Err("No response from the extension".to_string());
        }
        serde_wasm_bindgen::from_value(reply).map_err(|e| e.to_string())
    }
}

impl Assistant for RuntimeAssistant {
    async fn request(&self, request: AssistRequest) -> Result<String, String> {
        log::debug!("runtime: sending {} chars", request.text.len());
        self.exchange(&request).await?.into_result()
    }

    /// `chrome.runtime.id` disappears once the extension is reloaded
    fn is_reachable(&self) -> bool {
        lookup(&["chrome", "runtime", "id"]).is_some_and(|id| id.is_string())
    }
}

/// Settings read from `chrome.storage.sync`
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeStorage;

impl SettingsStore for ChromeStorage {
    async fn load(&self) -> Result<Settings, SettingsError> {
        let sync = lookup(&["chrome", "storage", "sync"]).ok_or(SettingsError::Unavailable(
            "chrome.storage.sync is not available".into(),
        ))?;
        let get = js_sys::Reflect::get(&sync, &JsValue::from_str("get"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or(SettingsError::Unavailable("storage.get is not a function".into()))?;

        let keys: js_sys::Array = SETTINGS_KEYS.iter().map(|k| JsValue::from_str(k)).collect();
        let pending = get
            .call1(&sync, &keys)
            .map_err(|e| SettingsError::Unavailable(js_message(&e)))?;
        let stored = JsFuture::from(js_sys::Promise::resolve(&pending))
            .await
            .map_err(|e| SettingsError::Unavailable(js_message(&e)))?;

        serde_wasm_bindgen::from_value(stored).map_err(|e| SettingsError::Invalid(e.to_string()))
    }
}
