//! Clipboard writes
//!
//! `navigator.clipboard.writeText` is preferred. Pages served without a
//! secure context lack it; there a hidden textarea plus `execCommand("copy")`
//! is used instead.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use super::{js_error, js_message, DomHost};
use crate::host::{Clipboard, HostError};

impl Clipboard for DomHost {
    fn write_text(&self, text: &str) -> Result<(), HostError> {
        let navigator = self.window()?.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .unwrap_or(JsValue::UNDEFINED);
        let write = if clipboard.is_object() {
            js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
                .unwrap_or(JsValue::UNDEFINED)
        } else {
            JsValue::UNDEFINED
        };

        let Some(write) = write.dyn_ref::<js_sys::Function>() else {
            return self.copy_with_exec_command(text);
        };

        let promise = write
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(js_error)?;
        let promise = js_sys::Promise::resolve(&promise);
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("clipboard: writeText rejected: {}", js_message(&err));
            }
        });
        Ok(())
    }
}

impl DomHost {
    fn copy_with_exec_command(&self, text: &str) -> Result<(), HostError> {
        let document = self.document()?;
        let body = document
            .body()
            .ok_or_else(|| HostError::Unsupported("no body".into()))?;
        let area: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| HostError::Unsupported("textarea".into()))?;
        area.set_value(text);
        area.set_attribute("readonly", "")
            .and_then(|_| area.set_attribute("style", "position:fixed;top:0;left:0;opacity:0"))
            .map_err(js_error)?;
        body.append_child(&area).map_err(js_error)?;
        area.select();

        let copied = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| HostError::Unsupported("not an HTML document".into()))
            .and_then(|html| html.exec_command("copy").map_err(js_error));
        area.remove();

        match copied? {
            true => Ok(()),
            false => Err(HostError::Unsupported("copy command refused".into())),
        }
    }
}
