//! Shared helpers for the JS-facing API
//!
//! Serialization, deserialization and error conversion used by every
//! exported function. Failures are logged before they cross into JS.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to a plain JS object.
///
/// Maps become objects and `None` becomes `null`, so the result survives
/// structured cloning through the extension messaging layer.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| {
            let msg = format!("{}: {}", error_context, e);
            log::error!("{}", msg);
            JsValue::from_str(&msg)
        })
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert an error into a JS exception value
pub fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    let msg = err.to_string();
    log::warn!("{}", msg);
    JsValue::from_str(&msg)
}

/// Reject when a required string argument is blank
pub fn require_text(text: &str, what: &str) -> Result<(), JsValue> {
    if text.trim().is_empty() {
        return Err(to_js_error(format!("{} must not be empty", what)));
    }
    Ok(())
}
