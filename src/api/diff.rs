//! Standalone diff export

use wasm_bindgen::prelude::*;

use super::helpers::serialize;
use crate::diff::diff_words;

/// Word diff of two strings as `[{kind, text}, ...]`
#[wasm_bindgen(js_name = diffWords)]
pub fn diff_words_js(original: &str, corrected: &str) -> Result<JsValue, JsValue> {
    serialize(&diff_words(original, corrected), "diffWords")
}

/// Inserted/deleted word counts for two strings
#[wasm_bindgen(js_name = diffStats)]
pub fn diff_stats_js(original: &str, corrected: &str) -> Result<JsValue, JsValue> {
    serialize(&diff_words(original, corrected).stats(), "diffStats")
}
