//! Synthetic DOM events

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, ClipboardEventInit, DataTransfer, Element, Event, EventInit};

/// Dispatch a bubbling, non-cancelable event of type `kind`
pub fn dispatch_bubbling(target: &Element, kind: &str) -> Result<(), JsValue> {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict(kind, &init)?;
    target.dispatch_event(&event)?;
    Ok(())
}

/// Dispatch a `paste` event whose clipboard data carries `text`.
///
/// The payload rides on the event itself, so it does not depend on the
/// asynchronous clipboard write having finished.
pub fn dispatch_paste(target: &Element, text: &str) -> Result<(), JsValue> {
    let data = DataTransfer::new()?;
    data.set_data("text/plain", text)?;

    let init = ClipboardEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_clipboard_data(Some(&data));

    let event = ClipboardEvent::new_with_event_init_dict("paste", &init)?;
    target.dispatch_event(&event)?;
    Ok(())
}

/// Assign `value` through the element prototype's `value` setter.
///
/// React and similar libraries shadow the instance property to track
/// changes; going through the prototype setter keeps their tracker honest.
pub fn set_native_value(element: &Element, value: &str) -> Result<(), JsValue> {
    let prototype = js_sys::Object::get_prototype_of(element);
    let descriptor = js_sys::Object::get_own_property_descriptor(&prototype, &JsValue::from_str("value"));
    if descriptor.is_undefined() {
        return Err(JsValue::from_str("no value descriptor on prototype"));
    }
    let setter = js_sys::Reflect::get(&descriptor, &JsValue::from_str("set"))?;
    let setter = setter
        .dyn_into::<js_sys::Function>()
        .map_err(|_| JsValue::from_str("value descriptor has no setter"))?;
    setter.call1(element, &JsValue::from_str(value))?;
    Ok(())
}
