use std::cell::Cell;

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

// Bridge to the loader shim on the host page. The page installs a
// `__MJ_BOOT` object before the wasm module loads; every call here is
// optional, so the game also runs on a bare page with no shim.

thread_local! {
    static READY_SENT: Cell<bool> = Cell::new(false);
}

fn with_boot<F: FnOnce(&js_sys::Object)>(action: F) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(value) = Reflect::get(&window, &JsValue::from_str("__MJ_BOOT")) else {
        return;
    };
    if value.is_null() || value.is_undefined() {
        return;
    }
    let Ok(obj) = value.dyn_into::<js_sys::Object>() else {
        return;
    };
    action(&obj);
}

fn call(method: &str, args: &[JsValue]) {
    with_boot(|boot| {
        let Ok(value) = Reflect::get(boot, &JsValue::from_str(method)) else {
            return;
        };
        let Ok(func) = value.dyn_into::<Function>() else {
            return;
        };
        let array = js_sys::Array::new();
        for arg in args {
            array.push(arg);
        }
        let _ = func.apply(boot, &array);
    });
}

pub(crate) fn set_phase(label: &str, detail: &str) {
    call(
        "setPhase",
        &[JsValue::from_str(label), JsValue::from_str(detail)],
    );
}

#[allow(dead_code)]
pub(crate) fn fail(code: &str, message: &str, hint: &str) {
    call(
        "fail",
        &[
            JsValue::from_str(code),
            JsValue::from_str(message),
            JsValue::from_str(hint),
        ],
    );
}

/// Idempotent; the loader hides its splash on the first call.
pub(crate) fn ready() {
    let already_sent = READY_SENT.with(|flag| {
        if flag.get() {
            true
        } else {
            flag.set(true);
            false
        }
    });
    if already_sent {
        return;
    }
    call("ready", &[]);
}
