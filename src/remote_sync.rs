use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{BinaryType, CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use mojimaze_core::codec::{decode, encode};
use mojimaze_core::protocol::{ClientMsg, ServerMsg};

#[allow(dead_code)]
struct WsHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(Event)>,
}

/// WebSocket transport to the remote-save backend. The adapter only
/// moves rkyv-framed messages; every failure path degrades to the
/// `on_down` callback so the game keeps running offline.
#[derive(Clone)]
pub(crate) struct RemoteSyncAdapter {
    ws: Rc<RefCell<Option<WebSocket>>>,
    handlers: Rc<RefCell<Option<WsHandlers>>>,
    closing: Rc<Cell<bool>>,
}

impl RemoteSyncAdapter {
    pub(crate) fn new() -> Self {
        Self {
            ws: Rc::new(RefCell::new(None)),
            handlers: Rc::new(RefCell::new(None)),
            closing: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn connect(
        &mut self,
        url: &str,
        on_server_msg: Rc<dyn Fn(ServerMsg)>,
        on_open: Rc<dyn Fn()>,
        on_down: Rc<dyn Fn()>,
    ) {
        self.disconnect();
        let closing = Rc::new(Cell::new(false));
        self.closing = closing.clone();

        let url = url.trim();
        if url.is_empty() {
            report_down(on_down);
            return;
        }
        let ws = match WebSocket::new(url) {
            Ok(ws) => ws,
            Err(_) => {
                gloo::console::warn!("remote save: failed to open socket", url);
                report_down(on_down);
                return;
            }
        };
        ws.set_binary_type(BinaryType::Arraybuffer);
        *self.ws.borrow_mut() = Some(ws.clone());

        let onopen = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: Event| {
                gloo::console::log!("remote save: connected", url.clone());
                on_open();
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            let data = event.data();
            let Ok(buffer) = data.dyn_into::<js_sys::ArrayBuffer>() else {
                return;
            };
            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
            if let Some(msg) = decode::<ServerMsg>(&bytes) {
                on_server_msg(msg);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        let onerror = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: ErrorEvent| {
                gloo::console::warn!("remote save: socket error", url.clone());
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            let ws_ref = self.ws.clone();
            let handlers_ref = self.handlers.clone();
            let closing = closing.clone();
            Closure::wrap(Box::new(move |event: Event| {
                ws_ref.borrow_mut().take();
                handlers_ref.borrow_mut().take();
                if closing.get() {
                    return;
                }
                if let Some(close) = event.dyn_ref::<CloseEvent>() {
                    gloo::console::log!("remote save: socket closed", close.code());
                }
                on_down();
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        *self.handlers.borrow_mut() = Some(WsHandlers {
            onopen,
            onmessage,
            onerror,
            onclose,
        });
    }

    pub(crate) fn is_open(&self) -> bool {
        self.ws
            .borrow()
            .as_ref()
            .map(|ws| ws.ready_state() == WebSocket::OPEN)
            .unwrap_or(false)
    }

    /// Sends a message if the socket is open; silently drops it
    /// otherwise. Lost writes are retried on the next state change.
    pub(crate) fn send(&self, msg: ClientMsg) {
        let ws = {
            let guard = self.ws.borrow();
            let Some(ws) = guard.as_ref() else {
                return;
            };
            ws.clone()
        };
        if ws.ready_state() != WebSocket::OPEN {
            return;
        }
        if let Some(bytes) = encode(&msg) {
            if ws.send_with_u8_array(&bytes).is_err() {
                gloo::console::warn!("remote save: send failed");
            }
        }
    }

    pub(crate) fn disconnect(&mut self) {
        self.closing.set(true);
        self.handlers.borrow_mut().take();
        if let Some(ws) = self.ws.borrow_mut().take() {
            let _ = ws.close();
        }
    }
}

/// Immediate connect failures report through a fresh task, never from
/// inside `connect` itself. A caller may hold its own state borrowed
/// across the call.
fn report_down(on_down: Rc<dyn Fn()>) {
    Timeout::new(0, move || on_down()).forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn failed_connect_defers_the_down_callback() {
        let guard = Rc::new(RefCell::new(0u32));
        let fired = Rc::new(Cell::new(false));
        let mut adapter = RemoteSyncAdapter::new();

        // Hold a borrow across connect, the way a runtime holding its
        // own state would; a synchronous down callback would panic here.
        let held = guard.borrow_mut();
        let on_down = {
            let guard = guard.clone();
            let fired = fired.clone();
            Rc::new(move || {
                *guard.borrow_mut() += 1;
                fired.set(true);
            }) as Rc<dyn Fn()>
        };
        adapter.connect(
            "",
            Rc::new(|_msg: ServerMsg| {}),
            Rc::new(|| {}),
            on_down,
        );
        assert!(!fired.get(), "down callback must not run inside connect");
        drop(held);
        assert!(!adapter.is_open());
    }
}
