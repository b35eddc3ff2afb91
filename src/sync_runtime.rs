use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;

use mojimaze_core::protocol::{ClientMsg, ServerMsg};
use mojimaze_core::reconcile::{
    apply_choice, reconcile, ConflictChoice, ReconcileAction, RemoteSnapshot,
};

use crate::persisted::UserBlob;
use crate::persisted_store;
use crate::remote_sync::RemoteSyncAdapter;

const SAVE_DEBOUNCE_MS: u32 = 800;
const RECONNECT_DELAY_MS: u32 = 3_000;

fn sync_url() -> &'static str {
    option_env!("MOJIMAZE_SYNC_URL").unwrap_or("wss://sync.mojimaze.app/ws")
}

// Remote-save orchestration. Local play never waits on the network:
// writes are debounced and fire-and-forget, and while a conflict is
// awaiting the player's decision no pushes leave this module.

struct SyncRuntime {
    adapter: RemoteSyncAdapter,
    save_timer: Option<Timeout>,
    reconnect_timer: Option<Timeout>,
    pending_conflict: Option<RemoteSnapshot>,
    reconcile_in_flight: bool,
    online: bool,
    dirty: bool,
}

impl SyncRuntime {
    fn new() -> Self {
        Self {
            adapter: RemoteSyncAdapter::new(),
            save_timer: None,
            reconnect_timer: None,
            pending_conflict: None,
            reconcile_in_flight: false,
            online: true,
            dirty: false,
        }
    }
}

thread_local! {
    static RUNTIME: RefCell<SyncRuntime> = RefCell::new(SyncRuntime::new());
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

fn connect_locked(runtime: &mut SyncRuntime) {
    let on_msg: Rc<dyn Fn(ServerMsg)> = Rc::new(handle_server_msg);
    let on_open: Rc<dyn Fn()> = Rc::new(on_socket_open);
    let on_down: Rc<dyn Fn()> = Rc::new(on_socket_down);
    runtime.adapter.connect(sync_url(), on_msg, on_open, on_down);
}

/// Signs the player in and starts a load-then-reconcile round trip.
pub(crate) fn sign_in(user_id: &str, email: Option<String>) {
    persisted_store::set_user(Some(UserBlob {
        version: crate::persisted::USER_VERSION,
        user_id: user_id.to_string(),
        email,
    }));
    RUNTIME.with(|slot| {
        let mut runtime = slot.borrow_mut();
        runtime.pending_conflict = None;
        runtime.reconcile_in_flight = false;
        if runtime.online {
            connect_locked(&mut runtime);
        }
    });
}

pub(crate) fn sign_out() {
    RUNTIME.with(|slot| {
        let mut runtime = slot.borrow_mut();
        runtime.adapter.disconnect();
        runtime.save_timer = None;
        runtime.reconnect_timer = None;
        runtime.pending_conflict = None;
        runtime.reconcile_in_flight = false;
        runtime.dirty = false;
    });
    persisted_store::set_user(None);
}

pub(crate) fn set_online(online: bool) {
    let should_connect = RUNTIME.with(|slot| {
        let mut runtime = slot.borrow_mut();
        runtime.online = online;
        if !online {
            runtime.adapter.disconnect();
            runtime.reconnect_timer = None;
            return false;
        }
        !runtime.adapter.is_open()
    });
    if should_connect && persisted_store::user().is_some() {
        RUNTIME.with(|slot| connect_locked(&mut slot.borrow_mut()));
    }
}

/// Notes that local progress changed and arms the debounced push.
/// Calling again before the timer fires restarts the window.
pub(crate) fn schedule_save() {
    if persisted_store::user().is_none() {
        return;
    }
    RUNTIME.with(|slot| {
        let mut runtime = slot.borrow_mut();
        runtime.dirty = true;
        runtime.save_timer = Some(Timeout::new(SAVE_DEBOUNCE_MS, push_now));
    });
}

fn push_now() {
    let Some(user) = persisted_store::user() else {
        return;
    };
    let blocked = RUNTIME.with(|slot| slot.borrow().pending_conflict.is_some());
    if blocked {
        return;
    }
    let record = persisted_store::progress();
    let snapshot = RemoteSnapshot::from_progress(&record, user.email.clone(), now_ms());
    RUNTIME.with(|slot| {
        let runtime = slot.borrow();
        runtime.adapter.send(ClientMsg::SaveProgress {
            user_id: user.user_id.clone(),
            snapshot,
        });
    });
}

fn on_socket_open() {
    let Some(user) = persisted_store::user() else {
        return;
    };
    RUNTIME.with(|slot| {
        let mut runtime = slot.borrow_mut();
        // One reconciliation at a time. An outstanding load or an open
        // conflict prompt blocks a new one.
        if runtime.reconcile_in_flight || runtime.pending_conflict.is_some() {
            return;
        }
        runtime.reconcile_in_flight = true;
        runtime.adapter.send(ClientMsg::LoadProgress {
            user_id: user.user_id,
        });
    });
}

fn on_socket_down() {
    let retry = RUNTIME.with(|slot| {
        let mut runtime = slot.borrow_mut();
        // An outstanding load will never be answered on this socket.
        runtime.reconcile_in_flight = false;
        runtime.online && persisted_store::user().is_some()
    });
    if !retry {
        return;
    }
    RUNTIME.with(|slot| {
        slot.borrow_mut().reconnect_timer = Some(Timeout::new(RECONNECT_DELAY_MS, || {
            let online = RUNTIME.with(|s| s.borrow().online);
            if online && persisted_store::user().is_some() {
                RUNTIME.with(|s| connect_locked(&mut s.borrow_mut()));
            }
        }));
    });
}

fn handle_server_msg(msg: ServerMsg) {
    match msg {
        ServerMsg::Progress { user_id, snapshot } => {
            let matches = persisted_store::user()
                .map(|user| user.user_id == user_id)
                .unwrap_or(false);
            if !matches {
                return;
            }
            // An open conflict prompt owns the decision; later records
            // must not replace it under the player.
            if RUNTIME.with(|slot| slot.borrow().pending_conflict.is_some()) {
                return;
            }
            let action = reconcile(&persisted_store::progress(), snapshot.as_ref());
            RUNTIME.with(|slot| slot.borrow_mut().reconcile_in_flight = false);
            match action {
                ReconcileAction::PushLocal => push_now(),
                ReconcileAction::NoOp => {}
                ReconcileAction::Conflict { remote } => {
                    gloo::console::log!("remote save: progress conflict, awaiting choice");
                    RUNTIME.with(|slot| slot.borrow_mut().pending_conflict = Some(remote));
                }
            }
        }
        ServerMsg::Saved { user_id: _ } => {
            RUNTIME.with(|slot| slot.borrow_mut().dirty = false);
        }
        ServerMsg::Pong { nonce: _ } => {}
        ServerMsg::Error { code, message } => {
            gloo::console::warn!("remote save: server error", code, message);
        }
    }
}

pub(crate) fn pending_conflict() -> Option<RemoteSnapshot> {
    RUNTIME.with(|slot| slot.borrow().pending_conflict.clone())
}

/// Applies the player's conflict decision. Returns `true` when the
/// local record was replaced by the remote one, so the caller can
/// refresh the in-play session.
pub(crate) fn resolve_conflict(choice: ConflictChoice) -> bool {
    let Some(remote) = RUNTIME.with(|slot| slot.borrow_mut().pending_conflict.take()) else {
        return false;
    };
    let mut push = false;
    persisted_store::update_progress(|record| {
        push = apply_choice(choice, record, &remote);
    });
    if push {
        push_now();
    }
    choice == ConflictChoice::KeepRemote
}

pub(crate) fn status_json() -> String {
    let user = persisted_store::user();
    let record = persisted_store::progress();
    let (connected, dirty, reconciling) = RUNTIME.with(|slot| {
        let runtime = slot.borrow();
        (
            runtime.adapter.is_open(),
            runtime.dirty,
            runtime.reconcile_in_flight,
        )
    });
    let conflict = pending_conflict();
    serde_json::json!({
        "signed_in": user.is_some(),
        "user_id": user.as_ref().map(|u| u.user_id.clone()),
        "connected": connected,
        "dirty": dirty,
        "reconciling": reconciling,
        "conflict": conflict.map(|remote| serde_json::json!({
            "local": { "level": record.level, "score": record.score },
            "remote": { "level": remote.level, "score": remote.score },
        })),
    })
    .to_string()
}
