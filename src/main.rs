#[cfg(target_arch = "wasm32")]
mod boot;
#[cfg(target_arch = "wasm32")]
mod persisted;
#[cfg(target_arch = "wasm32")]
mod persisted_store;
#[cfg(target_arch = "wasm32")]
mod remote_sync;
#[cfg(target_arch = "wasm32")]
mod rewards_runtime;
#[cfg(target_arch = "wasm32")]
mod session;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod sync_runtime;

#[cfg(target_arch = "wasm32")]
fn main() {
    use gloo::events::EventListener;

    boot::set_phase("engine", "restoring saved game");
    session::start();

    if let Some(window) = web_sys::window() {
        EventListener::new(&window, "online", |_| sync_runtime::set_online(true)).forget();
        EventListener::new(&window, "offline", |_| sync_runtime::set_online(false)).forget();
    }
    if crate::persisted_store::user().is_some() {
        sync_runtime::set_online(true);
    }

    boot::ready();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("this binary targets wasm32; use the companion cli for native runs");
}
