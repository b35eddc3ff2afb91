use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

// Thin localStorage wrapper. Every read tolerates a missing browser
// storage, a missing key, or malformed content by returning `None`;
// callers fall back to defaults. Writes are best-effort.

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub(crate) fn get_string(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub(crate) fn set_string(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            gloo::console::warn!("storage write failed", key);
        }
    }
}

pub(crate) fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub(crate) fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = get_string(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(_) => {
            gloo::console::warn!("discarding malformed record", key);
            None
        }
    }
}

pub(crate) fn set_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => set_string(key, &raw),
        Err(_) => gloo::console::warn!("failed to serialize record", key),
    }
}

/// Binary blobs (rkyv snapshots) ride in localStorage as base64.
pub(crate) fn get_bytes(key: &str) -> Option<Vec<u8>> {
    let raw = get_string(key)?;
    match STANDARD.decode(raw.as_bytes()) {
        Ok(bytes) => Some(bytes),
        Err(_) => {
            gloo::console::warn!("discarding malformed blob", key);
            None
        }
    }
}

pub(crate) fn set_bytes(key: &str, bytes: &[u8]) {
    set_string(key, &STANDARD.encode(bytes));
}
