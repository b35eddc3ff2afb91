use std::cell::RefCell;

use mojimaze_core::codec::{decode, encode};
use mojimaze_core::progress::ProgressRecord;
use mojimaze_core::rewards::RewardLedger;
use mojimaze_core::snapshot::{GameSnapshot, PuzzleSnapshot};

use crate::persisted::{
    ProgressBlob, RewardsBlob, UserBlob, PROGRESS_KEY, PROGRESS_VERSION, REWARDS_KEY,
    REWARDS_VERSION, SNAPSHOT_KEY, USER_KEY, USER_VERSION,
};
use crate::storage;

// Single owner of durable local state. Everything else goes through
// these accessors; no other module touches localStorage. Caches are
// write-through: localStorage is synchronous, so every update lands
// on disk before the caller continues.

thread_local! {
    static PROGRESS_CACHE: RefCell<Option<ProgressRecord>> = RefCell::new(None);
    static REWARDS_CACHE: RefCell<Option<RewardLedger>> = RefCell::new(None);
    static USER_CACHE: RefCell<Option<UserBlob>> = RefCell::new(None);
}

pub(crate) fn bootstrap() {
    let progress = storage::get_json::<ProgressBlob>(PROGRESS_KEY)
        .filter(|blob| blob.version == PROGRESS_VERSION)
        .map(|blob| blob.record.sanitized())
        .unwrap_or_default();
    let rewards = storage::get_json::<RewardsBlob>(REWARDS_KEY)
        .filter(|blob| blob.version == REWARDS_VERSION)
        .map(|blob| blob.ledger)
        .unwrap_or_default();
    let user = storage::get_json::<UserBlob>(USER_KEY).filter(|blob| blob.version == USER_VERSION);
    PROGRESS_CACHE.with(|slot| *slot.borrow_mut() = Some(progress));
    REWARDS_CACHE.with(|slot| *slot.borrow_mut() = Some(rewards));
    USER_CACHE.with(|slot| *slot.borrow_mut() = user);
}

pub(crate) fn progress() -> ProgressRecord {
    PROGRESS_CACHE
        .with(|slot| slot.borrow().clone())
        .unwrap_or_default()
}

pub(crate) fn update_progress<F>(update: F) -> ProgressRecord
where
    F: FnOnce(&mut ProgressRecord),
{
    let record = PROGRESS_CACHE.with(|slot| {
        let mut record = slot.borrow().clone().unwrap_or_default();
        update(&mut record);
        *slot.borrow_mut() = Some(record.clone());
        record
    });
    storage::set_json(
        PROGRESS_KEY,
        &ProgressBlob {
            version: PROGRESS_VERSION,
            record: record.clone(),
        },
    );
    record
}

pub(crate) fn rewards_ledger() -> RewardLedger {
    REWARDS_CACHE
        .with(|slot| slot.borrow().clone())
        .unwrap_or_default()
}

pub(crate) fn update_rewards<F>(update: F) -> RewardLedger
where
    F: FnOnce(&mut RewardLedger),
{
    let ledger = REWARDS_CACHE.with(|slot| {
        let mut ledger = slot.borrow().clone().unwrap_or_default();
        update(&mut ledger);
        *slot.borrow_mut() = Some(ledger.clone());
        ledger
    });
    storage::set_json(
        REWARDS_KEY,
        &RewardsBlob {
            version: REWARDS_VERSION,
            ledger: ledger.clone(),
        },
    );
    ledger
}

pub(crate) fn user() -> Option<UserBlob> {
    USER_CACHE.with(|slot| slot.borrow().clone())
}

pub(crate) fn set_user(user: Option<UserBlob>) {
    USER_CACHE.with(|slot| *slot.borrow_mut() = user.clone());
    match user {
        Some(user) => storage::set_json(USER_KEY, &user),
        None => storage::remove(USER_KEY),
    }
}

pub(crate) fn load_snapshot() -> Option<PuzzleSnapshot> {
    let bytes = storage::get_bytes(SNAPSHOT_KEY)?;
    decode::<GameSnapshot>(&bytes)?.accept()
}

pub(crate) fn save_snapshot(puzzle: PuzzleSnapshot) {
    let snapshot = GameSnapshot::wrap(puzzle);
    if let Some(bytes) = encode(&snapshot) {
        storage::set_bytes(SNAPSHOT_KEY, &bytes);
    }
}

pub(crate) fn clear_snapshot() {
    storage::remove(SNAPSHOT_KEY);
}
