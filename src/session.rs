use std::cell::RefCell;

use wasm_bindgen::prelude::wasm_bindgen;

use mojimaze_core::game::{GameRules, HintOutcome, HintRejection, PuzzleState, TapOutcome};
use mojimaze_core::progress::completion_reward;
use mojimaze_core::reconcile::ConflictChoice;
use mojimaze_core::rewards::{GrantDecision, RewardKind};

use crate::{persisted_store, rewards_runtime, sync_runtime};

// The live session: one PuzzleState for the level being played, plus
// the wasm-bindgen surface the page calls into. Every mutation writes
// an in-level snapshot so a tab close mid-level loses nothing.

thread_local! {
    static SESSION: RefCell<Option<PuzzleState>> = RefCell::new(None);
}

fn rules() -> GameRules {
    GameRules::default()
}

/// Restores the saved mid-level state when it is still valid for the
/// current progress, otherwise deals fresh.
pub(crate) fn start() {
    persisted_store::bootstrap();
    let progress = persisted_store::progress();
    let restored = persisted_store::load_snapshot()
        .and_then(|snapshot| PuzzleState::restore(snapshot, rules()))
        .filter(|state| state.level() == progress.level && !state.is_solved());
    let state = match restored {
        Some(state) => state,
        None => {
            persisted_store::clear_snapshot();
            PuzzleState::deal(progress.level, rules())
        }
    };
    persisted_store::save_snapshot(state.snapshot());
    SESSION.with(|slot| *slot.borrow_mut() = Some(state));
}

fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&mut PuzzleState) -> R,
{
    SESSION.with(|slot| {
        let mut guard = slot.borrow_mut();
        let state = guard
            .get_or_insert_with(|| PuzzleState::deal(persisted_store::progress().level, rules()));
        f(state)
    })
}

fn persist_session() {
    let snapshot = with_session(|state| state.snapshot());
    persisted_store::save_snapshot(snapshot);
}

fn board_json_inner() -> String {
    let view = with_session(|state| state.board_view());
    let progress = persisted_store::progress();
    serde_json::json!({
        "board": view,
        "score": progress.score,
        "grants_left": rewards_runtime::grants_left(),
    })
    .to_string()
}

#[wasm_bindgen]
pub fn board_json() -> String {
    board_json_inner()
}

/// Places the tile with the given origin index. Returns the tap
/// outcome; on a solve the progress advance has already happened and
/// the reward is included.
#[wasm_bindgen]
pub fn tap_tile(origin_index: u32) -> String {
    let outcome = with_session(|state| state.tap_tile(origin_index));
    let result = match outcome {
        TapOutcome::Ignored => serde_json::json!({ "outcome": "ignored" }),
        TapOutcome::Placed => serde_json::json!({ "outcome": "placed" }),
        TapOutcome::WordMatched { word } => {
            serde_json::json!({ "outcome": "word_matched", "word": word })
        }
        TapOutcome::Solved { word } => {
            let (level, phrase_id) =
                with_session(|state| (state.level(), state.phrase_id().to_string()));
            let earned = completion_reward(level);
            persisted_store::update_progress(|record| record.advance_level(earned, &phrase_id));
            sync_runtime::schedule_save();
            serde_json::json!({ "outcome": "solved", "word": word, "earned": earned })
        }
    };
    persist_session();
    result.to_string()
}

#[wasm_bindgen]
pub fn backspace_input() -> String {
    with_session(|state| state.backspace());
    persist_session();
    board_json_inner()
}

#[wasm_bindgen]
pub fn reset_input() -> String {
    with_session(|state| state.reset());
    persist_session();
    board_json_inner()
}

#[wasm_bindgen]
pub fn shuffle_tiles() -> String {
    with_session(|state| state.shuffle());
    persist_session();
    board_json_inner()
}

/// Buys the next hint stage. The state machine reports the cost and
/// this layer debits it, so a rejected hint can never touch the score.
#[wasm_bindgen]
pub fn request_hint() -> String {
    let score = persisted_store::progress().score;
    let outcome = with_session(|state| state.request_hint(score));
    let result = match outcome {
        HintOutcome::Advanced {
            stage,
            cost,
            message,
            flash_ms,
        } => {
            persisted_store::update_progress(|record| {
                record.debit(cost);
            });
            sync_runtime::schedule_save();
            persist_session();
            serde_json::json!({
                "granted": true,
                "stage": stage,
                "cost": cost,
                "message": message,
                "flash_ms": flash_ms,
            })
        }
        HintOutcome::Rejected(rejection) => {
            let reason = match rejection {
                HintRejection::AlreadySolved => serde_json::json!({ "reason": "already_solved" }),
                HintRejection::StageExhausted => serde_json::json!({ "reason": "stage_exhausted" }),
                HintRejection::InsufficientScore { needed, have } => serde_json::json!({
                    "reason": "insufficient_score",
                    "needed": needed,
                    "have": have,
                }),
            };
            let mut result = serde_json::json!({ "granted": false });
            if let (Some(obj), Some(extra)) = (result.as_object_mut(), reason.as_object()) {
                for (key, value) in extra {
                    obj.insert(key.clone(), value.clone());
                }
            }
            result
        }
    };
    result.to_string()
}

/// Deals the next level after a solve. A no-op board refresh when the
/// current level is still in play.
#[wasm_bindgen]
pub fn advance_level() -> String {
    let solved = with_session(|state| state.is_solved());
    if solved {
        let level = persisted_store::progress().level;
        let state = PuzzleState::deal(level, rules());
        persisted_store::save_snapshot(state.snapshot());
        SESSION.with(|slot| *slot.borrow_mut() = Some(state));
    }
    board_json_inner()
}

#[wasm_bindgen]
pub fn sign_in(user_id: String, email: Option<String>) {
    sync_runtime::sign_in(&user_id, email);
}

#[wasm_bindgen]
pub fn sign_out() {
    sync_runtime::sign_out();
}

/// Applies the player's cloud-vs-local decision. Keeping the remote
/// save replaces local progress, so the in-play level is re-dealt.
#[wasm_bindgen]
pub fn resolve_sync_conflict(keep_remote: bool) -> String {
    let choice = if keep_remote {
        ConflictChoice::KeepRemote
    } else {
        ConflictChoice::KeepLocal
    };
    if sync_runtime::resolve_conflict(choice) {
        let level = persisted_store::progress().level;
        let state = PuzzleState::deal(level, rules());
        persisted_store::save_snapshot(state.snapshot());
        SESSION.with(|slot| *slot.borrow_mut() = Some(state));
    }
    board_json_inner()
}

#[wasm_bindgen]
pub fn grant_reward(kind: &str) -> String {
    let kind = match kind {
        "ad" => RewardKind::AdView,
        "share" => RewardKind::Share,
        other => {
            return serde_json::json!({ "granted": false, "reason": "unknown_kind", "kind": other })
                .to_string()
        }
    };
    let result = match rewards_runtime::grant(kind) {
        GrantDecision::Granted { credit } => serde_json::json!({
            "granted": true,
            "credit": credit,
            "score": persisted_store::progress().score,
            "grants_left": rewards_runtime::grants_left(),
        }),
        GrantDecision::DailyCapReached => {
            serde_json::json!({ "granted": false, "reason": "daily_cap" })
        }
        GrantDecision::CoolingDown { remaining_ms } => serde_json::json!({
            "granted": false,
            "reason": "cooling_down",
            "remaining_ms": remaining_ms,
        }),
    };
    result.to_string()
}

#[wasm_bindgen]
pub fn sync_status_json() -> String {
    sync_runtime::status_json()
}
