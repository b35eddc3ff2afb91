use serde::{Deserialize, Serialize};

use crate::progress::ProgressRecord;

/// The remote mirror of a progress record, keyed by user id on the
/// backend. Eventually consistent with local state; may diverge while
/// the player was offline or played on another device.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct RemoteSnapshot {
    pub level: u32,
    pub score: u32,
    pub email: Option<String>,
    pub updated_at_ms: u64,
}

impl RemoteSnapshot {
    pub fn from_progress(record: &ProgressRecord, email: Option<String>, now_ms: u64) -> Self {
        Self {
            level: record.level,
            score: record.score,
            email,
            updated_at_ms: now_ms,
        }
    }
}

/// Outcome of comparing local progress against the remote save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No remote record exists yet; write the local one.
    PushLocal,
    /// Both sides agree; nothing to do.
    NoOp,
    /// The sides disagree. Resolution is never automatic: the caller
    /// presents both snapshots and applies an explicit choice. Any
    /// "higher value wins" heuristic risks discarding legitimate
    /// progress from another device.
    Conflict { remote: RemoteSnapshot },
}

/// Pure function of its two inputs; identical inputs always produce
/// the identical action.
pub fn reconcile(local: &ProgressRecord, remote: Option<&RemoteSnapshot>) -> ReconcileAction {
    let Some(remote) = remote else {
        return ReconcileAction::PushLocal;
    };
    if remote.level == local.level && remote.score == local.score {
        return ReconcileAction::NoOp;
    }
    ReconcileAction::Conflict {
        remote: remote.clone(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    KeepRemote,
    KeepLocal,
}

/// Applies the user's conflict decision as a full replacement of the
/// losing side — no merging or averaging. Returns `true` when the
/// (possibly updated) local record must now be pushed to the remote.
pub fn apply_choice(
    choice: ConflictChoice,
    local: &mut ProgressRecord,
    remote: &RemoteSnapshot,
) -> bool {
    match choice {
        ConflictChoice::KeepRemote => {
            local.level = remote.level.max(1);
            local.score = remote.score;
            false
        }
        ConflictChoice::KeepLocal => true,
    }
}
