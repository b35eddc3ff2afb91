use serde::{Deserialize, Serialize};

pub const MAX_DAILY_GRANTS: u32 = 10;
pub const GRANT_COOLDOWN_MS: u64 = 10 * 60 * 1000;

pub const AD_REWARD: u32 = 200;
pub const SHARE_REWARD: u32 = 100;

/// External reward triggers. The engine does not know how the reward
/// was earned — ad SDK, share sheet — only which credit to apply once
/// the collaborator reports success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardKind {
    AdView,
    Share,
}

impl RewardKind {
    pub fn credit(self) -> u32 {
        match self {
            RewardKind::AdView => AD_REWARD,
            RewardKind::Share => SHARE_REWARD,
        }
    }
}

/// Daily-cap bookkeeping, persisted in local storage. `date` is an
/// opaque calendar-day label supplied by the caller; when it changes
/// the counters reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RewardLedger {
    pub date: String,
    pub count_today: u32,
    pub last_grant_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantDecision {
    Granted { credit: u32 },
    DailyCapReached,
    CoolingDown { remaining_ms: u64 },
}

impl RewardLedger {
    /// Decides whether a reward may be granted at `now_ms` on calendar
    /// day `today`, and records it if so. The caller applies the
    /// returned credit through the progress store.
    pub fn try_grant(&mut self, kind: RewardKind, today: &str, now_ms: u64) -> GrantDecision {
        if self.date != today {
            self.date = today.to_string();
            self.count_today = 0;
            self.last_grant_ms = 0;
        }
        if self.count_today >= MAX_DAILY_GRANTS {
            return GrantDecision::DailyCapReached;
        }
        if self.last_grant_ms > 0 {
            let elapsed = now_ms.saturating_sub(self.last_grant_ms);
            if elapsed < GRANT_COOLDOWN_MS {
                return GrantDecision::CoolingDown {
                    remaining_ms: GRANT_COOLDOWN_MS - elapsed,
                };
            }
        }
        self.count_today += 1;
        self.last_grant_ms = now_ms;
        GrantDecision::Granted {
            credit: kind.credit(),
        }
    }

    pub fn grants_left(&self, today: &str) -> u32 {
        if self.date != today {
            return MAX_DAILY_GRANTS;
        }
        MAX_DAILY_GRANTS.saturating_sub(self.count_today)
    }
}
