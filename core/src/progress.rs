use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Starting balance for a fresh profile. High enough to afford the
/// first hint without grinding.
pub const STARTING_SCORE: u32 = 300;
pub const STARTING_LEVEL: u32 = 1;

/// Points awarded for completing `level`.
pub fn completion_reward(level: u32) -> u32 {
    level.saturating_mul(10)
}

/// Locally-owned progress: current level, spendable score, and the set
/// of phrase ids the player has already been dealt. The score is
/// unsigned on purpose; every debit saturates at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub level: u32,
    pub score: u32,
    #[serde(default)]
    pub used_phrase_ids: BTreeSet<String>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            level: STARTING_LEVEL,
            score: STARTING_SCORE,
            used_phrase_ids: BTreeSet::new(),
        }
    }
}

impl ProgressRecord {
    pub fn credit(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    /// Debits up to `amount`, clamping at zero. Returns the amount
    /// actually removed.
    pub fn debit(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.score);
        self.score -= taken;
        taken
    }

    /// Completes the current level: bumps the level, credits the
    /// earned score, and remembers the solved phrase.
    pub fn advance_level(&mut self, earned: u32, phrase_id: &str) {
        self.level = self.level.saturating_add(1);
        self.credit(earned);
        self.used_phrase_ids.insert(phrase_id.to_string());
    }

    /// Repairs values a corrupt store could have produced. Level 0 is
    /// not a dealable level.
    pub fn sanitized(mut self) -> Self {
        if self.level < STARTING_LEVEL {
            self.level = STARTING_LEVEL;
        }
        self
    }
}
