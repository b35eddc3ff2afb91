use serde::{Deserialize, Serialize};

use mojimaze_core::progress::ProgressRecord;
use mojimaze_core::rewards::RewardLedger;

pub(crate) const PROGRESS_VERSION: u32 = 1;
pub(crate) const REWARDS_VERSION: u32 = 1;
pub(crate) const USER_VERSION: u32 = 1;

pub(crate) const PROGRESS_KEY: &str = "mojimaze.progress.v1";
pub(crate) const SNAPSHOT_KEY: &str = "mojimaze.snapshot.v1";
pub(crate) const REWARDS_KEY: &str = "mojimaze.rewards.v1";
pub(crate) const USER_KEY: &str = "mojimaze.user.v1";

#[derive(Clone, Serialize, Deserialize)]
pub(crate) struct ProgressBlob {
    pub(crate) version: u32,
    pub(crate) record: ProgressRecord,
}

impl Default for ProgressBlob {
    fn default() -> Self {
        Self {
            version: PROGRESS_VERSION,
            record: ProgressRecord::default(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub(crate) struct RewardsBlob {
    pub(crate) version: u32,
    pub(crate) ledger: RewardLedger,
}

impl Default for RewardsBlob {
    fn default() -> Self {
        Self {
            version: REWARDS_VERSION,
            ledger: RewardLedger::default(),
        }
    }
}

/// The signed-in identity, if any. Only the id is required; the email
/// rides along to the remote record for support lookups.
#[derive(Clone, Serialize, Deserialize)]
pub(crate) struct UserBlob {
    pub(crate) version: u32,
    pub(crate) user_id: String,
    pub(crate) email: Option<String>,
}
