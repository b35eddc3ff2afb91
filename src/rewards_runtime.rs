use js_sys::Date;

use mojimaze_core::rewards::{GrantDecision, RewardKind};

use crate::{persisted_store, sync_runtime};

/// Calendar-day label in the player's local time zone. The ledger only
/// compares labels for equality, so the exact format is ours to pick.
fn today_label() -> String {
    let date = Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        date.get_full_year(),
        date.get_month() + 1,
        date.get_date()
    )
}

/// Runs a reward attempt through the ledger and, on success, credits
/// the score. The ledger write happens even for a rejected attempt so
/// a date rollover is recorded.
pub(crate) fn grant(kind: RewardKind) -> GrantDecision {
    let today = today_label();
    let now_ms = Date::now() as u64;
    let mut decision = GrantDecision::DailyCapReached;
    persisted_store::update_rewards(|ledger| {
        decision = ledger.try_grant(kind, &today, now_ms);
    });
    if let GrantDecision::Granted { credit } = decision {
        persisted_store::update_progress(|record| record.credit(credit));
        sync_runtime::schedule_save();
    }
    decision
}

pub(crate) fn grants_left() -> u32 {
    persisted_store::rewards_ledger().grants_left(&today_label())
}
