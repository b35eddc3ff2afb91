use mojimaze_core::progress::{completion_reward, ProgressRecord, STARTING_SCORE};
use mojimaze_core::rewards::{
    GrantDecision, RewardKind, RewardLedger, GRANT_COOLDOWN_MS, MAX_DAILY_GRANTS,
};

#[test]
fn fresh_profile_defaults() {
    let record = ProgressRecord::default();
    assert_eq!(record.level, 1);
    assert_eq!(record.score, STARTING_SCORE);
    assert!(record.used_phrase_ids.is_empty());
}

#[test]
fn debits_clamp_at_zero() {
    let mut record = ProgressRecord {
        score: 120,
        ..ProgressRecord::default()
    };
    assert_eq!(record.debit(100), 100);
    assert_eq!(record.debit(100), 20);
    assert_eq!(record.score, 0);
    assert_eq!(record.debit(500), 0);
    assert_eq!(record.score, 0);
}

#[test]
fn score_never_negative_under_mixed_traffic() {
    let mut record = ProgressRecord::default();
    for step in 0..100u32 {
        if step % 3 == 0 {
            record.credit(step);
        } else {
            record.debit(step * 7);
        }
        // u32 cannot go negative; this guards against wrapping.
        assert!(record.score < u32::MAX / 2);
    }
}

#[test]
fn advance_level_credits_and_records_the_phrase() {
    let mut record = ProgressRecord::default();
    record.advance_level(completion_reward(1), "w1-7");
    assert_eq!(record.level, 2);
    assert_eq!(record.score, STARTING_SCORE + 10);
    assert!(record.used_phrase_ids.contains("w1-7"));
}

#[test]
fn sanitize_repairs_zero_level() {
    let record = ProgressRecord {
        level: 0,
        ..ProgressRecord::default()
    }
    .sanitized();
    assert_eq!(record.level, 1);
}

#[test]
fn progress_round_trips_through_json() {
    let mut record = ProgressRecord::default();
    record.advance_level(10, "w1-3");
    let json = serde_json::to_string(&record).unwrap();
    let back: ProgressRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn malformed_progress_json_is_an_error_not_a_panic() {
    assert!(serde_json::from_str::<ProgressRecord>("{\"level\": \"nope\"}").is_err());
    assert!(serde_json::from_str::<ProgressRecord>("garbage").is_err());
}

#[test]
fn ad_and_share_credits() {
    assert_eq!(RewardKind::AdView.credit(), 200);
    assert_eq!(RewardKind::Share.credit(), 100);
}

#[test]
fn grants_respect_the_cooldown() {
    let mut ledger = RewardLedger::default();
    let now = 1_000_000;
    assert_eq!(
        ledger.try_grant(RewardKind::AdView, "2026-08-23", now),
        GrantDecision::Granted { credit: 200 }
    );
    match ledger.try_grant(RewardKind::AdView, "2026-08-23", now + 1_000) {
        GrantDecision::CoolingDown { remaining_ms } => {
            assert_eq!(remaining_ms, GRANT_COOLDOWN_MS - 1_000);
        }
        other => panic!("expected cooldown, got {other:?}"),
    }
    assert_eq!(
        ledger.try_grant(RewardKind::Share, "2026-08-23", now + GRANT_COOLDOWN_MS),
        GrantDecision::Granted { credit: 100 }
    );
}

#[test]
fn daily_cap_blocks_further_grants() {
    let mut ledger = RewardLedger::default();
    let mut now = 0u64;
    for _ in 0..MAX_DAILY_GRANTS {
        now += GRANT_COOLDOWN_MS;
        assert!(matches!(
            ledger.try_grant(RewardKind::AdView, "2026-08-23", now),
            GrantDecision::Granted { .. }
        ));
    }
    now += GRANT_COOLDOWN_MS;
    assert_eq!(
        ledger.try_grant(RewardKind::AdView, "2026-08-23", now),
        GrantDecision::DailyCapReached
    );
    assert_eq!(ledger.grants_left("2026-08-23"), 0);
}

#[test]
fn date_rollover_resets_the_ledger() {
    let mut ledger = RewardLedger::default();
    let mut now = 0u64;
    for _ in 0..MAX_DAILY_GRANTS {
        now += GRANT_COOLDOWN_MS;
        ledger.try_grant(RewardKind::AdView, "2026-08-23", now);
    }
    assert_eq!(ledger.grants_left("2026-08-24"), MAX_DAILY_GRANTS);
    assert!(matches!(
        ledger.try_grant(RewardKind::AdView, "2026-08-24", now + 1),
        GrantDecision::Granted { .. }
    ));
}
