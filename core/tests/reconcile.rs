use mojimaze_core::progress::ProgressRecord;
use mojimaze_core::reconcile::{
    apply_choice, reconcile, ConflictChoice, ReconcileAction, RemoteSnapshot,
};

fn local(level: u32, score: u32) -> ProgressRecord {
    ProgressRecord {
        level,
        score,
        ..ProgressRecord::default()
    }
}

fn remote(level: u32, score: u32) -> RemoteSnapshot {
    RemoteSnapshot {
        level,
        score,
        email: None,
        updated_at_ms: 1_700_000_000_000,
    }
}

#[test]
fn missing_remote_pushes_local() {
    let record = local(5, 800);
    assert_eq!(reconcile(&record, None), ReconcileAction::PushLocal);
}

#[test]
fn identical_sides_are_a_noop() {
    let record = local(5, 800);
    assert_eq!(
        reconcile(&record, Some(&remote(5, 800))),
        ReconcileAction::NoOp
    );
}

#[test]
fn any_divergence_is_a_conflict() {
    let record = local(5, 800);
    for snapshot in [remote(7, 500), remote(5, 900), remote(4, 800)] {
        match reconcile(&record, Some(&snapshot)) {
            ReconcileAction::Conflict { remote } => assert_eq!(remote, snapshot),
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}

#[test]
fn reconcile_is_deterministic() {
    let record = local(5, 800);
    let snapshot = remote(7, 500);
    let first = reconcile(&record, Some(&snapshot));
    let second = reconcile(&record, Some(&snapshot));
    assert_eq!(first, second);
}

#[test]
fn keep_remote_overwrites_local_values() {
    let mut record = local(5, 800);
    let snapshot = remote(7, 500);
    let push = apply_choice(ConflictChoice::KeepRemote, &mut record, &snapshot);
    assert!(!push);
    assert_eq!(record.level, 7);
    assert_eq!(record.score, 500);
}

#[test]
fn keep_local_requests_a_push_and_leaves_local_untouched() {
    let mut record = local(5, 800);
    let snapshot = remote(7, 500);
    let push = apply_choice(ConflictChoice::KeepLocal, &mut record, &snapshot);
    assert!(push);
    assert_eq!(record.level, 5);
    assert_eq!(record.score, 800);
}

#[test]
fn keep_remote_never_installs_a_zero_level() {
    let mut record = local(5, 800);
    let snapshot = remote(0, 500);
    apply_choice(ConflictChoice::KeepRemote, &mut record, &snapshot);
    assert_eq!(record.level, 1);
}
