use mojimaze_core::catalog::{Phrase, PhraseKind};
use mojimaze_core::game::{
    GameRules, HintOutcome, HintRejection, PuzzleState, HINT_COSTS, HINT_MAX_STAGE,
};

fn puzzle(text: &str) -> PuzzleState {
    let phrase = Phrase::new(text, "Test", PhraseKind::Phrase);
    PuzzleState::from_phrase(phrase, "w9-0".to_string(), 1, GameRules::default())
}

fn solve(state: &mut PuzzleState) {
    let words: Vec<String> = state
        .phrase()
        .word_list()
        .iter()
        .map(|word| word.to_string())
        .collect();
    for word in words {
        for ch in word.chars() {
            let origin = state
                .tiles()
                .iter()
                .find(|tile| {
                    tile.ch == ch && tile.state == mojimaze_core::TileState::Available
                })
                .unwrap()
                .origin_index;
            state.tap_tile(origin);
        }
    }
}

#[test]
fn insufficient_score_is_rejected_without_side_effects() {
    let mut state = puzzle("CAT");
    let outcome = state.request_hint(50);
    assert_eq!(
        outcome,
        HintOutcome::Rejected(HintRejection::InsufficientScore {
            needed: 100,
            have: 50
        })
    );
    assert_eq!(state.hint_stage(), 0);
    assert!(state.hint_message().is_empty());
}

#[test]
fn stages_advance_with_escalating_costs() {
    let mut state = puzzle("SPICY PASTA");
    for (index, expected_cost) in HINT_COSTS.iter().enumerate() {
        match state.request_hint(1_000) {
            HintOutcome::Advanced { stage, cost, .. } => {
                assert_eq!(stage as usize, index + 1);
                assert_eq!(cost, *expected_cost);
            }
            other => panic!("stage {} rejected: {other:?}", index + 1),
        }
    }
    assert_eq!(state.hint_stage(), HINT_MAX_STAGE);
}

#[test]
fn hint_stage_never_decreases_within_a_level() {
    let mut state = puzzle("WHALE SHARK");
    let mut last_stage = 0;
    for score in [1_000, 0, 1_000, 0, 1_000, 1_000, 1_000] {
        state.request_hint(score);
        assert!(state.hint_stage() >= last_stage);
        last_stage = state.hint_stage();
    }
}

#[test]
fn hint_state_resets_on_new_phrase() {
    let mut state = puzzle("LION TIGER");
    state.request_hint(1_000);
    assert_eq!(state.hint_stage(), 1);
    let next = PuzzleState::deal(state.level() + 1, GameRules::default());
    assert_eq!(next.hint_stage(), 0);
    assert!(next.hint_message().is_empty());
}

#[test]
fn stage_messages_disclose_progressively() {
    let mut state = puzzle("SPICY PASTA");
    let HintOutcome::Advanced { message, .. } = state.request_hint(1_000) else {
        panic!("stage 1 rejected");
    };
    assert_eq!(message, "Starts with \"S, P\"");
    let HintOutcome::Advanced { message, .. } = state.request_hint(1_000) else {
        panic!("stage 2 rejected");
    };
    assert_eq!(message, "Starts and ends: S..Y, P..A");
    let HintOutcome::Advanced { message, .. } = state.request_hint(1_000) else {
        panic!("stage 3 rejected");
    };
    assert_eq!(message, "Word lengths: 5, 5");
    let HintOutcome::Advanced { message, flash_ms, .. } = state.request_hint(1_000) else {
        panic!("stage 4 rejected");
    };
    assert_eq!(message, "SPICY PASTA");
    assert!(flash_ms.is_some(), "stage 4 is a timed flash");
}

#[test]
fn full_answer_is_not_stored_after_the_flash() {
    let mut state = puzzle("SPICY PASTA");
    for _ in 0..4 {
        state.request_hint(1_000);
    }
    assert_eq!(state.hint_stage(), HINT_MAX_STAGE);
    // Once the flash window has passed the board falls back to the
    // stage-3 disclosure; nothing retains the answer.
    assert_eq!(state.hint_message(), "Word lengths: 5, 5");
    assert_eq!(state.board_view().hint_message, "Word lengths: 5, 5");
    assert_eq!(state.snapshot().hint_message, "Word lengths: 5, 5");
}

#[test]
fn hints_skip_already_matched_words() {
    let mut state = puzzle("SPICY PASTA");
    for ch in "PASTA".chars() {
        let origin = state
            .tiles()
            .iter()
            .find(|tile| tile.ch == ch && tile.state == mojimaze_core::TileState::Available)
            .unwrap()
            .origin_index;
        state.tap_tile(origin);
    }
    let HintOutcome::Advanced { message, .. } = state.request_hint(1_000) else {
        panic!("hint rejected");
    };
    assert_eq!(message, "Starts with \"S\"");
}

#[test]
fn flash_is_retriggerable_at_stage_four_cost() {
    let mut state = puzzle("CAT DOG");
    for _ in 0..4 {
        state.request_hint(1_000);
    }
    assert_eq!(state.hint_stage(), HINT_MAX_STAGE);
    match state.request_hint(1_000) {
        HintOutcome::Advanced {
            stage,
            cost,
            message,
            flash_ms,
        } => {
            assert_eq!(stage, HINT_MAX_STAGE);
            assert_eq!(cost, HINT_COSTS[3]);
            assert_eq!(message, "CAT DOG");
            assert!(flash_ms.is_some());
        }
        other => panic!("flash re-trigger rejected: {other:?}"),
    }
    assert_eq!(state.hint_message(), "Word lengths: 3, 3");
    // Still gated by the score.
    assert_eq!(
        state.request_hint(HINT_COSTS[3] - 1),
        HintOutcome::Rejected(HintRejection::InsufficientScore {
            needed: HINT_COSTS[3],
            have: HINT_COSTS[3] - 1
        })
    );
}

#[test]
fn one_shot_flash_rules_exhaust_at_stage_four() {
    let phrase = Phrase::new("CAT DOG", "Pets", PhraseKind::Phrase);
    let rules = GameRules {
        hint_flash_repeatable: false,
        ..GameRules::default()
    };
    let mut state = PuzzleState::from_phrase(phrase, "w9-1".to_string(), 1, rules);
    for _ in 0..4 {
        state.request_hint(1_000);
    }
    assert_eq!(
        state.request_hint(1_000),
        HintOutcome::Rejected(HintRejection::StageExhausted)
    );
}

#[test]
fn hints_are_rejected_after_solve() {
    let mut state = puzzle("ANT");
    solve(&mut state);
    assert!(state.is_solved());
    assert_eq!(
        state.request_hint(1_000),
        HintOutcome::Rejected(HintRejection::AlreadySolved)
    );
}
