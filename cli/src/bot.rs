use clap::Args;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use mojimaze_core::game::{GameRules, HintOutcome, PuzzleState, TapOutcome};
use mojimaze_core::progress::{completion_reward, ProgressRecord};
use mojimaze_core::scramble::TileState;

#[derive(Args)]
pub(super) struct PlaytestArgs {
    #[arg(long, default_value_t = 1)]
    pub from_level: u32,
    #[arg(long, default_value_t = 25)]
    pub levels: u32,
    /// Seed for the bot's play order; random when omitted.
    #[arg(long, env = "MOJIMAZE_SEED")]
    pub seed: Option<u64>,
    /// Let the bot buy hints when it can afford them.
    #[arg(long, default_value_t = false)]
    pub hints: bool,
    /// Emit a JSON summary instead of per-level lines.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub(super) fn run(args: PlaytestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut progress = ProgressRecord {
        level: args.from_level,
        ..ProgressRecord::default()
    };
    let mut hints_bought = 0u32;

    for _ in 0..args.levels {
        let level = progress.level;
        let mut state = PuzzleState::deal(level, GameRules::default());

        if args.hints && rng.gen_bool(0.3) {
            if let HintOutcome::Advanced { cost, .. } = state.request_hint(progress.score) {
                progress.debit(cost);
                hints_bought += 1;
            }
        }

        solve(&mut state, &mut rng)?;
        let earned = completion_reward(level);
        progress.advance_level(earned, state.phrase_id());

        if !args.json {
            println!(
                "level {:>5}  {:<32} +{:>4}  score {:>7}  [{}]",
                level,
                state.phrase().text,
                earned,
                progress.score,
                state.phrase().category,
            );
        }
    }

    if args.json {
        let summary = serde_json::json!({
            "seed": seed,
            "from_level": args.from_level,
            "levels": args.levels,
            "final_level": progress.level,
            "final_score": progress.score,
            "hints_bought": hints_bought,
            "phrases_seen": progress.used_phrase_ids.len(),
        });
        println!("{summary}");
    }
    Ok(())
}

/// Solves the current board: words in random discovery order, with the
/// occasional stray tap undone by backspace to exercise the machine
/// the way a human would.
fn solve(state: &mut PuzzleState, rng: &mut StdRng) -> Result<(), Box<dyn std::error::Error>> {
    let mut words: Vec<String> = state
        .phrase()
        .word_list()
        .iter()
        .map(|word| word.to_string())
        .collect();
    words.shuffle(rng);

    for word in words {
        if rng.gen_bool(0.2) {
            fumble(state, rng);
        }
        for ch in word.chars() {
            let origin = pick_tile(state, ch, rng)
                .ok_or_else(|| format!("no available tile for '{ch}' in {}", state.phrase().text))?;
            state.tap_tile(origin);
        }
    }
    if !state.is_solved() {
        return Err(format!("bot failed to solve {}", state.phrase().text).into());
    }
    Ok(())
}

fn fumble(state: &mut PuzzleState, rng: &mut StdRng) {
    let available: Vec<u32> = state
        .tiles()
        .iter()
        .filter(|tile| tile.state == TileState::Available)
        .map(|tile| tile.origin_index)
        .collect();
    let Some(&origin) = available.choose(rng) else {
        return;
    };
    if state.tap_tile(origin) == TapOutcome::Placed {
        state.backspace();
    }
}

fn pick_tile(state: &PuzzleState, ch: char, rng: &mut StdRng) -> Option<u32> {
    let candidates: Vec<u32> = state
        .tiles()
        .iter()
        .filter(|tile| tile.ch == ch && tile.state == TileState::Available)
        .map(|tile| tile.origin_index)
        .collect();
    candidates.choose(rng).copied()
}
