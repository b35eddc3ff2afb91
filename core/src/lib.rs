pub mod catalog;
pub mod codec;
pub mod game;
pub mod level;
pub mod progress;
pub mod protocol;
pub mod reconcile;
pub mod rewards;
pub mod scramble;
pub mod snapshot;

pub use catalog::{entry_by_id, phrase_id, pool_for_word_count, Phrase, PhraseEntry, PhraseKind};
pub use codec::{decode, encode};
pub use game::{
    AnswerSlot, BoardView, GameRules, HintOutcome, HintRejection, InputEntry, PuzzleState,
    TapOutcome, HINT_COSTS, HINT_MAX_STAGE,
};
pub use level::{band_for_level, phrase_id_for_level, select_phrase, word_count_for_level};
pub use progress::{completion_reward, ProgressRecord, STARTING_LEVEL, STARTING_SCORE};
pub use protocol::{ClientMsg, ServerMsg};
pub use reconcile::{apply_choice, reconcile, ConflictChoice, ReconcileAction, RemoteSnapshot};
pub use rewards::{GrantDecision, RewardKind, RewardLedger, MAX_DAILY_GRANTS};
pub use scramble::{scramble, shuffle_available, Tile, TileState};
pub use snapshot::{GameSnapshot, PuzzleSnapshot, GAME_SNAPSHOT_VERSION};
