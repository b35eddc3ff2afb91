use crate::game::InputEntry;
use crate::scramble::Tile;

pub const GAME_SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to rebuild the in-level state after a reload:
/// board layout, unconfirmed input, matched words, hint stage. The
/// phrase text is carried alongside the id so a catalog edit between
/// sessions invalidates the snapshot instead of restoring a board
/// whose tiles no longer spell the answer.
#[derive(Debug, Clone, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
pub struct PuzzleSnapshot {
    pub level: u32,
    pub phrase_id: String,
    pub phrase_text: String,
    pub tiles: Vec<Tile>,
    pub input: Vec<InputEntry>,
    pub matched: Vec<String>,
    pub hint_stage: u8,
    pub hint_message: String,
    pub scramble_nonce: u32,
    pub solved: bool,
}

#[derive(Debug, Clone, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub puzzle: PuzzleSnapshot,
}

impl GameSnapshot {
    pub fn wrap(puzzle: PuzzleSnapshot) -> Self {
        Self {
            version: GAME_SNAPSHOT_VERSION,
            puzzle,
        }
    }

    /// Unwraps a decoded snapshot, discarding stale versions.
    pub fn accept(self) -> Option<PuzzleSnapshot> {
        if self.version != GAME_SNAPSHOT_VERSION {
            return None;
        }
        Some(self.puzzle)
    }
}
