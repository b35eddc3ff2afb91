use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{entry_by_id, Phrase, PhraseKind};
use crate::level::{phrase_id_for_level, select_phrase};
use crate::scramble::{scramble, shuffle_available, Tile, TileState};
use crate::snapshot::PuzzleSnapshot;

pub const HINT_COSTS: [u32; 4] = [100, 200, 300, 500];
pub const HINT_MAX_STAGE: u8 = 4;
pub const HINT_FLASH_DURATION_MS: u32 = 600;

/// Policy knobs for the two behaviors the design intentionally leaves
/// configurable: whether `reset` also un-confirms matched words, and
/// whether the stage-4 answer flash can be bought again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub reset_clears_matched: bool,
    pub hint_flash_repeatable: bool,
    pub flash_duration_ms: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            reset_clears_matched: false,
            hint_flash_repeatable: true,
            flash_duration_ms: HINT_FLASH_DURATION_MS,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize,
)]
pub struct InputEntry {
    pub ch: char,
    pub origin_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// Tile was not Available or the puzzle is already solved.
    Ignored,
    Placed,
    WordMatched { word: String },
    Solved { word: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintRejection {
    AlreadySolved,
    StageExhausted,
    InsufficientScore { needed: u32, have: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// Hint granted. The caller is responsible for debiting `cost`
    /// from the score; the state machine never touches the score
    /// itself. `flash_ms` is set when the full answer should be shown
    /// for that many milliseconds and then hidden again.
    Advanced {
        stage: u8,
        cost: u32,
        message: String,
        flash_ms: Option<u32>,
    },
    Rejected(HintRejection),
}

/// One slot of the answer board, in canonical phrase order. `revealed`
/// is set once the word has been matched, regardless of the order the
/// player discovered it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSlot {
    pub length: u32,
    pub revealed: Option<String>,
}

/// Read-only snapshot handed to a presentation layer. The UI only ever
/// calls back through the five operations on [`PuzzleState`].
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub level: u32,
    pub category: String,
    pub kind: PhraseKind,
    pub tiles: Vec<Tile>,
    pub input: String,
    pub matched_words: Vec<String>,
    pub answer_slots: Vec<AnswerSlot>,
    pub hint_stage: u8,
    pub hint_message: String,
    pub solved: bool,
}

/// The per-level state machine: current phrase, tiles, input buffer,
/// matched-word multiset, hint stage, solved flag.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    phrase: Phrase,
    phrase_id: String,
    level: u32,
    tiles: Vec<Tile>,
    input: Vec<InputEntry>,
    matched: Vec<String>,
    hint_stage: u8,
    hint_message: String,
    solved: bool,
    scramble_nonce: u32,
    rules: GameRules,
}

impl PuzzleState {
    /// Deals the deterministic phrase for `level` with a fresh
    /// scramble.
    pub fn deal(level: u32, rules: GameRules) -> Self {
        let phrase = select_phrase(level);
        let phrase_id = phrase_id_for_level(level);
        Self::from_phrase(phrase, phrase_id, level, rules)
    }

    pub fn from_phrase(phrase: Phrase, phrase_id: String, level: u32, rules: GameRules) -> Self {
        let tiles = scramble(&phrase, level, 0);
        Self {
            phrase,
            phrase_id,
            level,
            tiles,
            input: Vec::new(),
            matched: Vec::new(),
            hint_stage: 0,
            hint_message: String::new(),
            solved: false,
            scramble_nonce: 0,
            rules,
        }
    }

    pub fn phrase(&self) -> &Phrase {
        &self.phrase
    }

    pub fn phrase_id(&self) -> &str {
        &self.phrase_id
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn input(&self) -> &[InputEntry] {
        &self.input
    }

    pub fn input_text(&self) -> String {
        self.input.iter().map(|entry| entry.ch).collect()
    }

    pub fn matched_words(&self) -> &[String] {
        &self.matched
    }

    pub fn hint_stage(&self) -> u8 {
        self.hint_stage
    }

    pub fn hint_message(&self) -> &str {
        &self.hint_message
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn rules(&self) -> GameRules {
        self.rules
    }

    fn tile_slot(&self, origin_index: u32) -> Option<usize> {
        self.tiles
            .iter()
            .position(|tile| tile.origin_index == origin_index)
    }

    fn matched_count(&self, word: &str) -> usize {
        self.matched.iter().filter(|m| m.as_str() == word).count()
    }

    fn target_count(&self, word: &str) -> usize {
        self.phrase.word_list().iter().filter(|w| **w == word).count()
    }

    /// Words from the canonical list that still have outstanding
    /// occurrences, respecting duplicates.
    fn unmatched_words(&self) -> Vec<String> {
        let mut consumed: HashMap<String, usize> = HashMap::new();
        let mut out = Vec::new();
        for word in self.phrase.word_list() {
            let seen = consumed.entry(word.to_string()).or_insert(0);
            *seen += 1;
            if *seen > self.matched_count(word) {
                out.push(word.to_string());
            }
        }
        out
    }

    /// Places an Available tile and runs free-order matching: the
    /// buffer may complete any outstanding word, not necessarily the
    /// next one positionally. On a match the buffer's tiles are locked
    /// for the rest of the level.
    pub fn tap_tile(&mut self, origin_index: u32) -> TapOutcome {
        if self.solved {
            return TapOutcome::Ignored;
        }
        let Some(slot) = self.tile_slot(origin_index) else {
            return TapOutcome::Ignored;
        };
        if self.tiles[slot].state != TileState::Available {
            return TapOutcome::Ignored;
        }
        let ch = self.tiles[slot].ch;
        self.tiles[slot].state = TileState::Placed;
        self.input.push(InputEntry { ch, origin_index });

        let attempt = self.input_text();
        let outstanding = self
            .phrase
            .word_list()
            .iter()
            .any(|word| *word == attempt && self.matched_count(word) < self.target_count(word));
        if !outstanding {
            return TapOutcome::Placed;
        }

        for entry in self.input.drain(..) {
            if let Some(slot) = self
                .tiles
                .iter()
                .position(|tile| tile.origin_index == entry.origin_index)
            {
                self.tiles[slot].state = TileState::Locked;
            }
        }
        self.matched.push(attempt.clone());

        let word_list = self.phrase.word_list();
        let all_matched = self.matched.len() == word_list.len()
            && word_list
                .iter()
                .all(|word| self.matched_count(word) == self.target_count(word));
        if all_matched {
            self.solved = true;
            TapOutcome::Solved { word: attempt }
        } else {
            TapOutcome::WordMatched { word: attempt }
        }
    }

    /// Removes the newest buffer entry and frees its tile. Locked
    /// tiles stay locked; they belong to a confirmed word.
    pub fn backspace(&mut self) -> bool {
        let Some(entry) = self.input.pop() else {
            return false;
        };
        if let Some(slot) = self.tile_slot(entry.origin_index) {
            if self.tiles[slot].state != TileState::Locked {
                self.tiles[slot].state = TileState::Available;
            }
        }
        true
    }

    /// Clears the unconfirmed input. With the default rules matched
    /// words survive a reset; `reset_clears_matched` turns this into a
    /// full restart of the level.
    pub fn reset(&mut self) {
        self.input.clear();
        for tile in &mut self.tiles {
            if tile.state == TileState::Placed {
                tile.state = TileState::Available;
            }
        }
        if self.rules.reset_clears_matched && !self.solved {
            self.matched.clear();
            for tile in &mut self.tiles {
                tile.state = TileState::Available;
            }
        }
    }

    /// Reshuffles the Available tiles. The input buffer and the
    /// positions of Placed/Locked tiles are untouched.
    pub fn shuffle(&mut self) {
        if self.solved {
            return;
        }
        self.scramble_nonce = self.scramble_nonce.wrapping_add(1);
        shuffle_available(&mut self.tiles, self.scramble_nonce);
    }

    /// Staged hint disclosure. Never debits the score; the accepted
    /// cost is reported back so the caller can apply it through the
    /// progress store. The stage-4 full answer rides only in the
    /// returned outcome for the duration of the flash; the stored
    /// message stays at the stage-3 disclosure, which is what
    /// `board_view` and snapshots keep showing once the flash is over.
    pub fn request_hint(&mut self, current_score: u32) -> HintOutcome {
        if self.solved {
            return HintOutcome::Rejected(HintRejection::AlreadySolved);
        }
        if self.hint_stage >= HINT_MAX_STAGE {
            if !self.rules.hint_flash_repeatable {
                return HintOutcome::Rejected(HintRejection::StageExhausted);
            }
            let cost = HINT_COSTS[(HINT_MAX_STAGE - 1) as usize];
            if current_score < cost {
                return HintOutcome::Rejected(HintRejection::InsufficientScore {
                    needed: cost,
                    have: current_score,
                });
            }
            // Stage stays pinned at 4; only the flash re-triggers.
            return HintOutcome::Advanced {
                stage: self.hint_stage,
                cost,
                message: self.hint_message_for_stage(HINT_MAX_STAGE),
                flash_ms: Some(self.rules.flash_duration_ms),
            };
        }
        let cost = HINT_COSTS[self.hint_stage as usize];
        if current_score < cost {
            return HintOutcome::Rejected(HintRejection::InsufficientScore {
                needed: cost,
                have: current_score,
            });
        }
        self.hint_stage += 1;
        let message = self.hint_message_for_stage(self.hint_stage);
        if self.hint_stage == HINT_MAX_STAGE {
            return HintOutcome::Advanced {
                stage: self.hint_stage,
                cost,
                message,
                flash_ms: Some(self.rules.flash_duration_ms),
            };
        }
        self.hint_message = message.clone();
        HintOutcome::Advanced {
            stage: self.hint_stage,
            cost,
            message,
            flash_ms: None,
        }
    }

    fn hint_message_for_stage(&self, stage: u8) -> String {
        let words = self.unmatched_words();
        match stage {
            1 => {
                let firsts: Vec<String> = words
                    .iter()
                    .filter_map(|word| word.chars().next())
                    .map(|ch| ch.to_string())
                    .collect();
                format!("Starts with \"{}\"", firsts.join(", "))
            }
            2 => {
                let edges: Vec<String> = words
                    .iter()
                    .map(|word| {
                        let mut chars = word.chars();
                        let first = chars.next().unwrap_or(' ');
                        match chars.next_back() {
                            Some(last) => format!("{first}..{last}"),
                            None => first.to_string(),
                        }
                    })
                    .collect();
                format!("Starts and ends: {}", edges.join(", "))
            }
            3 => {
                let lengths: Vec<String> = words
                    .iter()
                    .map(|word| word.chars().count().to_string())
                    .collect();
                format!("Word lengths: {}", lengths.join(", "))
            }
            _ => words.join(" "),
        }
    }

    pub fn board_view(&self) -> BoardView {
        let mut remaining: HashMap<String, usize> = HashMap::new();
        for word in &self.matched {
            *remaining.entry(word.clone()).or_insert(0) += 1;
        }
        let answer_slots = self
            .phrase
            .word_list()
            .iter()
            .map(|word| {
                let revealed = match remaining.get_mut(*word) {
                    Some(count) if *count > 0 => {
                        *count -= 1;
                        Some(word.to_string())
                    }
                    _ => None,
                };
                AnswerSlot {
                    length: word.chars().count() as u32,
                    revealed,
                }
            })
            .collect();
        BoardView {
            level: self.level,
            category: self.phrase.category.clone(),
            kind: self.phrase.kind,
            tiles: self.tiles.clone(),
            input: self.input_text(),
            matched_words: self.matched.clone(),
            answer_slots,
            hint_stage: self.hint_stage,
            hint_message: self.hint_message.clone(),
            solved: self.solved,
        }
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            level: self.level,
            phrase_id: self.phrase_id.clone(),
            phrase_text: self.phrase.text.clone(),
            tiles: self.tiles.clone(),
            input: self.input.clone(),
            matched: self.matched.clone(),
            hint_stage: self.hint_stage,
            hint_message: self.hint_message.clone(),
            scramble_nonce: self.scramble_nonce,
            solved: self.solved,
        }
    }

    /// Rebuilds a state from a persisted snapshot. Returns `None` when
    /// the snapshot no longer corresponds to the catalog entry (letter
    /// multiset mismatch, dangling input references), in which case the
    /// caller deals a fresh level instead.
    pub fn restore(snapshot: PuzzleSnapshot, rules: GameRules) -> Option<Self> {
        let entry = entry_by_id(&snapshot.phrase_id)?;
        let phrase = Phrase::from_entry(entry);
        if phrase.text != snapshot.phrase_text {
            return None;
        }
        let mut expected = phrase.letters();
        let mut found: Vec<char> = snapshot.tiles.iter().map(|tile| tile.ch).collect();
        expected.sort_unstable();
        found.sort_unstable();
        if expected != found {
            return None;
        }
        for input_entry in &snapshot.input {
            let placed = snapshot.tiles.iter().any(|tile| {
                tile.origin_index == input_entry.origin_index && tile.state == TileState::Placed
            });
            if !placed {
                return None;
            }
        }
        if snapshot.hint_stage > HINT_MAX_STAGE {
            return None;
        }
        Some(Self {
            phrase,
            phrase_id: snapshot.phrase_id,
            level: snapshot.level,
            tiles: snapshot.tiles,
            input: snapshot.input,
            matched: snapshot.matched,
            hint_stage: snapshot.hint_stage,
            hint_message: snapshot.hint_message,
            solved: snapshot.solved,
            scramble_nonce: snapshot.scramble_nonce,
            rules,
        })
    }
}
