use serde::Serialize;

/// Whether an answer is a single word or a multi-word combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhraseKind {
    Normal,
    Phrase,
}

#[derive(Debug, Clone, Copy)]
pub struct PhraseEntry {
    pub text: &'static str,
    pub category: &'static str,
    pub kind: PhraseKind,
}

/// A target answer as handed to the puzzle engine. Text is uppercase,
/// words separated by single spaces; the word list order is the
/// canonical answer-board order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub text: String,
    pub category: String,
    pub kind: PhraseKind,
}

impl Phrase {
    pub fn new(text: &str, category: &str, kind: PhraseKind) -> Self {
        let normalized: Vec<String> = text
            .split_whitespace()
            .map(|word| word.to_ascii_uppercase())
            .collect();
        Self {
            text: normalized.join(" "),
            category: category.to_string(),
            kind,
        }
    }

    pub fn from_entry(entry: &PhraseEntry) -> Self {
        Self::new(entry.text, entry.category, entry.kind)
    }

    pub fn word_list(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    /// Letters the player sees as tiles: the words concatenated with
    /// spaces stripped. Word boundaries are never visible in the tile
    /// layout.
    pub fn letters(&self) -> Vec<char> {
        self.text.chars().filter(|ch| !ch.is_whitespace()).collect()
    }
}

const ONE_WORD_POOL: &[PhraseEntry] = &[
    entry("APPLE", "Fruits"),
    entry("PIZZA", "Meals"),
    entry("CAKE", "Desserts"),
    entry("COFFEE", "Drinks"),
    entry("HONEY", "Ingredients"),
    entry("CAT", "Pets"),
    entry("LION", "Wild Animals"),
    entry("SHARK", "Marine Life"),
    entry("EAGLE", "Birds"),
    entry("ANT", "Nature"),
];

const TWO_WORD_POOL: &[PhraseEntry] = &[
    combo("CAT DOG", "Pets"),
    combo("HAMSTER RABBIT", "Pets"),
    combo("PUPPY KITTEN", "Pets"),
    combo("LION TIGER", "Wild Animals"),
    combo("BEAR WOLF", "Wild Animals"),
    combo("ZEBRA GIRAFFE", "Wild Animals"),
    combo("PANDA MONKEY", "Wild Animals"),
    combo("WHALE SHARK", "Marine Life"),
    combo("DOLPHIN TURTLE", "Marine Life"),
    combo("CRAB SHRIMP", "Marine Life"),
    combo("APPLE BANANA", "Fruits"),
    combo("GRAPE ORANGE", "Fruits"),
    combo("MANGO MELON", "Fruits"),
    combo("PIZZA BURGER", "Meals"),
    combo("STEAK PASTA", "Meals"),
    combo("SUSHI NOODLE", "Meals"),
];

const THREE_WORD_POOL: &[PhraseEntry] = &[
    combo("LION TIGER BEAR", "Wild Animals"),
    combo("CAT DOG RABBIT", "Pets"),
    combo("APPLE BANANA GRAPE", "Fruits"),
    combo("SHARK WHALE DOLPHIN", "Marine Life"),
    combo("EAGLE OWL PARROT", "Birds"),
    combo("PIZZA BURGER STEAK", "Meals"),
    combo("COFFEE JUICE WATER", "Drinks"),
];

const FOUR_WORD_POOL: &[PhraseEntry] = &[
    combo("CAT DOG RABBIT HAMSTER", "Pets"),
    combo("LION TIGER BEAR WOLF", "Wild Animals"),
    combo("APPLE BANANA GRAPE MANGO", "Fruits"),
    combo("SHARK WHALE DOLPHIN TURTLE", "Marine Life"),
    combo("PIZZA BURGER STEAK PASTA", "Meals"),
];

const FIVE_WORD_POOL: &[PhraseEntry] = &[
    combo("LION TIGER BEAR WOLF PANDA", "Wild Animals"),
    combo("APPLE BANANA GRAPE MANGO MELON", "Fruits"),
    combo("CAT DOG RABBIT HAMSTER KITTEN", "Pets"),
    combo("PIZZA BURGER STEAK PASTA SUSHI", "Meals"),
];

const fn entry(text: &'static str, category: &'static str) -> PhraseEntry {
    PhraseEntry {
        text,
        category,
        kind: PhraseKind::Normal,
    }
}

const fn combo(text: &'static str, category: &'static str) -> PhraseEntry {
    PhraseEntry {
        text,
        category,
        kind: PhraseKind::Phrase,
    }
}

pub const MIN_WORD_COUNT: u32 = 1;
pub const MAX_WORD_COUNT: u32 = 5;

/// Candidate pool for answers of `word_count` words. Out-of-range
/// requests fall back to the single-word pool so callers always get a
/// non-empty pool.
pub fn pool_for_word_count(word_count: u32) -> &'static [PhraseEntry] {
    let pool = match word_count {
        1 => ONE_WORD_POOL,
        2 => TWO_WORD_POOL,
        3 => THREE_WORD_POOL,
        4 => FOUR_WORD_POOL,
        5 => FIVE_WORD_POOL,
        _ => ONE_WORD_POOL,
    };
    if pool.is_empty() {
        ONE_WORD_POOL
    } else {
        pool
    }
}

/// Stable identifier for a catalog entry, used for the used-phrase set
/// in progress records and for snapshot validation.
pub fn phrase_id(word_count: u32, index: usize) -> String {
    format!("w{word_count}-{index}")
}

pub fn entry_by_id(id: &str) -> Option<&'static PhraseEntry> {
    let rest = id.strip_prefix('w')?;
    let (count_raw, index_raw) = rest.split_once('-')?;
    let word_count: u32 = count_raw.parse().ok()?;
    let index: usize = index_raw.parse().ok()?;
    if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&word_count) {
        return None;
    }
    pool_for_word_count(word_count).get(index)
}
