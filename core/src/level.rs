use crate::catalog::{phrase_id, pool_for_word_count, Phrase, MAX_WORD_COUNT, MIN_WORD_COUNT};

// Multipliers for the level-derived pseudo-random picks. The same
// level must always land on the same phrase, on every device, so the
// selection never touches a real RNG.
pub const WORD_COUNT_PRIME: u64 = 1_234_567;
pub const POOL_INDEX_PRIME: u64 = 777;

/// One band of the level curve: probability (in percent) of drawing a
/// 1..=5 word answer for levels up to `max_level` inclusive.
#[derive(Debug, Clone, Copy)]
pub struct LevelBand {
    pub max_level: u32,
    pub probs: [u32; MAX_WORD_COUNT as usize],
}

pub const LEVEL_BANDS: &[LevelBand] = &[
    LevelBand {
        max_level: 19,
        probs: [100, 0, 0, 0, 0],
    },
    LevelBand {
        max_level: 99,
        probs: [30, 70, 0, 0, 0],
    },
    LevelBand {
        max_level: 200,
        probs: [10, 30, 60, 0, 0],
    },
    LevelBand {
        max_level: 400,
        probs: [5, 15, 40, 40, 0],
    },
    LevelBand {
        max_level: u32::MAX,
        probs: [5, 10, 25, 30, 30],
    },
];

pub fn band_for_level(level: u32) -> &'static LevelBand {
    LEVEL_BANDS
        .iter()
        .find(|band| level <= band.max_level)
        .unwrap_or(&LEVEL_BANDS[LEVEL_BANDS.len() - 1])
}

/// Word count drawn for `level`: a deterministic 0..100 value walked
/// against the band's cumulative distribution.
pub fn word_count_for_level(level: u32) -> u32 {
    let band = band_for_level(level);
    let prob_value = (level as u64 * WORD_COUNT_PRIME) % 100;
    let mut cumulative = 0u64;
    for (offset, prob) in band.probs.iter().enumerate() {
        cumulative += *prob as u64;
        if prob_value < cumulative {
            return MIN_WORD_COUNT + offset as u32;
        }
    }
    MIN_WORD_COUNT
}

fn pool_index(level: u32, pool_len: usize) -> usize {
    ((level as u64 * POOL_INDEX_PRIME) % pool_len as u64) as usize
}

/// Deterministically picks the answer for `level`. Levels far beyond
/// the catalog size wrap around via the modulo index.
pub fn select_phrase(level: u32) -> Phrase {
    let word_count = word_count_for_level(level);
    let pool = pool_for_word_count(word_count);
    Phrase::from_entry(&pool[pool_index(level, pool.len())])
}

/// Identifier of the catalog entry `select_phrase` would return.
pub fn phrase_id_for_level(level: u32) -> String {
    let word_count = word_count_for_level(level);
    let pool = pool_for_word_count(word_count);
    phrase_id(word_count, pool_index(level, pool.len()))
}
