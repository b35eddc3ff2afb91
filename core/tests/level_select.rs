use mojimaze_core::catalog::{pool_for_word_count, MAX_WORD_COUNT};
use mojimaze_core::level::{
    band_for_level, phrase_id_for_level, select_phrase, word_count_for_level, LEVEL_BANDS,
};
use mojimaze_core::entry_by_id;

#[test]
fn selection_is_deterministic() {
    for level in [1, 7, 19, 20, 55, 99, 100, 150, 200, 350, 999, 123_456] {
        let first = select_phrase(level);
        let second = select_phrase(level);
        assert_eq!(first, second, "level {level} must always deal the same phrase");
    }
}

#[test]
fn bands_cover_every_level() {
    assert_eq!(LEVEL_BANDS.last().unwrap().max_level, u32::MAX);
    for band in LEVEL_BANDS {
        let total: u32 = band.probs.iter().sum();
        assert_eq!(total, 100, "band probabilities must sum to 100");
    }
}

#[test]
fn early_levels_deal_single_words() {
    for level in 1..=19 {
        assert_eq!(word_count_for_level(level), 1);
        assert_eq!(select_phrase(level).word_list().len(), 1);
    }
}

#[test]
fn word_count_matches_band_support() {
    for level in 20..=99 {
        let count = word_count_for_level(level);
        assert!(
            (1..=2).contains(&count),
            "level {level} drew {count} words outside its band"
        );
    }
    for level in 100..=200 {
        let count = word_count_for_level(level);
        assert!((1..=3).contains(&count));
    }
}

#[test]
fn high_bands_actually_reach_larger_phrases() {
    let mut seen_multi = false;
    for level in 401..=500 {
        if word_count_for_level(level) >= 4 {
            seen_multi = true;
            break;
        }
    }
    assert!(seen_multi, "top band never drew a 4+ word phrase");
}

#[test]
fn levels_far_beyond_catalog_wrap_around() {
    let phrase = select_phrase(u32::MAX / 3);
    assert!(!phrase.text.is_empty());
    let band = band_for_level(u32::MAX / 3);
    assert_eq!(band.max_level, u32::MAX);
}

#[test]
fn phrase_id_round_trips_through_catalog() {
    for level in [1, 42, 150, 380, 777] {
        let id = phrase_id_for_level(level);
        let entry = entry_by_id(&id).expect("id must resolve");
        let phrase = select_phrase(level);
        assert_eq!(phrase.text, entry.text.to_ascii_uppercase());
    }
}

#[test]
fn out_of_range_word_counts_fall_back_to_single_words() {
    let fallback = pool_for_word_count(0);
    assert!(!fallback.is_empty());
    assert_eq!(fallback.len(), pool_for_word_count(1).len());
    let beyond = pool_for_word_count(MAX_WORD_COUNT + 3);
    assert_eq!(beyond.len(), pool_for_word_count(1).len());
}

#[test]
fn every_pool_entry_is_uppercase_and_sized() {
    for count in 1..=MAX_WORD_COUNT {
        for entry in pool_for_word_count(count) {
            assert_eq!(entry.text.split_whitespace().count() as u32, count);
            assert_eq!(entry.text, entry.text.to_ascii_uppercase());
        }
    }
}
