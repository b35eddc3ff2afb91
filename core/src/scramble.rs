use serde::Serialize;

use crate::catalog::Phrase;

pub const SCRAMBLE_SEED: u32 = 0x5C12_AB1E;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
#[repr(u8)]
pub enum TileState {
    Available,
    Placed,
    Locked,
}

/// One tappable letter. `origin_index` is the tile's position in the
/// freshly scrambled layout and never changes afterwards; input-buffer
/// entries reference it so backspace can restore exactly the tile that
/// was tapped, even across shuffles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize,
)]
pub struct Tile {
    pub ch: char,
    pub origin_index: u32,
    pub state: TileState,
}

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

fn rand_index(seed: u32, salt: u32, bound: usize) -> usize {
    debug_assert!(bound > 0);
    (splitmix32(seed ^ salt) as usize) % bound
}

/// Scrambles a phrase into tiles. Spaces are stripped, the letters are
/// permuted with a Fisher-Yates pass driven by a splitmix32 stream,
/// and each tile's `origin_index` is set to its final slot. The same
/// (phrase, level, nonce) triple always yields the same layout, so a
/// persisted nonce reproduces the board after a reload.
pub fn scramble(phrase: &Phrase, level: u32, nonce: u32) -> Vec<Tile> {
    let mut letters = phrase.letters();
    let seed = SCRAMBLE_SEED ^ level.wrapping_mul(0x0101_0101) ^ nonce;
    for i in (1..letters.len()).rev() {
        let j = rand_index(seed, i as u32, i + 1);
        letters.swap(i, j);
    }
    letters
        .into_iter()
        .enumerate()
        .map(|(index, ch)| Tile {
            ch,
            origin_index: index as u32,
            state: TileState::Available,
        })
        .collect()
}

/// Permutes the relative order of `Available` tiles only. `Placed`
/// and `Locked` tiles keep their layout slots, so a shuffle never
/// disturbs confirmed words or the tile the player just tapped.
pub fn shuffle_available(tiles: &mut [Tile], nonce: u32) {
    let slots: Vec<usize> = tiles
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.state == TileState::Available)
        .map(|(slot, _)| slot)
        .collect();
    if slots.len() < 2 {
        return;
    }
    let mut picked: Vec<Tile> = slots.iter().map(|&slot| tiles[slot]).collect();
    let seed = SCRAMBLE_SEED ^ nonce.rotate_left(16);
    for i in (1..picked.len()).rev() {
        let j = rand_index(seed, i as u32, i + 1);
        picked.swap(i, j);
    }
    for (&slot, tile) in slots.iter().zip(picked) {
        tiles[slot] = tile;
    }
}
