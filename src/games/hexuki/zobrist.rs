//! # Zobrist Hashing for Hexuki
//!
//! **Zobrist hashing** assigns a random 64-bit number to each independent
//! feature of a position. The hash of a position is the XOR of the features
//! that are present, so a single placement updates it in O(1).
//!
//! ## Hash Components
//!
//! 1. **Tiles**: one key per (cell, tile value) for every occupied cell
//! 2. **Player to move**: one key per player
//! 3. **Remaining tiles**: one key per (player, tile value, remaining count);
//!    this keeps duplicate-tile variants from aliasing positions whose boards
//!    match but whose hands differ
//!
//! ## Random Number Generation
//!
//! Tables come from PCG64 with a fixed seed, so hashes are stable across runs.
//! They are built once per process behind a `OnceLock`.
//!
//! ```text
//! hash = tile[9][1] ^ tile[6][5]
//!      ^ player[P2]
//!      ^ remaining[P1][1][1] ^ remaining[P1][5][0] ^ ...
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::sync::OnceLock;

use super::board::{TileBag, MAX_TILES_PER_PLAYER, MAX_TILE_VALUE};
use super::topology::NUM_CELLS;
use crate::game_trait::Player;

/// Fixed table seed. Not a security feature, only cache determinism.
pub const ZOBRIST_SEED: u64 = 0x1234_5678_90AB_CDEF;

const VALUE_SLOTS: usize = MAX_TILE_VALUE as usize + 1;
const COUNT_SLOTS: usize = MAX_TILES_PER_PLAYER + 1;

pub(crate) fn rand64(rng: &mut Pcg64) -> u64 {
    use rand::RngCore;
    rng.next_u64()
}

/// Zobrist key tables.
pub struct ZobristHasher {
    pub(crate) tile: [[u64; VALUE_SLOTS]; NUM_CELLS],
    pub(crate) player: [u64; 2],
    pub(crate) remaining: [[[u64; COUNT_SLOTS]; VALUE_SLOTS]; 2],
}

impl ZobristHasher {
    /// Build tables from `seed`.
    ///
    /// **Initialization order** (fixed for determinism): tile keys by cell then
    /// value, player keys, remaining-count keys by player, value, count.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);

        let mut tile = [[0u64; VALUE_SLOTS]; NUM_CELLS];
        for row in tile.iter_mut() {
            for key in row.iter_mut() {
                *key = rand64(&mut rng);
            }
        }

        let player = [rand64(&mut rng), rand64(&mut rng)];

        let mut remaining = [[[0u64; COUNT_SLOTS]; VALUE_SLOTS]; 2];
        for per_player in remaining.iter_mut() {
            for per_value in per_player.iter_mut() {
                for key in per_value.iter_mut() {
                    *key = rand64(&mut rng);
                }
            }
        }

        Self {
            tile,
            player,
            remaining,
        }
    }

    #[inline]
    pub fn tile_key(&self, cell: usize, value: u8) -> u64 {
        self.tile[cell][value as usize]
    }

    #[inline]
    pub fn player_key(&self, player: Player) -> u64 {
        self.player[player.index()]
    }

    #[inline]
    pub fn remaining_key(&self, player: Player, value: u8, count: usize) -> u64 {
        self.remaining[player.index()][value as usize][count.min(MAX_TILES_PER_PLAYER)]
    }

    /// Delta for one tile of `value` leaving `player`'s hand when `count_before`
    /// of that value were held. XOR it in on make and again on unmake.
    #[inline]
    pub fn removal_delta(&self, player: Player, value: u8, count_before: usize) -> u64 {
        self.remaining_key(player, value, count_before)
            ^ self.remaining_key(player, value, count_before.saturating_sub(1))
    }

    /// Full hash of a position, from scratch.
    ///
    /// `tile_values` is the configured set of distinct tile values; every
    /// value in it contributes a count term for both players, zero included.
    pub fn hash_position(
        &self,
        cells: &[u8; NUM_CELLS],
        to_move: Player,
        bags: &[TileBag; 2],
        tile_values: &[u8],
    ) -> u64 {
        let mut h = 0u64;

        for (cell, &value) in cells.iter().enumerate() {
            if value != 0 {
                h ^= self.tile_key(cell, value);
            }
        }

        h ^= self.player_key(to_move);

        for player in Player::BOTH {
            let bag = &bags[player.index()];
            for &value in tile_values {
                let count = bag.iter().filter(|&&v| v == value).count();
                h ^= self.remaining_key(player, value, count);
            }
        }

        h
    }
}

static HASHER: OnceLock<ZobristHasher> = OnceLock::new();

/// Process-wide hasher seeded with [`ZOBRIST_SEED`].
pub fn hasher() -> &'static ZobristHasher {
    HASHER.get_or_init(|| ZobristHasher::new(ZOBRIST_SEED))
}
