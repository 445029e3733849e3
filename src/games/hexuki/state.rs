//! # Hexuki Board State
//!
//! The mutable game position and the rules that act on it: adjacency,
//! chain-length and anti-symmetry legality, move generation, scoring, and
//! in-place make/unmake with an undo history.
//!
//! ## Invariants
//!
//! - `occupied` bit `c` is set iff `cells[c] != 0`
//! - `hash` always equals [`BoardState::compute_hash`]
//! - `symmetry_possible` is false iff some mirror pair holds two different
//!   non-zero values; it only changes on make/unmake and puzzle setup

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use super::action::Move;
use super::board::{GameConfig, TileBag, MAX_TILES_PER_PLAYER};
use super::topology::{
    bit, topology, CENTER_CELL, MIRROR, NUM_CELLS, P1_CHAINS, P2_CHAINS, STARTING_TILE,
};
use super::zobrist::hasher;
use crate::error::{EngineError, Result};
use crate::game_trait::Player;

/// Bitmask with every cell occupied.
pub const FULL_BOARD: u32 = (1u32 << NUM_CELLS) - 1;

/// Undo information for one placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MoveRecord {
    mv: Move,
    /// Position the tile held in the mover's bag, `None` if it was not there.
    bag_index: Option<u8>,
    symmetry_possible: bool,
}

/// Running statistics over all chains of a hypothetical board.
#[derive(Default)]
struct ChainStats {
    first: u8,
    second: u8,
    longest_affected: u8,
}

impl ChainStats {
    fn record(&mut self, len: u8, members: u32, target: u32) {
        if len > self.first {
            self.second = self.first;
            self.first = len;
        } else if len > self.second {
            self.second = len;
        }
        if members & target != 0 {
            self.longest_affected = self.longest_affected.max(len);
        }
    }
}

/// Visit every maximal run of occupied cells along the 15 chain rays, then
/// every occupied cell no ray captured as a run of length 1.
fn scan_chains(occupied: u32, mut visit: impl FnMut(u8, u32)) {
    let mut covered = 0u32;

    for ray in topology().rays.iter() {
        let mut len = 0u8;
        let mut members = 0u32;
        for &c in ray {
            let b = bit(c as usize);
            if occupied & b != 0 {
                len += 1;
                members |= b;
            } else if len > 0 {
                visit(len, members);
                covered |= members;
                len = 0;
                members = 0;
            }
        }
        if len > 0 {
            visit(len, members);
            covered |= members;
        }
    }

    let mut isolated = occupied & !covered;
    while isolated != 0 {
        let b = isolated & isolated.wrapping_neg();
        visit(1, b);
        isolated &= !b;
    }
}

/// Full Hexuki position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    config: Arc<GameConfig>,
    occupied: u32,
    cells: [u8; NUM_CELLS],
    bags: [TileBag; 2],
    to_move: Player,
    hash: u64,
    symmetry_possible: bool,
    history: Vec<MoveRecord>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(GameConfig::standard())
    }
}

impl BoardState {
    /// Fresh game: center pre-seeded with the starting tile, player 1 to move.
    pub fn new(config: GameConfig) -> Self {
        Self::with_config(Arc::new(config))
    }

    /// Fresh game sharing an existing configuration.
    pub fn with_config(config: Arc<GameConfig>) -> Self {
        let bags = [
            config.starting_tiles(Player::One),
            config.starting_tiles(Player::Two),
        ];
        let mut board = Self {
            config,
            occupied: 0,
            cells: [0; NUM_CELLS],
            bags,
            to_move: Player::One,
            hash: 0,
            symmetry_possible: true,
            history: Vec::with_capacity(NUM_CELLS),
        };
        board.reset();
        board
    }

    pub fn config(&self) -> &Arc<GameConfig> {
        &self.config
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    #[inline]
    pub fn is_occupied(&self, cell: usize) -> bool {
        cell < NUM_CELLS && self.occupied & bit(cell) != 0
    }

    /// Tile value at `cell`, 0 if empty or out of range.
    #[inline]
    pub fn tile_at(&self, cell: usize) -> u8 {
        self.cells.get(cell).copied().unwrap_or(0)
    }

    pub fn cells(&self) -> &[u8; NUM_CELLS] {
        &self.cells
    }

    pub fn occupied_mask(&self) -> u32 {
        self.occupied
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones() as usize
    }

    pub fn empty_count(&self) -> usize {
        NUM_CELLS - self.occupied_count()
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.to_move
    }

    /// Moves made since the last reset/load.
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// The game ends when every cell is occupied.
    pub fn is_game_over(&self) -> bool {
        self.occupied == FULL_BOARD
    }

    #[inline]
    pub fn position_hash(&self) -> u64 {
        self.hash
    }

    pub fn symmetry_still_possible(&self) -> bool {
        self.symmetry_possible
    }

    /// Remaining tiles for `player`, in notation order.
    pub fn remaining_tiles(&self, player: Player) -> &[u8] {
        &self.bags[player.index()]
    }

    pub fn is_tile_available(&self, player: Player, value: u8) -> bool {
        self.bags[player.index()].contains(&value)
    }

    /// Distinct remaining values for `player`, in first-occurrence order.
    pub fn distinct_tiles(&self, player: Player) -> SmallVec<[u8; MAX_TILES_PER_PLAYER]> {
        let mut distinct = SmallVec::new();
        for &v in self.bags[player.index()].iter() {
            if !distinct.contains(&v) {
                distinct.push(v);
            }
        }
        distinct
    }

    // ========================================================================
    // SCORING
    // ========================================================================

    /// Sum over the player's five diagonals of the product of placed values.
    /// Empty cells contribute 1, so an empty chain scores 1.
    pub fn score(&self, player: Player) -> i64 {
        let chains = match player {
            Player::One => &P1_CHAINS,
            Player::Two => &P2_CHAINS,
        };
        chains
            .iter()
            .map(|chain| {
                chain
                    .iter()
                    .map(|&c| self.cells[c])
                    .filter(|&v| v != 0)
                    .map(i64::from)
                    .product::<i64>()
            })
            .sum()
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    pub fn has_adjacent_occupied(&self, cell: usize) -> bool {
        self.occupied & topology().adjacency[cell] != 0
    }

    /// Chain-length rule on the board after hypothetically occupying `cell`:
    /// the longest chain through `cell` may exceed the board's second-longest
    /// chain by at most 1.
    pub fn chain_length_ok(&self, cell: usize) -> bool {
        let target = bit(cell);
        let mut stats = ChainStats::default();
        scan_chains(self.occupied | target, |len, members| {
            stats.record(len, members, target)
        });
        stats.longest_affected <= stats.second + 1
    }

    /// All chain lengths on the current board, longest first.
    pub fn chain_lengths(&self) -> Vec<u8> {
        let mut lengths = Vec::new();
        scan_chains(self.occupied, |len, _| lengths.push(len));
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }

    /// Empty, adjacent to a tile, and within the chain-length limit.
    pub fn is_cell_playable(&self, cell: usize) -> bool {
        cell < NUM_CELLS
            && !self.is_occupied(cell)
            && self.has_adjacent_occupied(cell)
            && self.chain_length_ok(cell)
    }

    /// Whether the anti-symmetry rule must be checked for the next move.
    /// The first move after a reset or load is always exempt.
    pub fn symmetry_check_applies(&self) -> bool {
        self.symmetry_possible && self.config.enforces_anti_symmetry() && self.moves_played() >= 1
    }

    /// Would placing `value` on `cell` leave the board a perfect mirror image?
    pub fn would_be_mirrored(&self, cell: usize, value: u8) -> bool {
        let at = |c: usize| if c == cell { value } else { self.cells[c] };
        (0..NUM_CELLS)
            .filter(|&c| c < MIRROR[c])
            .all(|c| at(c) == at(MIRROR[c]))
    }

    /// Full legality check for the player to move. Never mutates.
    pub fn is_valid_move(&self, mv: Move) -> bool {
        if !mv.is_well_formed(&self.config) {
            return false;
        }
        let cell = mv.cell_index();
        if !self.is_cell_playable(cell) {
            return false;
        }
        if !self.is_tile_available(self.to_move, mv.tile) {
            return false;
        }
        !(self.symmetry_check_applies() && self.would_be_mirrored(cell, mv.tile))
    }

    /// Every playable cell crossed with every distinct tile the mover holds.
    pub fn legal_moves(&self) -> Vec<Move> {
        let tiles = self.distinct_tiles(self.to_move);
        if tiles.is_empty() || self.is_game_over() {
            return Vec::new();
        }

        let check_symmetry = self.symmetry_check_applies();
        let mut moves = Vec::with_capacity(tiles.len() * 6);

        for cell in 0..NUM_CELLS {
            if !self.is_cell_playable(cell) {
                continue;
            }
            for &tile in tiles.iter() {
                if check_symmetry && self.would_be_mirrored(cell, tile) {
                    continue;
                }
                moves.push(Move::new(cell as u8, tile));
            }
        }

        moves
    }

    // ========================================================================
    // MAKE / UNMAKE
    // ========================================================================

    /// Apply `mv` for the player to move. The caller guarantees legality.
    pub fn make_move(&mut self, mv: Move) {
        let zobrist = hasher();
        let mover = self.to_move;
        let cell = mv.cell_index();

        let bag = &mut self.bags[mover.index()];
        let bag_index = bag.iter().position(|&v| v == mv.tile);
        debug_assert!(bag_index.is_some(), "{} not in {}'s tiles", mv, mover);
        if let Some(idx) = bag_index {
            let count_before = bag.iter().filter(|&&v| v == mv.tile).count();
            bag.remove(idx);
            self.hash ^= zobrist.removal_delta(mover, mv.tile, count_before);
        }

        self.history.push(MoveRecord {
            mv,
            bag_index: bag_index.map(|i| i as u8),
            symmetry_possible: self.symmetry_possible,
        });

        self.cells[cell] = mv.tile;
        self.occupied |= bit(cell);
        self.hash ^= zobrist.tile_key(cell, mv.tile);

        if self.symmetry_possible {
            let mirrored = self.cells[MIRROR[cell]];
            if mirrored != 0 && mirrored != mv.tile {
                self.symmetry_possible = false;
            }
        }

        self.hash ^= zobrist.player_key(mover) ^ zobrist.player_key(mover.opponent());
        self.to_move = mover.opponent();
    }

    /// Undo the last [`make_move`](Self::make_move). No-op on empty history.
    pub fn unmake_move(&mut self) {
        let Some(record) = self.history.pop() else {
            return;
        };
        let zobrist = hasher();
        let mover = self.to_move.opponent();
        let cell = record.mv.cell_index();

        self.hash ^= zobrist.player_key(self.to_move) ^ zobrist.player_key(mover);
        self.to_move = mover;

        self.hash ^= zobrist.tile_key(cell, record.mv.tile);
        self.cells[cell] = 0;
        self.occupied &= !bit(cell);

        if let Some(idx) = record.bag_index {
            let bag = &mut self.bags[mover.index()];
            bag.insert(idx as usize, record.mv.tile);
            let count_before = bag.iter().filter(|&&v| v == record.mv.tile).count();
            self.hash ^= zobrist.removal_delta(mover, record.mv.tile, count_before);
        }

        self.symmetry_possible = record.symmetry_possible;
    }

    /// Validate then apply. Leaves the board untouched on error.
    pub fn try_make_move(&mut self, mv: Move) -> Result<()> {
        if !self.is_valid_move(mv) {
            return Err(EngineError::IllegalMove(mv.to_string()));
        }
        self.make_move(mv);
        Ok(())
    }

    /// Moves made since the last reset/load, e.g. `"h6t5,h7t4"`.
    pub fn move_history_notation(&self) -> String {
        self.history
            .iter()
            .map(|r| r.mv.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    // ========================================================================
    // HASHING
    // ========================================================================

    /// Hash recomputed from the observable fields.
    pub fn compute_hash(&self) -> u64 {
        hasher().hash_position(
            &self.cells,
            self.to_move,
            &self.bags,
            &self.config.tile_values(),
        )
    }

    fn compute_symmetry_possible(&self) -> bool {
        (0..NUM_CELLS).filter(|&c| c < MIRROR[c]).all(|c| {
            let (a, b) = (self.cells[c], self.cells[MIRROR[c]]);
            a == 0 || b == 0 || a == b
        })
    }

    /// Rebuild hash and symmetry flag after direct field injection.
    /// Undo history refers to the old position, so it is dropped.
    fn refresh_derived(&mut self) {
        self.history.clear();
        self.symmetry_possible = self.compute_symmetry_possible();
        self.hash = self.compute_hash();
    }

    // ========================================================================
    // PUZZLE SETUP
    // ========================================================================

    /// Back to the opening position.
    pub fn reset(&mut self) {
        self.cells = [0; NUM_CELLS];
        self.cells[CENTER_CELL] = STARTING_TILE;
        self.occupied = bit(CENTER_CELL);
        self.bags = [
            self.config.starting_tiles(Player::One),
            self.config.starting_tiles(Player::Two),
        ];
        self.to_move = Player::One;
        self.refresh_derived();
    }

    /// Remove every tile, keeping hands and player to move.
    pub fn clear_board(&mut self) {
        self.cells = [0; NUM_CELLS];
        self.occupied = 0;
        self.refresh_derived();
    }

    pub fn set_cell_value(&mut self, cell: usize, value: u8) -> Result<()> {
        if cell >= NUM_CELLS {
            return Err(EngineError::CellOutOfRange(cell as u32));
        }
        if !self.config.is_board_value(value as u32) {
            return Err(EngineError::InvalidTileValue(value as u32));
        }
        self.cells[cell] = value;
        self.occupied |= bit(cell);
        self.refresh_derived();
        Ok(())
    }

    pub fn remove_cell_value(&mut self, cell: usize) -> Result<()> {
        if cell >= NUM_CELLS {
            return Err(EngineError::CellOutOfRange(cell as u32));
        }
        self.cells[cell] = 0;
        self.occupied &= !bit(cell);
        self.refresh_derived();
        Ok(())
    }

    pub fn set_remaining_tiles(&mut self, player: Player, tiles: &[u8]) -> Result<()> {
        if tiles.len() > MAX_TILES_PER_PLAYER {
            return Err(EngineError::TooManyTiles {
                player: player.number(),
                count: tiles.len(),
                max: MAX_TILES_PER_PLAYER,
            });
        }
        if let Some(&bad) = tiles
            .iter()
            .find(|&&v| !self.config.is_tile_value(v as u32))
        {
            return Err(EngineError::InvalidTileValue(bad as u32));
        }
        self.bags[player.index()] = tiles.iter().copied().collect();
        self.refresh_derived();
        Ok(())
    }

    pub fn set_current_player(&mut self, player: Player) {
        self.to_move = player;
        self.refresh_derived();
    }

    /// Replace every observable field at once. Used by position loading.
    pub(crate) fn install(&mut self, cells: [u8; NUM_CELLS], bags: [TileBag; 2], to_move: Player) {
        self.occupied = cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .fold(0u32, |mask, (c, _)| mask | bit(c));
        self.cells = cells;
        self.bags = bags;
        self.to_move = to_move;
        self.refresh_derived();
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Move {} | {} to move | P1={} P2={}",
            self.moves_played(),
            self.to_move,
            self.score(Player::One),
            self.score(Player::Two)
        )?;
        for (cell, &value) in self.cells.iter().enumerate() {
            if value != 0 {
                writeln!(f, "  h{}: {}", cell, value)?;
            }
        }
        for player in Player::BOTH {
            writeln!(f, "  {} tiles: {:?}", player, self.remaining_tiles(player))?;
        }
        Ok(())
    }
}
