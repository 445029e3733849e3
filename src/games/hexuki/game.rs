//! # Hexuki Search Integration
//!
//! Implements the `GameState` trait for [`BoardState`] so both engines can
//! search Hexuki positions.

use super::action::Move;
use super::state::BoardState;
use super::topology::CENTRAL_CELLS;
use crate::game_trait::{GameState, Player};

/// Bonus per tile point in move ordering.
const TILE_WEIGHT: i64 = 100;

/// Bonus for placing on one of the six cells around the center.
const CENTRAL_BONUS: i64 = 500;

impl GameState for BoardState {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        BoardState::legal_moves(self)
    }

    fn make_move(&mut self, mv: Move) {
        BoardState::make_move(self, mv)
    }

    fn unmake_move(&mut self) {
        BoardState::unmake_move(self)
    }

    fn is_terminal(&self) -> bool {
        self.is_game_over()
    }

    fn current_player(&self) -> Player {
        BoardState::current_player(self)
    }

    fn score(&self, player: Player) -> i64 {
        BoardState::score(self, player)
    }

    fn position_hash(&self) -> u64 {
        BoardState::position_hash(self)
    }

    fn empty_cells(&self) -> usize {
        self.empty_count()
    }

    /// Big tiles first, then central cells.
    fn move_priority(&self, mv: &Move) -> i64 {
        let central = if CENTRAL_CELLS.contains(&mv.cell_index()) {
            CENTRAL_BONUS
        } else {
            0
        };
        i64::from(mv.tile) * TILE_WEIGHT + central
    }
}
