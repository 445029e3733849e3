//! # Hexuki Game Implementation
//!
//! Two players alternately place numbered tiles on a 19-cell hex board. Each
//! player scores the sum, over five fixed diagonals, of the product of the
//! tiles placed on that diagonal. The game ends when the board is full.
//!
//! Submodules:
//! - `topology`: cells, directions, chains and the mirror map
//! - `board`: per-game configuration (tile sets, rule toggles)
//! - `action`: the `Move` type
//! - `state`: `BoardState`, legality, scoring, make/unmake, puzzle setup
//! - `notation`: move and position strings
//! - `zobrist`: incremental position hashing
//! - `game`: `GameState` implementation for the search engines

pub mod action;
pub mod board;
mod game;
pub mod notation;
pub mod state;
pub mod topology;
pub mod zobrist;

#[cfg(test)]
mod notation_tests;

pub use action::Move;
pub use board::{GameConfig, TileBag, DEFAULT_TILES, MAX_TILES_PER_PLAYER, MAX_TILE_VALUE};
pub use notation::parse_move;
pub use state::BoardState;
pub use topology::{CENTER_CELL, NUM_CELLS};
