//! # Game Implementations
//!
//! Implementations of the `GameState` trait searched by both engines.
//!
//! ## Available Games
//!
//! - **Hexuki**: tile placement on a 19-cell hex board, scored by chain products

pub mod hexuki;

pub use hexuki::{BoardState, GameConfig, Move};
