//! # Hexuki Engine
//!
//! Rules engine and game-tree search for Hexuki.
//!
//! - [`games::hexuki`]: board, rules, notation and hashing
//! - [`minimax`]: alpha-beta with transposition table and iterative deepening
//! - [`mcts`]: UCT Monte Carlo tree search with an optional alpha-beta endgame solver
//!
//! Both engines are generic over [`GameState`].
//!
//! ```rust,ignore
//! use hexuki_engine::{find_best_move_minimax, BoardState, GameConfig, MinimaxConfig};
//!
//! let board = BoardState::from_position(GameConfig::standard(), "h9:1|turn:1")?;
//! let result = find_best_move_minimax(&board, &MinimaxConfig::fixed_depth(4))?;
//! println!("{:?} scores {}", result.best_move, result.score);
//! ```

// Generic search infrastructure
pub mod config;
pub mod error;
pub mod game_trait;
pub mod mcts;
pub mod minimax;
pub mod node;
pub mod transposition;

// Game implementations
pub mod games;

#[cfg(test)]
mod minimax_tests;
#[cfg(test)]
mod test_games;
#[cfg(test)]
mod transposition_tests;

pub use config::{MCTSConfig, MinimaxConfig, SearchBudget};
pub use error::{EngineError, Result};
pub use game_trait::{GameState, Player};
pub use games::hexuki::{parse_move, BoardState, GameConfig, Move};
pub use mcts::{find_best_move_mcts, MCTSResult, MCTSSearch, MoveStats};
pub use minimax::{find_best_move_minimax, MinimaxSearch, SearchResult};
