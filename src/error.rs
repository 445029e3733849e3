//! Error types for input validation at the notation/config boundary.
//!
//! Illegal-but-well-formed moves, search timeouts and empty move sets are not
//! errors; they are reported through booleans and result fields.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid move string format: {0:?}")]
    InvalidMoveFormat(String),

    #[error("Invalid hex ID: {0} (board has 19 hexes)")]
    CellOutOfRange(u32),

    #[error("Invalid tile value: {0}")]
    InvalidTileValue(u32),

    #[error("Malformed position section {section:?}: {reason}")]
    MalformedPosition { section: String, reason: String },

    #[error("Invalid player to move: {0}")]
    InvalidPlayer(u32),

    #[error("Hex {0} listed more than once")]
    DuplicateCell(u8),

    #[error("Player {player} has {count} tiles, at most {max} allowed")]
    TooManyTiles { player: u8, count: usize, max: usize },

    #[error("Invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("Illegal move {0} in current position")]
    IllegalMove(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
