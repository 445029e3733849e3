//! # Search Game Trait
//!
//! Core trait that both search engines (alpha-beta and MCTS) are written against.
//!
//! The engines treat moves as opaque tokens - they never inspect them. All
//! game-specific logic (legality, scoring, hashing, ordering hints) is delegated
//! to trait methods.
//!
//! ## Design Principles
//!
//! - **In-place mutation**: `make_move`/`unmake_move` mutate the state and keep
//!   their own undo history, so alpha-beta can recurse without cloning
//! - **Cheap snapshots**: `Clone` is required so MCTS can copy the root once per rollout
//! - **Opaque moves**: engines only store moves as tree edges and table entries
//! - **Sensible defaults**: optional methods have defaults that work for most games

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Two-player identity. The discriminants match the `turn:<1|2>` notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Zero-based index, for per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// One-based player number as used in notation.
    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }

    pub const BOTH: [Player; 2] = [Player::One, Player::Two];
}

impl TryFrom<u8> for Player {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(other),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// Core trait that every searchable game position must implement.
///
/// ## Example Implementation
///
/// ```rust,ignore
/// use hexuki_engine::{GameState, Player};
///
/// #[derive(Clone)]
/// struct Nim { heap: u32, to_move: Player, history: Vec<u32> }
///
/// impl GameState for Nim {
///     type Move = u32;
///
///     fn legal_moves(&self) -> Vec<u32> { (1..=self.heap.min(3)).collect() }
///     fn make_move(&mut self, mv: u32) { self.heap -= mv; self.history.push(mv); self.to_move = self.to_move.opponent(); }
///     fn unmake_move(&mut self) { if let Some(mv) = self.history.pop() { self.heap += mv; self.to_move = self.to_move.opponent(); } }
///     fn is_terminal(&self) -> bool { self.heap == 0 }
///     fn current_player(&self) -> Player { self.to_move }
///     fn score(&self, _player: Player) -> i64 { 0 }
///     fn position_hash(&self) -> u64 { (self.heap as u64) << 1 | self.to_move.index() as u64 }
///     fn empty_cells(&self) -> usize { self.heap as usize }
/// }
/// ```
pub trait GameState: Clone {
    /// The move type. Engines treat this as an opaque token.
    type Move: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    // ========================================================================
    // CORE GAME RULES
    // ========================================================================

    /// Generate all legal moves for the player to move.
    ///
    /// May be empty for terminal positions, and for pathological puzzle
    /// positions where the mover is stuck. Engines handle both.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a legal move in place and push it onto the undo history.
    ///
    /// Behavior is unspecified for illegal moves; callers validate first.
    fn make_move(&mut self, mv: Self::Move);

    /// Undo the most recent `make_move`. No-op on an empty history.
    fn unmake_move(&mut self);

    /// Check if the game has ended.
    fn is_terminal(&self) -> bool;

    /// The player to move.
    fn current_player(&self) -> Player;

    /// Current score of `player`. Defined at every point of the game.
    fn score(&self, player: Player) -> i64;

    /// Static evaluation from the mover's perspective (negamax convention).
    fn evaluate(&self) -> i64 {
        let me = self.current_player();
        self.score(me) - self.score(me.opponent())
    }

    // ========================================================================
    // SEARCH SUPPORT
    // ========================================================================

    /// Position key for the transposition table.
    ///
    /// Must be a pure function of the observable position: two states that
    /// compare equal hash identically regardless of move history.
    fn position_hash(&self) -> u64;

    /// Number of cells still empty. Used as the exact remaining-ply count by
    /// the MCTS endgame solver.
    fn empty_cells(&self) -> usize;

    /// Ordering hint for alpha-beta: higher values are searched first.
    ///
    /// # Default
    /// Returns 0 (no preference; generation order is kept).
    fn move_priority(&self, _mv: &Self::Move) -> i64 {
        0
    }
}
