//! Small games with known solutions, shared by the search tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::game_trait::{GameState, Player};

// ========================================================================
// Take-from-either-end game with a known optimum
// ========================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum End {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Pick {
    items: Vec<i64>,
    lo: usize,
    hi: usize,
    scores: [i64; 2],
    to_move: Player,
    history: Vec<(End, Player)>,
}

impl Pick {
    pub(crate) fn new(items: &[i64]) -> Self {
        Self {
            items: items.to_vec(),
            lo: 0,
            hi: items.len(),
            scores: [0, 0],
            to_move: Player::One,
            history: Vec::new(),
        }
    }
}

impl GameState for Pick {
    type Move = End;

    fn legal_moves(&self) -> Vec<End> {
        match self.hi - self.lo {
            0 => vec![],
            1 => vec![End::Left],
            _ => vec![End::Left, End::Right],
        }
    }

    fn make_move(&mut self, mv: End) {
        let value = match mv {
            End::Left => {
                self.lo += 1;
                self.items[self.lo - 1]
            }
            End::Right => {
                self.hi -= 1;
                self.items[self.hi]
            }
        };
        self.scores[self.to_move.index()] += value;
        self.history.push((mv, self.to_move));
        self.to_move = self.to_move.opponent();
    }

    fn unmake_move(&mut self) {
        let Some((mv, mover)) = self.history.pop() else {
            return;
        };
        let value = match mv {
            End::Left => {
                self.lo -= 1;
                self.items[self.lo]
            }
            End::Right => {
                self.hi += 1;
                self.items[self.hi - 1]
            }
        };
        self.scores[mover.index()] -= value;
        self.to_move = mover;
    }

    fn is_terminal(&self) -> bool {
        self.lo == self.hi
    }

    fn current_player(&self) -> Player {
        self.to_move
    }

    fn score(&self, player: Player) -> i64 {
        self.scores[player.index()]
    }

    fn position_hash(&self) -> u64 {
        let mut h = DefaultHasher::new();
        (self.lo, self.hi, self.scores, self.to_move).hash(&mut h);
        h.finish()
    }

    fn empty_cells(&self) -> usize {
        self.hi - self.lo
    }
}

/// Best achievable (mover - opponent) margin on `items[lo..hi]`.
pub(crate) fn optimal_margin(items: &[i64]) -> i64 {
    match items.len() {
        0 => 0,
        n => (items[0] - optimal_margin(&items[1..]))
            .max(items[n - 1] - optimal_margin(&items[..n - 1])),
    }
}
