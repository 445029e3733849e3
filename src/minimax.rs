//! # Alpha-Beta Minimax Search
//!
//! Negamax alpha-beta over any [`GameState`], with a transposition table,
//! heuristic move ordering and iterative deepening under a wall-clock limit.
//!
//! ## Scores
//!
//! Every score is from the perspective of the player to move at the node
//! being searched. Leaves use [`GameState::evaluate`]; the root result is
//! from the perspective of the player to move at the root.
//!
//! ## Timeouts
//!
//! The clock is polled every [`TIME_CHECK_INTERVAL`] nodes and before each
//! root move. Once the deadline passes the search unwinds with a dummy score,
//! stores nothing, and the driver falls back to the last fully completed
//! depth. Timeouts are reported in [`SearchResult::timed_out`], never as errors.
//!
//! ## Move Ordering
//!
//! 1. Transposition-table move (if any)
//! 2. [`GameState::move_priority`], highest first
//!
//! At the root, iterative deepening additionally moves the previous
//! iteration's best move to the front.

use std::cmp::Reverse;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::config::MinimaxConfig;
use crate::error::Result;
use crate::game_trait::GameState;
use crate::transposition::{Bound, TTEntry, TranspositionTable};

/// Larger than any reachable evaluation.
pub const INF: i64 = 1 << 48;

/// Scores at or beyond this magnitude are treated as decided; deepening stops.
pub const MATE_SCORE: i64 = INF / 2;

/// Nodes between clock polls.
pub const TIME_CHECK_INTERVAL: u64 = 1024;

/// Priority boost that puts the table move ahead of every heuristic score.
const TT_MOVE_BONUS: i64 = 1 << 40;

// ============================================================================
// RESULT
// ============================================================================

/// Outcome of a top-level minimax call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// `None` only when the root has no legal moves.
    pub best_move: Option<M>,
    /// Root mover's perspective.
    pub score: i64,
    /// Deepest fully completed iteration; 0 for the timeout fallback.
    pub depth_reached: u32,
    pub nodes_searched: u64,
    pub timed_out: bool,
    pub tt_hits: u64,
    pub tt_misses: u64,
    pub elapsed: Duration,
}

impl<M> SearchResult<M> {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

// ============================================================================
// MOVE ORDERING
// ============================================================================

/// Sort best-first by heuristic, with `tt_move` ahead of everything. Stable.
pub fn order_moves<G: GameState>(state: &G, moves: &mut [G::Move], tt_move: Option<G::Move>) {
    moves.sort_by_key(|mv| {
        let bonus = if tt_move == Some(*mv) { TT_MOVE_BONUS } else { 0 };
        Reverse(state.move_priority(mv) + bonus)
    });
}

/// Move `mv` to the front, keeping the relative order of the rest.
fn promote<M: PartialEq>(moves: &mut [M], mv: &M) {
    if let Some(idx) = moves.iter().position(|m| m == mv) {
        moves[..=idx].rotate_right(1);
    }
}

// ============================================================================
// ALPHA-BETA CORE
// ============================================================================

/// Per-call search context.
pub(crate) struct AlphaBeta<'t, M> {
    table: &'t TranspositionTable<M>,
    deadline: Option<Instant>,
    use_move_ordering: bool,
    pub(crate) nodes: u64,
    /// Sticky once the deadline has passed.
    pub(crate) aborted: bool,
}

impl<'t, M: Copy + PartialEq> AlphaBeta<'t, M> {
    pub(crate) fn new(
        table: &'t TranspositionTable<M>,
        deadline: Option<Instant>,
        use_move_ordering: bool,
    ) -> Self {
        Self {
            table,
            deadline,
            use_move_ordering,
            nodes: 0,
            aborted: false,
        }
    }

    fn deadline_passed(&mut self) -> bool {
        if !self.aborted {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    trace!(nodes = self.nodes, "alpha-beta deadline reached");
                    self.aborted = true;
                }
            }
        }
        self.aborted
    }

    /// Negamax alpha-beta. Returns 0 once aborted; callers must check `aborted`.
    pub(crate) fn search<G: GameState<Move = M>>(
        &mut self,
        state: &mut G,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
    ) -> i64 {
        self.nodes += 1;
        if self.aborted || (self.nodes % TIME_CHECK_INTERVAL == 0 && self.deadline_passed()) {
            return 0;
        }

        if depth == 0 || state.is_terminal() {
            return state.evaluate();
        }

        let alpha_orig = alpha;
        let hash = state.position_hash();
        let mut tt_move = None;

        if let Some(entry) = self.table.probe(hash) {
            tt_move = entry.best_move;
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        let mut moves = state.legal_moves();
        if moves.is_empty() {
            return state.evaluate();
        }
        if self.use_move_ordering {
            order_moves(state, &mut moves, tt_move);
        }

        let mut best_score = -INF;
        let mut best_move = None;

        for mv in moves {
            state.make_move(mv);
            let score = -self.search(state, depth - 1, -beta, -alpha);
            state.unmake_move();

            if self.aborted {
                return 0;
            }
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.store(
            hash,
            TTEntry {
                score: best_score,
                depth,
                bound,
                best_move,
            },
        );

        best_score
    }

    /// Search every root move to `depth`. `None` if the clock ran out first.
    fn search_root<G: GameState<Move = M>>(
        &mut self,
        state: &mut G,
        moves: &[M],
        depth: u32,
    ) -> Option<(M, i64)> {
        let mut alpha = -INF;
        let mut best: Option<(M, i64)> = None;

        for &mv in moves {
            if self.deadline_passed() {
                return None;
            }
            state.make_move(mv);
            let score = -self.search(state, depth - 1, -INF, -alpha);
            state.unmake_move();

            if self.aborted {
                return None;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        if let Some((mv, score)) = best {
            self.table.store(
                state.position_hash(),
                TTEntry {
                    score,
                    depth,
                    bound: Bound::Exact,
                    best_move: Some(mv),
                },
            );
        }
        best
    }
}

/// Exact-as-possible value of `state` to `depth` plies, for callers that
/// manage their own table. `None` if the deadline passed mid-search.
pub fn solve<G: GameState>(
    state: &mut G,
    depth: u32,
    table: &TranspositionTable<G::Move>,
    deadline: Option<Instant>,
) -> Option<i64> {
    let mut ab = AlphaBeta::new(table, deadline, true);
    let score = ab.search(state, depth, -INF, INF);
    (!ab.aborted).then_some(score)
}

// ============================================================================
// DRIVER
// ============================================================================

/// Minimax engine owning its transposition table.
///
/// The table is cleared at the start of every [`find_best_move`](Self::find_best_move).
pub struct MinimaxSearch<M> {
    config: MinimaxConfig,
    table: TranspositionTable<M>,
}

impl<M: Copy + PartialEq> MinimaxSearch<M> {
    /// Engine for a validated `config`.
    pub fn new(config: MinimaxConfig) -> Result<Self> {
        config.validate()?;
        let table = TranspositionTable::with_size_bytes(config.tt_size_bytes);
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    pub fn table(&self) -> &TranspositionTable<M> {
        &self.table
    }

    /// Best move for the player to move in `root`.
    pub fn find_best_move<G: GameState<Move = M>>(&mut self, root: &G) -> SearchResult<M> {
        let start = Instant::now();
        self.table.clear();

        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| start + Duration::from_millis(ms));
        let mut state = root.clone();
        let mut ab = AlphaBeta::new(&self.table, deadline, self.config.use_move_ordering);

        let mut moves = state.legal_moves();
        if moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: state.evaluate(),
                depth_reached: 0,
                nodes_searched: 0,
                timed_out: false,
                tt_hits: 0,
                tt_misses: 0,
                elapsed: start.elapsed(),
            };
        }
        if self.config.use_move_ordering {
            order_moves(&state, &mut moves, None);
        }

        let max_depth = self.config.max_depth.max(1);
        let mut best: Option<(M, i64)> = None;
        let mut depth_reached = 0;
        let mut timed_out = false;

        if moves.len() == 1 {
            let mv = moves[0];
            state.make_move(mv);
            let score = -ab.search(&mut state, max_depth - 1, -INF, INF);
            state.unmake_move();
            if ab.aborted {
                timed_out = true;
            } else {
                best = Some((mv, score));
                depth_reached = max_depth;
            }
        } else {
            let first_depth = if self.config.use_iterative_deepening {
                1
            } else {
                max_depth
            };
            let remaining = state.empty_cells() as u32;

            for depth in first_depth..=max_depth {
                if let Some((prev, _)) = best {
                    promote(&mut moves, &prev);
                }
                match ab.search_root(&mut state, &moves, depth) {
                    Some((mv, score)) => {
                        best = Some((mv, score));
                        depth_reached = depth;
                        debug!(depth, score, nodes = ab.nodes, "minimax depth complete");
                        if score.abs() >= MATE_SCORE || depth >= remaining {
                            break;
                        }
                    }
                    None => {
                        timed_out = true;
                        trace!(depth, "minimax depth abandoned on timeout");
                        break;
                    }
                }
            }
        }

        let (best_move, score) = match best {
            Some(found) => found,
            None => {
                // Not even one iteration finished: first ordered move, static score.
                let mv = moves[0];
                state.make_move(mv);
                let score = -state.evaluate();
                state.unmake_move();
                (mv, score)
            }
        };

        SearchResult {
            best_move: Some(best_move),
            score,
            depth_reached,
            nodes_searched: ab.nodes,
            timed_out,
            tt_hits: self.table.hits(),
            tt_misses: self.table.misses(),
            elapsed: start.elapsed(),
        }
    }
}

/// One-shot minimax search with a fresh table.
pub fn find_best_move_minimax<G: GameState>(
    state: &G,
    config: &MinimaxConfig,
) -> Result<SearchResult<G::Move>> {
    Ok(MinimaxSearch::new(config.clone())?.find_best_move(state))
}
