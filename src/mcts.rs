//! # Monte Carlo Tree Search (MCTS)
//!
//! Serial UCT search over any [`GameState`], with an optional alpha-beta
//! endgame solver in place of random playouts.
//!
//! ## Algorithm
//!
//! Each iteration clones the root position and runs four phases:
//! 1. **Selection**: descend by UCT while the node is fully expanded and has children
//! 2. **Expansion**: turn one random untried move into a new child
//! 3. **Simulation**: play uniformly random moves to the end of the game
//! 4. **Backpropagation**: add the result to every node on the path
//!
//! ## Minimax Hybrid
//!
//! With `use_minimax_hybrid`, a rollout that reaches `minimax_threshold` empty
//! cells or fewer stops playing randomly and asks alpha-beta for the exact
//! result at full remaining depth. The solver's table is shared by every
//! rollout of one top-level call and cleared when the call starts.
//!
//! ## Result Selection
//!
//! The most visited root child is returned. Win rates are for diagnostics,
//! oriented to the player to move at the root.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::config::{MCTSConfig, SearchBudget};
use crate::error::Result;
use crate::game_trait::{GameState, Player};
use crate::minimax::solve;
use crate::node::{NodeId, SearchTree, ROOT};
use crate::transposition::TranspositionTable;

/// Rollouts between progress log lines.
const PROGRESS_INTERVAL: u32 = 1000;

/// Statistics for one root child.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveStats<M> {
    pub mv: M,
    pub visits: u32,
    /// Root mover's perspective.
    pub win_rate: f64,
}

/// Outcome of a top-level MCTS call.
#[derive(Clone, Debug, PartialEq)]
pub struct MCTSResult<M> {
    /// `None` only when the root has no legal moves.
    pub best_move: Option<M>,
    /// Visits of the chosen child.
    pub visits: u32,
    /// Chosen child's win rate for the root mover; 0.5 when unexplored.
    pub win_rate: f64,
    pub simulations_run: u32,
    pub elapsed: Duration,
    /// Most visited root children, best first.
    pub top_moves_by_visits: Vec<MoveStats<M>>,
}

impl<M> MCTSResult<M> {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

/// Game result oriented to player 1: 1 win, 0 loss, 0.5 draw.
pub fn p1_outcome<G: GameState>(state: &G) -> f64 {
    let p1 = state.score(Player::One);
    let p2 = state.score(Player::Two);
    if p1 > p2 {
        1.0
    } else if p1 < p2 {
        0.0
    } else {
        0.5
    }
}

/// Map a signed solver score for `mover` to a player-1 result. An aborted
/// solve (`None`) counts as a draw.
pub(crate) fn p1_result_from_score(mover: Player, score: Option<i64>) -> f64 {
    let mover_result = match score {
        Some(s) if s > 0 => 1.0,
        Some(s) if s < 0 => 0.0,
        _ => 0.5,
    };
    match mover {
        Player::One => mover_result,
        Player::Two => 1.0 - mover_result,
    }
}

/// MCTS engine.
///
/// Owns the RNG, the endgame table and the tree of the last search.
pub struct MCTSSearch<M> {
    config: MCTSConfig,
    rng: StdRng,
    endgame_table: TranspositionTable<M>,
    last_tree: Option<SearchTree<M>>,
}

impl<M: Copy + PartialEq> MCTSSearch<M> {
    /// Engine seeded from `config.seed`, or from the OS when unset.
    pub fn new(config: MCTSConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            config,
            rng,
            endgame_table: TranspositionTable::new(),
            last_tree: None,
        })
    }

    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Reseed the generator.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Tree built by the most recent search.
    pub fn last_tree(&self) -> Option<&SearchTree<M>> {
        self.last_tree.as_ref()
    }

    pub fn endgame_table(&self) -> &TranspositionTable<M> {
        &self.endgame_table
    }

    /// Run one search from `root`.
    pub fn find_best_move<G: GameState<Move = M>>(&mut self, root: &G) -> MCTSResult<M> {
        let start = Instant::now();
        self.endgame_table.clear();

        let (max_simulations, deadline) = match self.config.budget {
            SearchBudget::Simulations(n) => (n, None),
            SearchBudget::TimeMs(ms) => (u32::MAX, Some(start + Duration::from_millis(ms))),
        };

        let mut tree = SearchTree::new(root.current_player(), root.legal_moves());
        let mut simulations = 0u32;

        if !tree.root().untried_moves.is_empty() {
            while simulations < max_simulations {
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    break;
                }
                self.run_iteration(&mut tree, root, deadline);
                simulations += 1;

                if simulations % PROGRESS_INTERVAL == 0 {
                    trace!(
                        simulations,
                        nodes = tree.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "mcts progress"
                    );
                }
            }
        }

        let result = self.summarize(&tree, simulations, start.elapsed());
        debug!(
            simulations,
            nodes = tree.len(),
            visits = result.visits,
            win_rate = result.win_rate,
            elapsed_ms = result.elapsed_ms(),
            "mcts search complete"
        );
        self.last_tree = Some(tree);
        result
    }

    fn run_iteration<G: GameState<Move = M>>(
        &mut self,
        tree: &mut SearchTree<M>,
        root: &G,
        deadline: Option<Instant>,
    ) {
        let mut state = root.clone();
        let mut node: NodeId = ROOT;

        // Selection
        while tree.node(node).is_fully_expanded() && !tree.node(node).is_leaf() {
            let Some(child) = tree.select_child(node, self.config.exploration_constant) else {
                break;
            };
            node = child;
            if let Some(mv) = tree.node(node).mv {
                state.make_move(mv);
            }
        }

        // Expansion
        let untried = tree.node(node).untried_moves.len();
        if untried > 0 {
            let index = self.rng.random_range(0..untried);
            let mv = tree.take_untried(node, index);
            state.make_move(mv);
            node = tree.add_child(node, mv, state.current_player(), state.legal_moves());
        }

        // Simulation
        let result = self.simulate(&mut state, deadline);

        // Backpropagation
        tree.backpropagate(node, result);
    }

    /// Play out `state` and return the player-1 result.
    fn simulate<G: GameState<Move = M>>(&mut self, state: &mut G, deadline: Option<Instant>) -> f64 {
        loop {
            if state.is_terminal() {
                return p1_outcome(state);
            }

            let empty = state.empty_cells();
            if self.config.use_minimax_hybrid && empty <= self.config.minimax_threshold {
                let mover = state.current_player();
                let score = solve(state, empty as u32, &self.endgame_table, deadline);
                return p1_result_from_score(mover, score);
            }

            let moves = state.legal_moves();
            if moves.is_empty() {
                return p1_outcome(state);
            }
            let mv = moves[self.rng.random_range(0..moves.len())];
            state.make_move(mv);
        }
    }

    fn summarize(&self, tree: &SearchTree<M>, simulations: u32, elapsed: Duration) -> MCTSResult<M> {
        let root = tree.root();
        let root_player = root.player_to_move;

        let top_moves_by_visits: Vec<MoveStats<M>> = tree
            .children_by_visits(ROOT)
            .into_iter()
            .take(self.config.top_moves)
            .filter_map(|id| {
                let child = tree.node(id);
                child.mv.map(|mv| MoveStats {
                    mv,
                    visits: child.visits,
                    win_rate: child.value_for(root_player),
                })
            })
            .collect();

        let (best_move, visits, win_rate) = match tree.most_visited_child(ROOT) {
            Some(id) => {
                let child = tree.node(id);
                (child.mv, child.visits, child.value_for(root_player))
            }
            None => (root.untried_moves.first().copied(), 0, 0.5),
        };

        MCTSResult {
            best_move,
            visits,
            win_rate,
            simulations_run: simulations,
            elapsed,
            top_moves_by_visits,
        }
    }
}

/// One-shot MCTS search with a fresh engine.
pub fn find_best_move_mcts<G: GameState>(
    state: &G,
    config: &MCTSConfig,
) -> Result<MCTSResult<G::Move>> {
    Ok(MCTSSearch::new(config.clone())?.find_best_move(state))
}
