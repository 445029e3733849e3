//! # MCTS Search Tree
//!
//! Arena-allocated tree: nodes live in one `Vec` and refer to each other by
//! [`NodeId`]. Children are owned by the arena; the parent link is a plain
//! index used only while backpropagating.
//!
//! ## Value Convention
//!
//! Rollout results arrive oriented to player 1 (1.0 = P1 wins, 0.0 = P2 wins,
//! 0.5 = draw). Each node stores its running total from the perspective of
//! its own `player_to_move`; [`MCTSNode::value_for`] converts to any player.

use crate::game_trait::Player;

/// Index of a node in its [`SearchTree`].
pub type NodeId = usize;

/// Root of every tree.
pub const ROOT: NodeId = 0;

/// One position in the search tree.
#[derive(Clone, Debug)]
pub struct MCTSNode<M> {
    /// Move that led here; `None` at the root.
    pub mv: Option<M>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded into children.
    pub untried_moves: Vec<M>,
    pub player_to_move: Player,
    pub visits: u32,
    /// Sum of results, from `player_to_move`'s perspective.
    pub total_score: f64,
}

impl<M> MCTSNode<M> {
    fn new(mv: Option<M>, parent: Option<NodeId>, player_to_move: Player, untried_moves: Vec<M>) -> Self {
        Self {
            mv,
            parent,
            children: Vec::new(),
            untried_moves,
            player_to_move,
            visits: 0,
            total_score: 0.0,
        }
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Mean result for `player_to_move`; 0 when unvisited.
    pub fn average_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_score / self.visits as f64
        }
    }

    /// Mean result from `player`'s perspective.
    pub fn value_for(&self, player: Player) -> f64 {
        if player == self.player_to_move {
            self.average_score()
        } else {
            1.0 - self.average_score()
        }
    }

    /// Record one rollout result, oriented to player 1.
    pub fn update(&mut self, p1_result: f64) {
        self.visits += 1;
        self.total_score += match self.player_to_move {
            Player::One => p1_result,
            Player::Two => 1.0 - p1_result,
        };
    }

    /// UCT score of this node as seen by `parent_player` choosing among siblings.
    ///
    /// Unvisited nodes score infinity so every child is tried once.
    pub fn uct_score(&self, parent_visits: u32, parent_player: Player, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let exploitation = self.value_for(parent_player);
        let exploration =
            exploration_constant * ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        exploitation + exploration
    }
}

/// Arena holding every node of one search.
#[derive(Clone, Debug)]
pub struct SearchTree<M> {
    nodes: Vec<MCTSNode<M>>,
}

impl<M: Copy> SearchTree<M> {
    /// Tree with a single root node.
    pub fn new(root_player: Player, root_moves: Vec<M>) -> Self {
        Self {
            nodes: vec![MCTSNode::new(None, None, root_player, root_moves)],
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &MCTSNode<M> {
        &self.nodes[id]
    }

    pub fn root(&self) -> &MCTSNode<M> {
        &self.nodes[ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<M>)> {
        self.nodes.iter().enumerate()
    }

    /// Remove and return the untried move at `index`. Order of the rest may change.
    pub fn take_untried(&mut self, id: NodeId, index: usize) -> M {
        self.nodes[id].untried_moves.swap_remove(index)
    }

    /// Attach a new child reached by `mv`.
    pub fn add_child(&mut self, parent: NodeId, mv: M, player_to_move: Player, untried_moves: Vec<M>) -> NodeId {
        let id = self.nodes.len();
        self.nodes
            .push(MCTSNode::new(Some(mv), Some(parent), player_to_move, untried_moves));
        self.nodes[parent].children.push(id);
        id
    }

    /// Child with the highest UCT score; first one wins ties.
    pub fn select_child(&self, id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let parent = &self.nodes[id];
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &parent.children {
            let score = self.nodes[child].uct_score(
                parent.visits,
                parent.player_to_move,
                exploration_constant,
            );
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Child with the most visits; first one wins ties.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child in &self.nodes[id].children {
            if best.map_or(true, |b| self.nodes[child].visits > self.nodes[b].visits) {
                best = Some(child);
            }
        }
        best
    }

    /// Children of `id`, most visited first. Stable among equal counts.
    pub fn children_by_visits(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.nodes[id].children.clone();
        children.sort_by(|a, b| self.nodes[*b].visits.cmp(&self.nodes[*a].visits));
        children
    }

    /// Walk from `leaf` to the root, updating every node on the path.
    pub fn backpropagate(&mut self, leaf: NodeId, p1_result: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.update(p1_result);
            current = node.parent;
        }
    }
}
