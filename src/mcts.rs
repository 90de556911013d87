//! The search engine, orchestrating the four phases of selection,
//! expansion, simulation and backpropagation.

use std::time::Instant;

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{
    board::{Board, Coord},
    config::{ExpansionMode, MctsConfig, RewardMode},
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    utils,
    MctsError, Result,
};

/// Monte Carlo Tree Search over a single board position.
///
/// One instance serves one move decision: the tree is grown from scratch
/// for the supplied position and discarded with the engine. The search is
/// single-threaded and synchronous; the iteration budget is the only
/// progress bound.
pub struct Mcts {
    tree: SearchTree,
    config: MctsConfig,
    rng: ChaCha20Rng,
    statistics: SearchStatistics,
}

impl Mcts {
    /// Creates an engine for the given position.
    ///
    /// Fails with `InvalidConfiguration` if the configuration cannot be run.
    pub fn new(root: Board, config: MctsConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Ok(Mcts {
            tree: SearchTree::new(root),
            config,
            rng,
            statistics: SearchStatistics::default(),
        })
    }

    /// Runs the budgeted search and returns the recommended move, always a
    /// currently empty cell of the root board.
    ///
    /// Calling this on a terminal position is caller error and fails with
    /// `NoLegalMoves`; callers are expected to check `Board::is_terminal`
    /// before asking for a move.
    pub fn search(&mut self) -> Result<Coord> {
        if self.tree.get(self.tree.root()).state.is_terminal() {
            return Err(MctsError::NoLegalMoves);
        }

        self.statistics = SearchStatistics::default();
        let start = Instant::now();

        for iteration in 0..self.config.max_iterations {
            match self.config.expansion {
                ExpansionMode::Incremental => self.incremental_iteration()?,
                ExpansionMode::VisitThreshold {
                    threshold,
                    rollouts_per_leaf,
                } => self.threshold_iteration(threshold, rollouts_per_leaf)?,
            }
            self.statistics.iterations = iteration + 1;
            trace!(
                "iteration {}: {} nodes",
                self.statistics.iterations,
                self.tree.node_count()
            );
        }

        self.statistics.total_time = start.elapsed();
        self.statistics.tree_size = self.tree.node_count();

        let best = self.extract_move()?;
        self.log_root_children();
        debug!("recommending {best} after {}", self.statistics.summary());
        Ok(best)
    }

    /// Read access to the search tree.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Statistics from the most recent `search` call.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// One budget iteration of incremental expansion: walk down through
    /// fully expanded nodes, attach a single new child, roll out once from
    /// the end of the walk.
    fn incremental_iteration(&mut self) -> Result<()> {
        let leaf = self.select_incremental()?;
        let terminal = self.simulate(leaf)?;
        self.backpropagate(leaf, &terminal);
        Ok(())
    }

    /// Tree walk for incremental expansion. Descends through fully expanded
    /// nodes via the scoring rule; the first node with an untried move gets
    /// exactly one new child, which ends the walk. Terminal nodes end the
    /// walk as-is.
    fn select_incremental(&mut self) -> Result<NodeId> {
        let mut current = self.tree.root();
        let mut depth = 0;
        loop {
            if self.tree.get(current).state.is_terminal() {
                return Ok(current);
            }
            let legal_count = self.tree.get(current).state.legal_moves().len();
            if self.tree.get(current).children.len() < legal_count {
                let child = self.expand_one(current)?;
                self.note_depth(depth + 1);
                return Ok(child);
            }
            current = self.descend(current)?;
            depth += 1;
            self.note_depth(depth);
        }
    }

    /// One budget iteration of threshold-gated expansion: find a launch
    /// point, play a batch of rollouts from it, then throw the scratch
    /// subtree away and zero the launch point's statistics.
    fn threshold_iteration(&mut self, threshold: u64, rollouts_per_leaf: u32) -> Result<()> {
        let launch = self.select_threshold(threshold)?;
        for _ in 0..rollouts_per_leaf {
            let terminal = self.simulate(launch)?;
            self.backpropagate(launch, &terminal);
        }
        self.tree.prune_children(launch);
        self.tree.reset_stats(launch);
        Ok(())
    }

    /// Tree walk for threshold-gated expansion. Nodes whose visit count
    /// exceeds the threshold (and that have children) are descended
    /// through; the first gated node is expanded all at once if childless,
    /// and its best child is returned as the rollout launch point.
    fn select_threshold(&mut self, threshold: u64) -> Result<NodeId> {
        let mut current = self.tree.root();
        let mut depth = 0;
        loop {
            let node = self.tree.get(current);
            if node.state.is_terminal() {
                return Ok(current);
            }
            if node.visits > threshold && !node.children.is_empty() {
                current = self.descend(current)?;
                depth += 1;
                self.note_depth(depth);
                continue;
            }
            if node.children.is_empty() {
                self.expand_all(current)?;
            }
            let launch = self.descend(current)?;
            self.note_depth(depth + 1);
            return Ok(launch);
        }
    }

    /// Best child under the configured scoring rule and exploration
    /// constant.
    fn descend(&self, node: NodeId) -> Result<NodeId> {
        utils::best_child(
            &self.tree,
            node,
            self.config.scoring,
            self.config.exploration_constant,
        )
        .ok_or(MctsError::NoLegalMoves)
    }

    /// Attaches one child for a uniformly chosen untried legal move of
    /// `node`. A move is untried while no existing child holds a mark on
    /// its cell.
    fn expand_one(&mut self, node: NodeId) -> Result<NodeId> {
        let untried: Vec<Coord> = {
            let parent = self.tree.get(node);
            parent
                .state
                .legal_moves()
                .into_iter()
                .filter(|&mv| {
                    parent
                        .children
                        .iter()
                        .all(|&child| self.tree.get(child).state.cell(mv).is_none())
                })
                .collect()
        };
        let mv = *untried.choose(&mut self.rng).ok_or(MctsError::NoLegalMoves)?;
        let state = self.tree.get(node).state.apply(mv)?;
        Ok(self.tree.add_child(node, state))
    }

    /// Attaches one child per legal move of `node`, in row-major move
    /// order.
    fn expand_all(&mut self, node: NodeId) -> Result<()> {
        for mv in self.tree.get(node).state.legal_moves() {
            let state = self.tree.get(node).state.apply(mv)?;
            self.tree.add_child(node, state);
        }
        Ok(())
    }

    /// Random playout from `node`'s position to a terminal board. The
    /// terminal board is returned without being added to the tree.
    fn simulate(&mut self, node: NodeId) -> Result<Board> {
        let mut state = self.tree.get(node).state.clone();
        while !state.is_terminal() {
            let mv = state.random_move(&mut self.rng)?;
            state = state.apply(mv)?;
        }
        self.statistics.rollouts += 1;
        Ok(state)
    }

    /// Walks parent references from `origin` to the root inclusive,
    /// incrementing every visit count and crediting the rollout outcome
    /// under the configured reward rule.
    fn backpropagate(&mut self, origin: NodeId, terminal: &Board) {
        match self.config.reward {
            RewardMode::AlternatingSign => {
                // payoff from the perspective of the player who moved into
                // the terminal state; draws score zero
                let last_mover = terminal.to_move().other();
                let mut reward = if terminal.winner() == Some(last_mover) {
                    1.0
                } else {
                    0.0
                };
                let mut current = Some(origin);
                while let Some(id) = current {
                    let node = self.tree.get_mut(id);
                    node.visits += 1;
                    node.score += reward;
                    reward = -reward;
                    current = node.parent;
                }
            }
            RewardMode::MatchRootPlayer => {
                let root_player = self.tree.get(self.tree.root()).state.to_move();
                let reward = if terminal.winner() == Some(root_player) {
                    1.0
                } else {
                    0.0
                };
                let mut current = Some(origin);
                while let Some(id) = current {
                    let node = self.tree.get_mut(id);
                    node.visits += 1;
                    // a node whose last mover is the root player is
                    // credited with the root player's payoff
                    if node.state.to_move() != root_player {
                        node.score += reward;
                    } else {
                        node.score += 1.0 - reward;
                    }
                    current = node.parent;
                }
            }
        }
    }

    /// Pure-exploitation best child of the root, diffed against the root
    /// board to recover the recommended move.
    fn extract_move(&self) -> Result<Coord> {
        let root = self.tree.root();
        let best = utils::best_child(&self.tree, root, self.config.scoring, 0.0)
            .ok_or(MctsError::NoLegalMoves)?;
        self.tree
            .get(root)
            .state
            .diff_one(&self.tree.get(best).state)
            .ok_or(MctsError::NoLegalMoves)
    }

    fn note_depth(&mut self, depth: usize) {
        self.statistics.max_depth = self.statistics.max_depth.max(depth);
    }

    fn log_root_children(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        let root = self.tree.root();
        for &child_id in &self.tree.get(root).children {
            let child = self.tree.get(child_id);
            if let Some(mv) = self.tree.get(root).state.diff_one(&child.state) {
                debug!(
                    "{mv}: score {:.1} over {} visits",
                    child.score, child.visits
                );
            }
        }
    }
}
