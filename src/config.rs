//! Configuration options for the search engine.
//!
//! All knobs that vary between the two supported search flavors live here,
//! as explicit fields rather than process-wide constants, so different
//! configurations (and board geometries) can be exercised side by side.

use crate::{MctsError, Result};

/// Visit threshold at which [`ExpansionMode::VisitThreshold`] expands a node.
pub const DEFAULT_EXPANSION_THRESHOLD: u64 = 30;

/// How the tree grows at a node that still has untried moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionMode {
    /// Add exactly one new child per visit until every legal move has a
    /// child; only then does selection descend through the node. One rollout
    /// is played per budget iteration, from the end of the tree walk.
    Incremental,
    /// Descend only through nodes whose visit count exceeds `threshold`.
    /// The first gated node on the walk is expanded all at once (one child
    /// per legal move) and its best child becomes the rollout launch point;
    /// `rollouts_per_leaf` rollouts are played from there, after which the
    /// launch point's subtree is discarded and its statistics zeroed. The
    /// subtree below a launch point is scratch space, not retained tree
    /// knowledge.
    VisitThreshold {
        threshold: u64,
        rollouts_per_leaf: u32,
    },
}

/// Child-scoring variant used during selection and move extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
    /// Classic UCB1: `W/N + c * sqrt(2 ln(Np) / N)`. An unvisited child
    /// scores infinity while exploring (`c > 0`) so it is always tried
    /// before any revisit, and negative infinity under pure exploitation
    /// (`c = 0`) so extraction never recommends an untried move.
    Ucb1,
    /// One-smoothed counts: `W/(N+1) + c * sqrt(2 ln(Np+1) / (N+1))`.
    /// Tolerates unvisited children without special cases.
    Smoothed,
}

/// How rollout outcomes are credited along the path back to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardMode {
    /// The reward is 1 when the player who moved into the terminal state
    /// won, 0 for a draw; its sign flips at every step up the path,
    /// modeling the adversarial perspective swap between plies.
    AlternatingSign,
    /// The reward is 1 when the root's player to move won, 0 otherwise.
    /// A node whose last mover is the root player is credited with the
    /// reward, any other node with its complement.
    MatchRootPlayer,
}

/// Configuration for a single search.
///
/// Build one from a preset and adjust with the `with_*` methods:
///
/// ```
/// use connectk_mcts::MctsConfig;
///
/// let config = MctsConfig::incremental()
///     .with_max_iterations(500)
///     .with_exploration_constant(1.0)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Iteration budget for the outer search loop. The sole progress bound:
    /// there are no time limits.
    pub max_iterations: u32,
    /// Exploration constant `c`. Higher values favor under-visited children.
    pub exploration_constant: f64,
    /// Tree-growth policy.
    pub expansion: ExpansionMode,
    /// Child-scoring variant.
    pub scoring: Scoring,
    /// Reward-crediting rule for backpropagation.
    pub reward: RewardMode,
    /// Seed for the engine's random generator. `None` seeds from entropy;
    /// setting it makes the whole search reproducible.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self::incremental()
    }
}

impl MctsConfig {
    /// One-child-per-visit expansion with classic UCB1 scoring and
    /// alternating-sign reward propagation.
    pub fn incremental() -> Self {
        MctsConfig {
            max_iterations: 2_000,
            exploration_constant: 0.7,
            expansion: ExpansionMode::Incremental,
            scoring: Scoring::Ucb1,
            reward: RewardMode::AlternatingSign,
            seed: None,
        }
    }

    /// Threshold-gated all-at-once expansion with smoothed scoring and
    /// root-player reward matching.
    pub fn visit_threshold() -> Self {
        MctsConfig {
            max_iterations: 1_000,
            exploration_constant: 2.4,
            expansion: ExpansionMode::VisitThreshold {
                threshold: DEFAULT_EXPANSION_THRESHOLD,
                rollouts_per_leaf: 1,
            },
            scoring: Scoring::Smoothed,
            reward: RewardMode::MatchRootPlayer,
            seed: None,
        }
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the exploration constant.
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the tree-growth policy.
    pub fn with_expansion(mut self, expansion: ExpansionMode) -> Self {
        self.expansion = expansion;
        self
    }

    /// Sets the child-scoring variant.
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the reward-crediting rule.
    pub fn with_reward(mut self, reward: RewardMode) -> Self {
        self.reward = reward;
        self
    }

    /// Seeds the engine's random generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(MctsError::InvalidConfiguration(
                "iteration budget must be positive".into(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MctsError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if let ExpansionMode::VisitThreshold {
            rollouts_per_leaf, ..
        } = self.expansion
        {
            if rollouts_per_leaf == 0 {
                return Err(MctsError::InvalidConfiguration(
                    "rollouts per leaf must be positive".into(),
                ));
            }
        }
        Ok(())
    }
}
