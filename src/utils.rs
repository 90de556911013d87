//! Child-scoring math shared by selection and move extraction.

use crate::config::Scoring;
use crate::tree::{NodeId, SearchTree};

/// Classic UCB1 value: `W/N + c * sqrt(2 ln(Np) / N)`.
///
/// An unvisited child scores infinity while exploring, so every move is
/// tried before any is revisited, and negative infinity under pure
/// exploitation (`c = 0`), so extraction never recommends an untried move.
/// Both branches keep the division and `ln(0)` out of reach.
pub fn ucb1_value(score: f64, visits: u64, parent_visits: u64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return if exploration_constant > 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
    }
    let exploitation = score / visits as f64;
    if exploration_constant == 0.0 {
        return exploitation;
    }
    let exploration = (2.0 * (parent_visits.max(1) as f64).ln() / visits as f64).sqrt();
    exploitation + exploration_constant * exploration
}

/// One-smoothed value: `W/(N+1) + c * sqrt(2 ln(Np+1) / (N+1))`.
///
/// The `+1` on both counts tolerates unvisited children with no special
/// cases.
pub fn smoothed_value(score: f64, visits: u64, parent_visits: u64, exploration_constant: f64) -> f64 {
    let n = visits as f64 + 1.0;
    let exploitation = score / n;
    let exploration = (2.0 * ((parent_visits as f64) + 1.0).ln() / n).sqrt();
    exploitation + exploration_constant * exploration
}

/// Scores one child under the configured variant.
pub fn child_score(
    scoring: Scoring,
    score: f64,
    visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
) -> f64 {
    match scoring {
        Scoring::Ucb1 => ucb1_value(score, visits, parent_visits, exploration_constant),
        Scoring::Smoothed => smoothed_value(score, visits, parent_visits, exploration_constant),
    }
}

/// Highest-scoring child of `node`, ties broken by child-list order.
///
/// `exploration_constant = 0` turns this into pure exploitation, used for
/// final move extraction. Returns `None` for a childless node.
pub fn best_child(
    tree: &SearchTree,
    node: NodeId,
    scoring: Scoring,
    exploration_constant: f64,
) -> Option<NodeId> {
    let parent_visits = tree.get(node).visits;
    let mut best: Option<(f64, NodeId)> = None;
    for &child_id in &tree.get(node).children {
        let child = tree.get(child_id);
        let value = child_score(
            scoring,
            child.score,
            child.visits,
            parent_visits,
            exploration_constant,
        );
        // strict comparison keeps the earliest child on ties
        if best.map_or(true, |(best_value, _)| value > best_value) {
            best = Some((value, child_id));
        }
    }
    best.map(|(_, id)| id)
}
