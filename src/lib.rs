//! # connectk-mcts
//!
//! A Monte Carlo Tree Search move engine for generalized m,n,k connect
//! games: an n-by-n grid where a move places the current player's mark on
//! an empty cell and a player wins with k marks in an unbroken row, column
//! or diagonal.
//!
//! Given a position and a fixed iteration budget, the engine returns one
//! legal move approximating the game-theoretically strongest choice. It
//! grows an asymmetric tree guided by random rollouts, balancing known-good
//! moves against under-explored ones with a UCB-style score, and supports
//! two tree-growth policies (one child per visit, or all-at-once expansion
//! gated on a visit threshold).
//!
//! ## Basic usage
//!
//! ```
//! use connectk_mcts::{Board, Mcts, MctsConfig};
//!
//! fn main() -> Result<(), connectk_mcts::MctsError> {
//!     // A 3x3 board requiring a run of 3, X to move.
//!     let board = Board::new(3, 3)?;
//!
//!     let config = MctsConfig::incremental()
//!         .with_max_iterations(200)
//!         .with_seed(7);
//!
//!     let mut mcts = Mcts::new(board, config)?;
//!     let coord = mcts.search()?;
//!     println!("recommended move: {coord}");
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! Each budget iteration runs the four MCTS phases:
//!
//! 1. **Selection**: descend the partially built tree via the scoring rule.
//! 2. **Expansion**: attach one or more unexplored children to the node
//!    where the walk stopped.
//! 3. **Simulation**: play uniformly random moves from there to a terminal
//!    board.
//! 4. **Backpropagation**: credit the outcome along the walked path back to
//!    the root.
//!
//! After the budget is exhausted, the root's best child under pure
//! exploitation identifies the recommended move.
//!
//! Each `Mcts` instance decides one move; the surrounding game loop applies
//! the move and builds a fresh engine for the next position.

pub mod board;
pub mod config;
pub mod mcts;
pub mod stats;
pub mod tree;
pub mod utils;

pub use board::{Board, Coord, Player};
pub use config::{ExpansionMode, MctsConfig, RewardMode, Scoring};
pub use mcts::Mcts;
pub use stats::SearchStatistics;
pub use tree::{NodeId, SearchNode, SearchTree};

/// Error types for the engine.
#[derive(thiserror::Error, Debug)]
pub enum MctsError {
    /// A move targeted an occupied or out-of-range cell.
    #[error("illegal move at {0}: cell is not empty")]
    IllegalMove(board::Coord),

    /// No legal moves are available from the current state.
    #[error("no legal moves available from current state")]
    NoLegalMoves,

    /// The configuration cannot be run as given.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, MctsError>;
