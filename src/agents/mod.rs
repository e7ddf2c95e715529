//! Decision agents.
//!
//! - `agent`: the [`Agent`] trait polled by the orchestrator
//! - `random`: uniformly random legal play
//! - `minimax`: depth-limited minimax with alpha-beta pruning
//! - `evaluator`: static board scoring used by the search
//! - `simulate`: applies a candidate action to a clone
//! - `stats`: search diagnostics

pub mod agent;
pub mod evaluator;
pub mod minimax;
pub mod random;
pub mod simulate;
pub mod stats;

pub use agent::{Agent, PassAgent};
pub use evaluator::{BoardEvaluator, EvaluatorWeights, WIN_SCORE};
pub use minimax::{MinimaxAgent, MinimaxConfig};
pub use random::RandomAgent;
pub use simulate::simulate;
pub use stats::SearchStats;
