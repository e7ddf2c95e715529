//! Running a game.
//!
//! - `setup`: deck checks and the opening deal
//! - `orchestrator`: the turn loop polling both agents

pub mod orchestrator;
pub mod setup;

pub use orchestrator::{Game, Submission};
pub use setup::{DeckList, GameSetup};
