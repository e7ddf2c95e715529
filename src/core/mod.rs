//! Core engine types: players, state, actions, RNG, configuration.
//!
//! Everything else in the crate is built on these.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, RulesConfig};
pub use action::{Action, ActionKind, ActionRecord};
pub use state::{GameState, PendingTrigger, Phase};
