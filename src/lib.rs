//! # deckhand
//!
//! A two-player, turn-based trading card game engine with search-based
//! agents.
//!
//! ## Design Principles
//!
//! 1. **One mutation path**: every change to a [`GameState`] goes through
//!    the named transitions in `rules::transitions` or the battle protocol.
//!    Agents and the orchestrator never edit zones directly.
//!
//! 2. **Validate, then apply**: [`validate`] is pure and explains every
//!    rejection with a [`RuleViolation`]. Rejections are recoverable;
//!    [`EngineError`] is reserved for broken invariants.
//!
//! 3. **Cheap, isolated clones**: zones are `im` persistent collections,
//!    so lookahead clones the whole state in O(1) and mutates its copy
//!    without touching the live game.
//!
//! ## Architecture
//!
//! - **Phase machine**: Refresh, Draw, DON!!, Main, End, then the other
//!   player's turn. Refresh and Draw apply automatically on entry.
//!
//! - **Battle protocol**: Declared, Blocker, Counter, Resolve, Complete.
//!   The defender blocks and counters between steps; the attacker wins
//!   ties.
//!
//! - **Agents**: polled for Main and DON!! actions and for defensive
//!   choices. Random and minimax agents are included.
//!
//! ## Modules
//!
//! - `core`: player ids, RNG, configuration, actions, game state
//! - `cards`: card definitions, capability sets, registry
//! - `zones`: per-player zones and resources
//! - `rules`: validator, legal actions, state transitions, game result
//! - `battle`: battle protocol and interactive battle flow
//! - `game`: setup and the turn orchestrator
//! - `agents`: agent trait, random and minimax agents, board evaluator
//! - `error`: rule violations and engine errors

pub mod agents;
pub mod battle;
pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod rules;
pub mod zones;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, GameConfig, GameRng, GameRngState, GameState, PendingTrigger, Phase,
    PlayerId, PlayerMap, RulesConfig, PLAYER_COUNT,
};

pub use crate::cards::{BracketOracle, Capability, CapabilityOracle, CapabilitySet, Card, CardId, CardKind, CardRegistry};

pub use crate::zones::{CardStatus, FieldCard, PlayerState, Zone};

pub use crate::rules::{apply, legal_actions, validate, GameResult, LifeDamage, RefreshOutcome};

pub use crate::battle::{
    run_interactive, Battle, BattleOutcome, BattlePhase, BattleResult, BattleWindow, ModificationSource,
    PowerModification, Side,
};

pub use crate::game::{DeckList, Game, GameSetup, Submission};

pub use crate::agents::{
    simulate, Agent, BoardEvaluator, EvaluatorWeights, MinimaxAgent, MinimaxConfig, PassAgent, RandomAgent,
    SearchStats,
};

pub use crate::error::{EngineError, RuleViolation};
