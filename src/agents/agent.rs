//! The decision-agent seam.
//!
//! The orchestrator polls the active player's agent for turn actions and
//! the other player's agent for defensive choices. Only `get_action` is
//! required; every hook has a do-nothing default.

use crate::battle::Battle;
use crate::cards::CardId;
use crate::core::{Action, GameState, PlayerId};

/// A player's decision maker.
pub trait Agent {
    /// Name for logs.
    fn name(&self) -> &str;

    /// Seat this agent plays.
    fn player(&self) -> PlayerId;

    /// Next Main-phase action. `None` passes the phase.
    fn get_action(&mut self, state: &GameState) -> Option<Action>;

    /// Next DON!!-phase action. `None` ends the phase.
    fn get_don_action(&mut self, _state: &GameState) -> Option<Action> {
        None
    }

    /// Blocker to redirect the current attack to, if any.
    fn get_defensive_blocker(&mut self, _state: &GameState, _battle: &Battle) -> Option<CardId> {
        None
    }

    /// Counter cards to play from hand in the Counter step.
    fn get_defensive_counters(&mut self, _state: &GameState, _battle: &Battle) -> Vec<CardId> {
        Vec::new()
    }

    /// Whether to resolve a `[Trigger]` life card that just reached hand.
    fn use_trigger(&mut self, _state: &GameState, _card: CardId) -> bool {
        false
    }

    /// Whether to redraw the opening hand.
    fn wants_mulligan(&mut self, _state: &GameState) -> bool {
        false
    }
}

/// Agent that always passes and never defends.
#[derive(Clone, Debug)]
pub struct PassAgent {
    player: PlayerId,
}

impl PassAgent {
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }
}

impl Agent for PassAgent {
    fn name(&self) -> &str {
        "pass"
    }

    fn player(&self) -> PlayerId {
        self.player
    }

    fn get_action(&mut self, _state: &GameState) -> Option<Action> {
        None
    }
}
