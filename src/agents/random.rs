//! Baseline agent that plays uniformly random legal actions.
//!
//! In Main it acts with probability `action_probability / (1 + 0.2 * n)`,
//! where `n` counts the actions it already took this turn, and passes
//! otherwise. It defends by coin flip: half the time it blocks with a
//! uniformly chosen active blocker, and independently half the time it
//! plays one to three counters from hand.

use crate::battle::Battle;
use crate::cards::{Capability, CardId};
use crate::core::{Action, GameRng, GameState, Phase, PlayerId};
use crate::rules::legal_actions;

use super::agent::Agent;

/// Random legal-move agent.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    player: PlayerId,
    name: String,
    action_probability: f64,
    actions_taken: u32,
    last_turn: u32,
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(player: PlayerId, seed: u64) -> Self {
        Self {
            player,
            name: format!("random-{}", player.0 + 1),
            action_probability: 0.7,
            actions_taken: 0,
            last_turn: 0,
            rng: GameRng::new(seed),
        }
    }

    /// Base chance of acting instead of passing.
    pub fn with_action_probability(mut self, probability: f64) -> Self {
        self.action_probability = probability;
        self
    }

    #[must_use]
    pub fn action_probability(&self) -> f64 {
        self.action_probability
    }

    /// Actions taken so far this turn.
    #[must_use]
    pub fn actions_taken(&self) -> u32 {
        self.actions_taken
    }

    fn act_chance(&self) -> f64 {
        self.action_probability / (1.0 + f64::from(self.actions_taken) * 0.2)
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> PlayerId {
        self.player
    }

    fn get_action(&mut self, state: &GameState) -> Option<Action> {
        if state.turn != self.last_turn {
            self.last_turn = state.turn;
            self.actions_taken = 0;
        }
        if state.phase != Phase::Main {
            return None;
        }

        let candidates: Vec<Action> = legal_actions(state, self.player)
            .into_iter()
            .filter(|a| !a.is_pass() && !matches!(a, Action::Mulligan { .. }))
            .collect();
        if candidates.is_empty() || !self.rng.gen_bool(self.act_chance()) {
            return None;
        }

        let choice = self.rng.choose(&candidates).cloned();
        if choice.is_some() {
            self.actions_taken += 1;
        }
        choice
    }

    fn get_defensive_blocker(&mut self, state: &GameState, _battle: &Battle) -> Option<CardId> {
        let blockers: Vec<CardId> = state
            .player(self.player)
            .characters
            .iter()
            .filter(|fc| fc.is_active())
            .filter(|fc| {
                state
                    .card(fc.card)
                    .is_some_and(|c| c.has_capability(Capability::Blocker))
            })
            .map(|fc| fc.card)
            .collect();
        if blockers.is_empty() || !self.rng.gen_bool(0.5) {
            return None;
        }
        self.rng.choose(&blockers).copied()
    }

    fn get_defensive_counters(&mut self, state: &GameState, _battle: &Battle) -> Vec<CardId> {
        let counters: Vec<CardId> = state
            .player(self.player)
            .hand
            .iter()
            .copied()
            .filter(|&id| state.card(id).is_some_and(|c| c.counter_value().is_some()))
            .collect();
        if counters.is_empty() || !self.rng.gen_bool(0.5) {
            return Vec::new();
        }
        let amount = self.rng.gen_range_inclusive(1..=counters.len().min(3));
        self.rng.sample(&counters, amount)
    }

    fn use_trigger(&mut self, _state: &GameState, _card: CardId) -> bool {
        self.rng.gen_bool(0.5)
    }
}
