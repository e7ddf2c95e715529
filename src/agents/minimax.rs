//! Depth-limited minimax agent.
//!
//! ## Search
//!
//! Each ply takes the legal non-pass actions of the position's active
//! player, attacks first, capped at `branching_cap`. Plies alternate
//! between maximizing (the agent) and minimizing, starting with a
//! minimizing ply under the root. Every candidate is simulated on its own
//! clone of the position. Leaves are scored by the [`BoardEvaluator`], or
//! by the terminal score once the game is over. A candidate whose
//! simulation fails is skipped.
//!
//! ## Budgets
//!
//! Optional node and time budgets stop the search early. Unexplored
//! subtrees are then scored statically and the root keeps the best action
//! found so far.
//!
//! ## Defense
//!
//! Defensive hooks do not search: block with the cheapest active blocker
//! and play the first counter in hand.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::battle::Battle;
use crate::cards::{Capability, CardId};
use crate::core::{Action, ActionKind, GameState, Phase, PlayerId};
use crate::rules::legal_actions;

use super::agent::Agent;
use super::evaluator::BoardEvaluator;
use super::simulate::simulate;
use super::stats::SearchStats;

/// Minimax search parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimaxConfig {
    /// Plies searched below the current position.
    pub max_depth: u32,

    /// Candidates explored per ply.
    pub branching_cap: usize,

    /// Prune with alpha-beta bounds.
    pub alpha_beta: bool,

    /// Stop expanding after this many nodes.
    pub node_budget: Option<u64>,

    /// Stop expanding after this many milliseconds.
    pub time_budget_ms: Option<u64>,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            branching_cap: 5,
            alpha_beta: true,
            node_budget: None,
            time_budget_ms: None,
        }
    }
}

impl MinimaxConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_branching_cap(mut self, cap: usize) -> Self {
        self.branching_cap = cap;
        self
    }

    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }

    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = Some(ms);
        self
    }
}

/// Agent choosing Main-phase actions by minimax search.
#[derive(Clone, Debug)]
pub struct MinimaxAgent {
    player: PlayerId,
    name: String,
    config: MinimaxConfig,
    evaluator: BoardEvaluator,
    stats: SearchStats,
    started: Option<Instant>,
}

impl MinimaxAgent {
    #[must_use]
    pub fn new(player: PlayerId, config: MinimaxConfig) -> Self {
        Self {
            player,
            name: format!("minimax-{}", player.0 + 1),
            config,
            evaluator: BoardEvaluator::default(),
            stats: SearchStats::default(),
            started: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: BoardEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    #[must_use]
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Statistics of the most recent search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Best action for the agent in `state` with its score, or `None` when
    /// no candidate could be simulated.
    pub fn search(&mut self, state: &GameState) -> Option<(Action, f64)> {
        self.stats.reset();
        self.started = Some(Instant::now());

        let mut best: Option<(Action, f64)> = None;
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;

        for action in self.candidates(state) {
            let Some(next) = simulate(state, &action) else {
                self.stats.failed_simulations += 1;
                continue;
            };
            let score = self.minimax(&next, 1, false, alpha, beta);
            if best.as_ref().map_or(true, |(_, s)| score > *s) {
                best = Some((action, score));
            }
            if self.config.alpha_beta {
                alpha = alpha.max(score);
            }
            if self.stats.budget_exhausted {
                break;
            }
        }

        self.stats.elapsed_us = self.elapsed_us();
        self.started = None;
        if let Some((action, score)) = &best {
            debug!(
                agent = %self.name,
                %action,
                score,
                nodes = self.stats.nodes_evaluated,
                pruned = self.stats.nodes_pruned,
                "search complete"
            );
        }
        best
    }

    fn minimax(&mut self, state: &GameState, depth: u32, maximizing: bool, mut alpha: f64, mut beta: f64) -> f64 {
        self.stats.nodes_evaluated += 1;
        trace!(depth, maximizing, turn = state.turn, phase = %state.phase, "node");

        if state.is_terminal() {
            return self.evaluator.terminal_score(state, self.player);
        }
        if depth >= self.config.max_depth || self.out_of_budget() {
            return self.evaluator.evaluate(state, self.player);
        }

        let candidates = self.candidates(state);
        let mut best: Option<f64> = None;
        for action in candidates {
            let Some(next) = simulate(state, &action) else {
                self.stats.failed_simulations += 1;
                continue;
            };
            let score = self.minimax(&next, depth + 1, !maximizing, alpha, beta);
            best = Some(match best {
                None => score,
                Some(b) if maximizing => b.max(score),
                Some(b) => b.min(score),
            });

            if self.config.alpha_beta {
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
                if beta <= alpha {
                    self.stats.nodes_pruned += 1;
                    break;
                }
            }
        }

        // No playable candidate: the position stands as it is.
        best.unwrap_or_else(|| self.evaluator.evaluate(state, self.player))
    }

    /// Legal non-pass actions of the active player, attacks first, capped.
    fn candidates(&self, state: &GameState) -> Vec<Action> {
        let mut actions: Vec<Action> = legal_actions(state, state.active_player)
            .into_iter()
            .filter(|a| !a.is_pass() && a.kind() != ActionKind::Mulligan)
            .collect();
        actions.sort_by_key(|a| a.kind() != ActionKind::Attack);
        actions.truncate(self.config.branching_cap);
        actions
    }

    fn out_of_budget(&mut self) -> bool {
        if self.stats.budget_exhausted {
            return true;
        }
        let nodes_spent = self
            .config
            .node_budget
            .is_some_and(|budget| self.stats.nodes_evaluated >= budget);
        let time_spent = self
            .config
            .time_budget_ms
            .is_some_and(|ms| self.elapsed_us() >= ms.saturating_mul(1000));
        if nodes_spent || time_spent {
            self.stats.budget_exhausted = true;
        }
        self.stats.budget_exhausted
    }

    fn elapsed_us(&self) -> u64 {
        self.started
            .map_or(0, |t| u64::try_from(t.elapsed().as_micros()).unwrap_or(u64::MAX))
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> PlayerId {
        self.player
    }

    fn get_action(&mut self, state: &GameState) -> Option<Action> {
        if state.phase != Phase::Main {
            return None;
        }
        self.search(state).map(|(action, _)| action)
    }

    fn get_defensive_blocker(&mut self, state: &GameState, _battle: &Battle) -> Option<CardId> {
        state
            .player(self.player)
            .characters
            .iter()
            .filter(|fc| fc.is_active())
            .filter_map(|fc| state.card(fc.card))
            .filter(|c| c.has_capability(Capability::Blocker))
            .min_by_key(|c| c.cost)
            .map(|c| c.id)
    }

    fn get_defensive_counters(&mut self, state: &GameState, _battle: &Battle) -> Vec<CardId> {
        state
            .player(self.player)
            .hand
            .iter()
            .copied()
            .find(|&id| state.card(id).is_some_and(|c| c.counter_value().is_some()))
            .into_iter()
            .collect()
    }

    /// Resolve the trigger only if the evaluator prefers the result.
    fn use_trigger(&mut self, state: &GameState, card: CardId) -> bool {
        let score = |action: Action| {
            simulate(state, &action).map(|next| self.evaluator.score(&next, self.player))
        };
        let used = score(Action::UseTrigger { player: self.player, card });
        let declined = score(Action::DeclineTrigger { player: self.player, card });
        match (used, declined) {
            (Some(u), Some(d)) => u > d,
            (Some(_), None) => true,
            _ => false,
        }
    }
}
