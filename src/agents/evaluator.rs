//! Static board evaluation.
//!
//! Scores a position from one player's point of view as a weighted sum of
//! differentials between that player and the opponent. Positive favors the
//! perspective player. The score is antisymmetric: swapping perspective
//! negates it.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};
use crate::rules::GameResult;
use crate::zones::{CardStatus, PlayerState};

/// Score of a won terminal position.
pub const WIN_SCORE: f64 = 10_000.0;

/// Tunable evaluation weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorWeights {
    /// Per life card of difference.
    pub life: f64,
    /// Applied for each side sitting at one life or fewer.
    pub low_life: f64,
    pub character: f64,
    /// Per point of printed character power.
    pub power: f64,
    pub don_pool: f64,
    pub hand: f64,
    pub deck: f64,
    /// Applied for each rested leader, against its owner.
    pub leader_rested: f64,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        Self {
            life: 1000.0,
            low_life: 500.0,
            character: 100.0,
            power: 0.01,
            don_pool: 50.0,
            hand: 30.0,
            deck: 5.0,
            leader_rested: 200.0,
        }
    }
}

impl EvaluatorWeights {
    pub fn with_life(mut self, weight: f64) -> Self {
        self.life = weight;
        self
    }

    pub fn with_character(mut self, weight: f64) -> Self {
        self.character = weight;
        self
    }

    pub fn with_hand(mut self, weight: f64) -> Self {
        self.hand = weight;
        self
    }
}

/// Weighted board evaluator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardEvaluator {
    pub weights: EvaluatorWeights,
}

impl BoardEvaluator {
    #[must_use]
    pub fn new(weights: EvaluatorWeights) -> Self {
        Self { weights }
    }

    /// Heuristic score of a non-terminal position for `perspective`.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, perspective: PlayerId) -> f64 {
        let me = state.player(perspective);
        let them = state.player(perspective.opponent());
        self.side_score(state, me) - self.side_score(state, them)
    }

    /// Score of a finished game: a win, a loss, or zero for a draw.
    #[must_use]
    pub fn terminal_score(&self, state: &GameState, perspective: PlayerId) -> f64 {
        match state.result() {
            Some(GameResult::Winner(winner)) if winner == perspective => WIN_SCORE,
            Some(GameResult::Winner(_)) => -WIN_SCORE,
            Some(GameResult::Draw) | None => 0.0,
        }
    }

    /// Terminal score when the game is over, heuristic otherwise.
    #[must_use]
    pub fn score(&self, state: &GameState, perspective: PlayerId) -> f64 {
        if state.is_terminal() {
            self.terminal_score(state, perspective)
        } else {
            self.evaluate(state, perspective)
        }
    }

    // Contribution of one side; the evaluation is the difference of two.
    fn side_score(&self, state: &GameState, side: &PlayerState) -> f64 {
        let w = &self.weights;
        let mut score = side.life.len() as f64 * w.life;
        if side.life.len() <= 1 {
            score -= w.low_life;
        }

        let power: i32 = side
            .characters
            .iter()
            .filter_map(|fc| state.card(fc.card))
            .map(|c| c.power)
            .sum();
        score += side.characters.len() as f64 * w.character;
        score += f64::from(power) * w.power;

        score += f64::from(side.don_pool) * w.don_pool;
        score += side.hand.len() as f64 * w.hand;
        score += side.deck.len() as f64 * w.deck;

        if side.leader.status == CardStatus::Rested {
            score -= w.leader_rested;
        }
        score
    }
}
