//! Game configuration types.
//!
//! - `RulesConfig`: numeric constants of the rule set (zone caps, DON!!
//!   economy, deck and hand sizes).
//! - `GameConfig`: how a single game is run (starting player, seed,
//!   orchestrator safety bounds) plus the rules it is played under.
//!
//! Both are plain serde values with `Default` matching the standard game.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Numeric constants of the rule set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Maximum characters on a player's field.
    pub max_characters: usize,

    /// Lifetime cap on a player's DON!! pool.
    pub don_cap: u32,

    /// DON!! moved from the DON!! deck at each Refresh.
    pub don_per_refresh: u32,

    /// Size of each player's DON!! deck.
    pub don_deck_size: u32,

    /// Cards dealt as the opening hand.
    pub opening_hand: usize,

    /// Required main deck size.
    pub deck_size: usize,

    /// Power added per attached DON!! on the owner's turn.
    pub don_power_bonus: i32,

    /// Cards drawn in the Draw phase.
    pub draw_per_turn: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_characters: 5,
            don_cap: 10,
            don_per_refresh: 2,
            don_deck_size: 10,
            opening_hand: 5,
            deck_size: 50,
            don_power_bonus: 1000,
            draw_per_turn: 1,
        }
    }
}

impl RulesConfig {
    /// Set the character zone cap.
    #[must_use]
    pub fn with_max_characters(mut self, max: usize) -> Self {
        self.max_characters = max;
        self
    }

    /// Set the required deck size.
    ///
    /// Smaller decks are convenient for tests and benchmarks.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, size: usize) -> Self {
        self.opening_hand = size;
        self
    }

    /// Set the DON!! gained per refresh.
    #[must_use]
    pub fn with_don_per_refresh(mut self, amount: u32) -> Self {
        self.don_per_refresh = amount;
        self
    }

    /// Set the power bonus per attached DON!!.
    #[must_use]
    pub fn with_don_power_bonus(mut self, bonus: i32) -> Self {
        self.don_power_bonus = bonus;
        self
    }
}

/// How a single game is run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rules the game is played under.
    pub rules: RulesConfig,

    /// Player taking the first turn.
    pub starting_player: PlayerId,

    /// Seed for shuffles and mulligans.
    /// Same seed produces the same deal.
    pub seed: u64,

    /// Consecutive rejected actions tolerated from one agent before the
    /// game aborts with a protocol violation.
    pub max_consecutive_rejections: u32,

    /// Turn limit after which the game ends as a draw.
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            starting_player: PlayerId::ONE,
            seed: 42,
            max_consecutive_rejections: 64,
            max_turns: 400,
        }
    }
}

impl GameConfig {
    /// Set the rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Set the starting player.
    #[must_use]
    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = player;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the rejection bound.
    #[must_use]
    pub fn with_max_consecutive_rejections(mut self, max: u32) -> Self {
        self.max_consecutive_rejections = max;
        self
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_max_turns(mut self, max: u32) -> Self {
        self.max_turns = max;
        self
    }
}
