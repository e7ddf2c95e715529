//! Game state and the phase machine.
//!
//! ## Phase
//!
//! Fixed cycle `Refresh -> Draw -> Don -> Main -> End`. Leaving `End`
//! wraps to `Refresh`, increments the turn counter and hands the turn to
//! the other player. Phase effects (refresh, draw) are applied by the
//! orchestrator through `rules::transitions`; `advance_phase` only moves
//! the pointer.
//!
//! ## GameState
//!
//! Canonical snapshot: both players' zones, phase pointer, turn counter,
//! action history, open battle window and pending life trigger.
//!
//! Zones are `im` collections and the card registry is shared behind an
//! `Arc`, so `clone()` is cheap and a clone never aliases mutable data of
//! the original.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::RulesConfig;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::battle::BattleWindow;
use crate::cards::{Card, CardId, CardRegistry};
use crate::error::{EngineError, Result};
use crate::rules::GameResult;
use crate::zones::PlayerState;

/// Turn phases in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Refresh,
    Draw,
    Don,
    Main,
    End,
}

impl Phase {
    /// The phase that follows this one.
    #[must_use]
    pub fn next(self) -> Phase {
        match self {
            Phase::Refresh => Phase::Draw,
            Phase::Draw => Phase::Don,
            Phase::Don => Phase::Main,
            Phase::Main => Phase::End,
            Phase::End => Phase::Refresh,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Refresh => "Refresh",
            Phase::Draw => "Draw",
            Phase::Don => "DON!!",
            Phase::Main => "Main",
            Phase::End => "End",
        };
        f.write_str(name)
    }
}

/// A life card with `[Trigger]` waiting for its owner's decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTrigger {
    pub player: PlayerId,
    pub card: CardId,
}

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    cards: Arc<CardRegistry>,

    /// Per-player zones and resources.
    pub players: PlayerMap<PlayerState>,

    /// Player whose turn it is.
    pub active_player: PlayerId,

    pub phase: Phase,

    /// Turn number (starts at 1, counts both players' turns).
    pub turn: u32,

    /// Executed actions in order.
    pub history: Vector<ActionRecord>,

    /// Set while an attack is between declaration and resolution.
    pub battle: Option<BattleWindow>,

    pub pending_trigger: Option<PendingTrigger>,

    pub rules: RulesConfig,

    pub rng: GameRng,

    sequence: u32,
}

impl GameState {
    /// Create a state at the start of turn 1, Refresh phase.
    #[must_use]
    pub fn new(
        cards: Arc<CardRegistry>,
        players: PlayerMap<PlayerState>,
        rules: RulesConfig,
        starting_player: PlayerId,
        rng: GameRng,
    ) -> Self {
        Self {
            cards,
            players,
            active_player: starting_player,
            phase: Phase::Refresh,
            turn: 1,
            history: Vector::new(),
            battle: None,
            pending_trigger: None,
            rules,
            rng,
            sequence: 0,
        }
    }

    // === Cards ===

    /// The shared card registry.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.cards
    }

    /// The shared card registry handle.
    #[must_use]
    pub fn registry_handle(&self) -> Arc<CardRegistry> {
        Arc::clone(&self.cards)
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Look up a card, failing on unknown ids.
    pub fn require_card(&self, id: CardId) -> Result<&Card> {
        self.cards.require(id)
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id]
    }

    /// Owner of a leader or character currently on the field.
    #[must_use]
    pub fn field_owner(&self, card: CardId) -> Option<PlayerId> {
        PlayerId::all().find(|&p| self.players[p].is_on_field(card))
    }

    /// Current power of a leader or character.
    ///
    /// Attached DON!! adds its bonus only during the owner's turn.
    pub fn power_of(&self, owner: PlayerId, card: CardId) -> Result<i32> {
        let player = &self.players[owner];
        if !player.is_on_field(card) {
            return Err(EngineError::CardNotInZone {
                card,
                owner,
                zone: "field",
            });
        }
        let base = self.require_card(card)?.power;
        let bonus = if owner == self.active_player {
            player.attached(card) as i32 * self.rules.don_power_bonus
        } else {
            0
        };
        Ok(base + bonus)
    }

    // === Phase machine ===

    /// Move to the next phase.
    ///
    /// Leaving `End` starts the other player's turn.
    pub fn advance_phase(&mut self) -> Phase {
        self.phase = self.phase.next();
        if self.phase == Phase::Refresh {
            self.turn += 1;
            self.active_player = self.active_player.opponent();
        }
        self.phase
    }

    // === History ===

    /// Append an executed action to the history.
    pub fn record(&mut self, action: Action) {
        let record = ActionRecord::new(action, self.turn, self.phase, self.sequence);
        self.sequence += 1;
        self.history.push_back(record);
    }

    // === Terminal detection ===

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.players.iter().any(|(_, p)| p.defeated)
    }

    /// Outcome once terminal: the opponent of the defeated player wins,
    /// both defeated is a draw.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        let defeated: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|(_, p)| p.defeated)
            .map(|(id, _)| id)
            .collect();
        match defeated.as_slice() {
            [] => None,
            [loser] => Some(GameResult::Winner(loser.opponent())),
            _ => Some(GameResult::Draw),
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result() {
            Some(GameResult::Winner(p)) => Some(p),
            _ => None,
        }
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cards, &other.cards)
            && self.players == other.players
            && self.active_player == other.active_player
            && self.phase == other.phase
            && self.turn == other.turn
            && self.history == other.history
            && self.battle == other.battle
            && self.pending_trigger == other.pending_trigger
            && self.rules == other.rules
            && self.rng == other.rng
            && self.sequence == other.sequence
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Turn {} | {} phase | {} to act",
            self.turn, self.phase, self.active_player
        )?;
        for (id, p) in self.players.iter() {
            write!(
                f,
                "  {id}: life {} | hand {} | deck {} | characters {} | DON!! {}/{} active",
                p.life.len(),
                p.hand.len(),
                p.deck.len(),
                p.characters.len(),
                p.active_don,
                p.don_pool,
            )?;
            if p.defeated {
                write!(f, " | defeated")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
