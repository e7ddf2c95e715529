//! Turn orchestration.
//!
//! [`Game`] owns the live state and one agent per seat. Each turn runs the
//! phase cycle: Refresh and Draw apply automatically, the active agent
//! attaches DON!! until it returns `None`, then plays Main-phase actions
//! until a pass executes, and End hands the turn over.
//!
//! Every submitted action is validated first. A rejected action is logged
//! and the agent polled again; too many consecutive rejections end the
//! game with [`EngineError::ProtocolViolation`]. Attacks run through the
//! interactive battle flow so the defending agent can block and counter.
//! A life trigger revealed by a hit is offered to its owner right after
//! the battle.

use tracing::{debug, info, warn};

use crate::agents::Agent;
use crate::battle::run_interactive;
use crate::core::{Action, GameConfig, GameState, Phase, PlayerId, PlayerMap};
use crate::error::{EngineError, Result, RuleViolation};
use crate::rules::{self, transitions, validate, GameResult};

use super::setup::GameSetup;

/// What happened to a submitted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Applied,
    Rejected(RuleViolation),
}

impl Submission {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Submission::Applied)
    }
}

/// A game in progress: live state plus both agents.
pub struct Game {
    state: GameState,
    agents: PlayerMap<Box<dyn Agent>>,
    config: GameConfig,
    started: bool,
}

impl Game {
    pub fn new(state: GameState, first: Box<dyn Agent>, second: Box<dyn Agent>, config: GameConfig) -> Self {
        Self {
            state,
            agents: PlayerMap::from_pair(first, second),
            config,
            started: false,
        }
    }

    /// Build the initial state from `setup` and seat the agents.
    pub fn from_setup(setup: GameSetup, first: Box<dyn Agent>, second: Box<dyn Agent>) -> Result<Self> {
        let config = setup.config().clone();
        let state = setup.build()?;
        Ok(Self::new(state, first, second, config))
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn agent(&self, player: PlayerId) -> &dyn Agent {
        self.agents[player].as_ref()
    }

    /// Offer mulligans, close the mulligan window and run the starting
    /// player's first Refresh. Idempotent.
    pub fn begin(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        for player in PlayerId::all() {
            let available = self.state.player(player).mulligan_available;
            if available && self.agents[player].wants_mulligan(&self.state) {
                rules::apply(&mut self.state, &Action::Mulligan { player })?;
                debug!(%player, "mulligan");
            }
        }
        for (_, p) in self.state.players.iter_mut() {
            p.mulligan_available = false;
        }

        let starting = self.state.active_player;
        transitions::refresh(&mut self.state, starting);
        info!(
            starting_player = %starting,
            first = self.agents[PlayerId::ONE].name(),
            second = self.agents[PlayerId::TWO].name(),
            "game started"
        );
        Ok(())
    }

    /// Play until the game ends, the turn cap is hit, or an agent breaks
    /// protocol.
    pub fn run(&mut self) -> Result<GameResult> {
        self.begin()?;
        loop {
            if let Some(result) = self.state.result() {
                info!(turn = self.state.turn, %result, "game over");
                return Ok(result);
            }
            if self.state.turn > self.config.max_turns {
                info!(max_turns = self.config.max_turns, "turn cap reached, game drawn");
                return Ok(GameResult::Draw);
            }
            self.play_turn()?;
        }
    }

    /// Run the active player's turn from the current phase through End.
    ///
    /// Stops early if the game ends mid-turn.
    pub fn play_turn(&mut self) -> Result<()> {
        self.begin()?;
        let player = self.state.active_player;
        while !self.state.is_terminal() {
            match self.state.phase {
                Phase::Refresh | Phase::Draw => {
                    transitions::advance(&mut self.state);
                }
                Phase::Don => {
                    self.don_phase(player)?;
                    transitions::advance(&mut self.state);
                }
                Phase::Main => self.main_phase(player)?,
                Phase::End => {
                    // Hands the turn over and runs the opponent's Refresh.
                    transitions::advance(&mut self.state);
                    break;
                }
            }
        }
        Ok(())
    }

    fn don_phase(&mut self, player: PlayerId) -> Result<()> {
        let mut rejections = 0;
        while self.state.phase == Phase::Don {
            let Some(action) = self.agents[player].get_don_action(&self.state) else {
                break;
            };
            self.handle(player, action, &mut rejections)?;
        }
        Ok(())
    }

    fn main_phase(&mut self, player: PlayerId) -> Result<()> {
        let mut rejections = 0;
        while self.state.phase == Phase::Main && !self.state.is_terminal() {
            let action = self.agents[player]
                .get_action(&self.state)
                .unwrap_or_else(|| Action::pass(player));
            self.handle(player, action, &mut rejections)?;
        }
        Ok(())
    }

    fn handle(&mut self, player: PlayerId, action: Action, rejections: &mut u32) -> Result<()> {
        match self.submit(action)? {
            Submission::Applied => *rejections = 0,
            Submission::Rejected(_) => {
                *rejections += 1;
                if *rejections >= self.config.max_consecutive_rejections {
                    return Err(EngineError::ProtocolViolation {
                        player,
                        rejections: *rejections,
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate and execute one action.
    ///
    /// Rule violations come back as [`Submission::Rejected`] and leave the
    /// state untouched; only invariant failures are errors.
    pub fn submit(&mut self, action: Action) -> Result<Submission> {
        if let Err(reason) = validate(&self.state, &action) {
            warn!(
                player = %action.player(),
                %action,
                %reason,
                "action rejected"
            );
            return Ok(Submission::Rejected(reason));
        }

        match action {
            Action::Attack { attacker, target, .. } => {
                let defender = action.player().opponent();
                run_interactive(&mut self.state, attacker, target, self.agents[defender].as_mut())?;
                self.offer_trigger()?;
            }
            _ => rules::apply(&mut self.state, &action)?,
        }
        Ok(Submission::Applied)
    }

    fn offer_trigger(&mut self) -> Result<()> {
        let Some(pending) = self.state.pending_trigger else {
            return Ok(());
        };
        let player = pending.player;
        let card = pending.card;
        let action = if self.agents[player].use_trigger(&self.state, card) {
            Action::UseTrigger { player, card }
        } else {
            Action::DeclineTrigger { player, card }
        };
        debug!(%action, "life trigger");
        rules::apply(&mut self.state, &action)
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("first", &self.agents[PlayerId::ONE].name())
            .field("second", &self.agents[PlayerId::TWO].name())
            .field("started", &self.started)
            .finish()
    }
}
