//! Battle protocol: the state machine for a single attack.
//!
//! ```text
//! Declared -> Blocker -> Counter -> Resolve -> Complete
//! ```
//!
//! - `initiate` snapshots both sides' power and enters `Blocker`.
//! - `apply_blocker` (Blocker step, once) redirects the attack.
//! - `apply_counter` (Counter step, repeatable) adds a tagged power
//!   modification for the defender.
//! - `resolve` (Resolve step) compares final powers and applies the result.
//!
//! While a battle is open the state carries its [`BattleWindow`], which
//! the validator consults for defensive actions. Steps taken out of order
//! or on unknown cards are invariant violations and fail with
//! [`EngineError`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{GameState, PlayerId};
use crate::error::{EngineError, Result, RuleViolation};
use crate::rules::transitions::{self, LifeDamage};

/// Battle steps in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    Declared,
    Blocker,
    Counter,
    Resolve,
    Complete,
}

/// Which side of the battle a modification applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

/// Where a power modification came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModificationSource {
    Counter(CardId),
}

/// A tagged power change applied at resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerModification {
    pub side: Side,
    pub source: ModificationSource,
    pub amount: i32,
}

/// The slice of an open battle the validator needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleWindow {
    pub attacker: CardId,
    pub attacker_owner: PlayerId,
    pub target: CardId,
    pub step: BattlePhase,
    pub blocker_used: bool,
}

impl BattleWindow {
    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.attacker_owner.opponent()
    }
}

/// Whether the attack got through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    AttackSucceeded,
    DefenseSucceeded,
}

/// What resolution did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub attacker_power: i32,
    pub defender_power: i32,
    /// Final target after any blocker redirect.
    pub target: CardId,
    /// Set when a leader was hit.
    pub life_damage: Option<LifeDamage>,
    /// Set when a character was K.O.'d.
    pub knocked_out: Option<CardId>,
}

impl BattleResult {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome == BattleOutcome::AttackSucceeded
    }

    /// Life cards taken by the hit.
    #[must_use]
    pub fn damage_dealt(&self) -> u32 {
        match self.life_damage {
            Some(LifeDamage::LifeLost(_)) => 1,
            _ => 0,
        }
    }
}

/// One attack from declaration to resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Battle {
    attacker: CardId,
    attacker_owner: PlayerId,
    attacker_is_leader: bool,
    original_target: CardId,
    target: CardId,
    attacker_power: i32,
    defender_power: i32,
    modifications: SmallVec<[PowerModification; 4]>,
    blocker: Option<CardId>,
    counters: SmallVec<[CardId; 4]>,
    phase: BattlePhase,
    result: Option<BattleResult>,
}

impl Battle {
    /// Declare an attack by the active player and enter the Blocker step.
    ///
    /// Power snapshots include attached DON!! for the attacking side only.
    /// Fails if either card is not on the expected field.
    pub fn initiate(state: &mut GameState, attacker: CardId, target: CardId) -> Result<Self> {
        let attacker_owner = state.active_player;
        let defender = attacker_owner.opponent();
        let attacker_power = state.power_of(attacker_owner, attacker)?;
        let defender_power = state.power_of(defender, target)?;

        let mut battle = Self {
            attacker,
            attacker_owner,
            attacker_is_leader: state.player(attacker_owner).is_leader(attacker),
            original_target: target,
            target,
            attacker_power,
            defender_power,
            modifications: SmallVec::new(),
            blocker: None,
            counters: SmallVec::new(),
            phase: BattlePhase::Declared,
            result: None,
        };
        battle.enter(state, BattlePhase::Blocker);
        Ok(battle)
    }

    fn enter(&mut self, state: &mut GameState, phase: BattlePhase) {
        self.phase = phase;
        state.battle = match phase {
            BattlePhase::Complete => None,
            _ => Some(self.window()),
        };
    }

    fn expect(&self, expected: BattlePhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::BattleStep {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Redirect the attack to an active character of the defender.
    ///
    /// Defender power becomes the blocker's base power and the blocker
    /// is rested.
    pub fn apply_blocker(&mut self, state: &mut GameState, blocker: CardId) -> Result<()> {
        self.expect(BattlePhase::Blocker)?;
        if self.blocker.is_some() {
            return Err(EngineError::BlockerReused);
        }
        let defender = self.defender();
        let fc = state
            .player(defender)
            .character(blocker)
            .ok_or(EngineError::CardNotInZone {
                card: blocker,
                owner: defender,
                zone: "character area",
            })?;
        if !fc.is_active() {
            return Err(EngineError::BlockerNotActive(blocker));
        }

        self.defender_power = state.require_card(blocker)?.power;
        self.target = blocker;
        self.blocker = Some(blocker);
        transitions::rest(state, defender, blocker)?;
        self.enter(state, BattlePhase::Blocker);
        Ok(())
    }

    /// Move to the next step. Resolution happens only through `resolve`.
    pub fn advance(&mut self, state: &mut GameState) -> Result<BattlePhase> {
        let next = match self.phase {
            BattlePhase::Declared => BattlePhase::Blocker,
            BattlePhase::Blocker => BattlePhase::Counter,
            BattlePhase::Counter => BattlePhase::Resolve,
            BattlePhase::Resolve | BattlePhase::Complete => {
                return Err(EngineError::BattleStep {
                    expected: BattlePhase::Counter,
                    actual: self.phase,
                })
            }
        };
        self.enter(state, next);
        Ok(next)
    }

    /// Discard a counter card from the defender's hand for its bonus.
    ///
    /// Returns the power added.
    pub fn apply_counter(&mut self, state: &mut GameState, card: CardId) -> Result<i32> {
        self.expect(BattlePhase::Counter)?;
        let defender = self.defender();
        let amount = state
            .require_card(card)?
            .counter_value()
            .ok_or(RuleViolation::NoCounter(card))?;

        let p = state.player_mut(defender);
        if !p.remove_from_hand(card) {
            return Err(EngineError::CardNotInZone {
                card,
                owner: defender,
                zone: "hand",
            });
        }
        p.trash.push_back(card);

        self.modifications.push(PowerModification {
            side: Side::Defender,
            source: ModificationSource::Counter(card),
            amount,
        });
        self.counters.push(card);
        Ok(amount)
    }

    /// Compare final powers and apply the outcome.
    ///
    /// The attack succeeds when attacker power is at least defender power.
    /// A hit on a leader takes one life card (or defeats at zero life); a
    /// hit on a character K.O.s it. A non-leader attacker is rested either
    /// way.
    pub fn resolve(&mut self, state: &mut GameState) -> Result<BattleResult> {
        self.expect(BattlePhase::Resolve)?;
        let defender = self.defender();
        let attacker_power = self.final_power(Side::Attacker);
        let defender_power = self.final_power(Side::Defender);
        let succeeded = attacker_power >= defender_power;

        let mut life_damage = None;
        let mut knocked_out = None;
        if succeeded {
            if state.player(defender).is_leader(self.target) {
                life_damage = Some(transitions::take_life_damage(state, defender));
            } else {
                transitions::ko_character(state, defender, self.target)?;
                knocked_out = Some(self.target);
            }
        }
        if !self.attacker_is_leader {
            transitions::rest(state, self.attacker_owner, self.attacker)?;
        }

        let result = BattleResult {
            outcome: if succeeded {
                BattleOutcome::AttackSucceeded
            } else {
                BattleOutcome::DefenseSucceeded
            },
            attacker_power,
            defender_power,
            target: self.target,
            life_damage,
            knocked_out,
        };
        self.result = Some(result);
        self.enter(state, BattlePhase::Complete);
        Ok(result)
    }

    /// Resolve with no blocker and no counters.
    pub fn run_undefended(state: &mut GameState, attacker: CardId, target: CardId) -> Result<BattleResult> {
        let mut battle = Self::initiate(state, attacker, target)?;
        battle.advance(state)?;
        battle.advance(state)?;
        battle.resolve(state)
    }

    /// Snapshot plus the side's modifications, floored at zero.
    #[must_use]
    pub fn final_power(&self, side: Side) -> i32 {
        let base = match side {
            Side::Attacker => self.attacker_power,
            Side::Defender => self.defender_power,
        };
        let bonus: i32 = self
            .modifications
            .iter()
            .filter(|m| m.side == side)
            .map(|m| m.amount)
            .sum();
        (base + bonus).max(0)
    }

    #[must_use]
    pub fn window(&self) -> BattleWindow {
        BattleWindow {
            attacker: self.attacker,
            attacker_owner: self.attacker_owner,
            target: self.target,
            step: self.phase,
            blocker_used: self.blocker.is_some(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn attacker(&self) -> CardId {
        self.attacker
    }

    #[must_use]
    pub fn attacker_owner(&self) -> PlayerId {
        self.attacker_owner
    }

    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.attacker_owner.opponent()
    }

    #[must_use]
    pub fn is_leader_attack(&self) -> bool {
        self.attacker_is_leader
    }

    #[must_use]
    pub fn original_target(&self) -> CardId {
        self.original_target
    }

    #[must_use]
    pub fn target(&self) -> CardId {
        self.target
    }

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    #[must_use]
    pub fn blocker(&self) -> Option<CardId> {
        self.blocker
    }

    #[must_use]
    pub fn counters(&self) -> &[CardId] {
        &self.counters
    }

    #[must_use]
    pub fn modifications(&self) -> &[PowerModification] {
        &self.modifications
    }

    #[must_use]
    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }
}
