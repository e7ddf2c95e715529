//! Action representation.
//!
//! Every move a player can make is one variant of [`Action`]. Each variant
//! names the acting player, so an action can be validated and recorded
//! without outside context. [`ActionKind`] is the fieldless tag used in
//! reason strings and for quick filtering.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::Phase;
use crate::cards::CardId;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use deckhand::cards::CardId;
/// use deckhand::core::{Action, ActionKind, PlayerId};
///
/// let play = Action::PlayCard { player: PlayerId::ONE, card: CardId::new(12), don_paid: 3 };
/// assert_eq!(play.kind(), ActionKind::PlayCard);
/// assert_eq!(play.player(), PlayerId::ONE);
/// assert!(!play.is_pass());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand, paying exactly its cost.
    PlayCard {
        player: PlayerId,
        card: CardId,
        don_paid: u32,
    },
    /// Declare an attack against the opposing leader or a rested character.
    Attack {
        player: PlayerId,
        attacker: CardId,
        target: CardId,
    },
    /// Move active DON!! onto the leader or a character.
    AttachDon {
        player: PlayerId,
        target: CardId,
        count: u32,
    },
    /// Return attached DON!! to the active pool.
    DetachDon {
        player: PlayerId,
        target: CardId,
        count: u32,
    },
    /// Discard a hand card during battle for its counter value.
    UseCounter { player: PlayerId, card: CardId },
    /// Redirect the current attack to an active blocker.
    UseBlocker { player: PlayerId, blocker: CardId },
    /// Activate a leader or character `[Activate: Main]` ability.
    ActivateAbility { player: PlayerId, card: CardId },
    /// Resolve the pending life trigger.
    UseTrigger { player: PlayerId, card: CardId },
    /// Keep the pending life trigger card in hand.
    DeclineTrigger { player: PlayerId, card: CardId },
    /// End the current phase.
    PassPhase { player: PlayerId },
    /// Redraw the opening hand.
    Mulligan { player: PlayerId },
}

/// Fieldless tag of an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    PlayCard,
    Attack,
    AttachDon,
    DetachDon,
    UseCounter,
    UseBlocker,
    ActivateAbility,
    UseTrigger,
    DeclineTrigger,
    PassPhase,
    Mulligan,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::PlayCard => "PlayCard",
            ActionKind::Attack => "Attack",
            ActionKind::AttachDon => "AttachDon",
            ActionKind::DetachDon => "DetachDon",
            ActionKind::UseCounter => "UseCounter",
            ActionKind::UseBlocker => "UseBlocker",
            ActionKind::ActivateAbility => "ActivateAbility",
            ActionKind::UseTrigger => "UseTrigger",
            ActionKind::DeclineTrigger => "DeclineTrigger",
            ActionKind::PassPhase => "PassPhase",
            ActionKind::Mulligan => "Mulligan",
        };
        f.write_str(name)
    }
}

impl Action {
    /// The variant tag.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::PlayCard { .. } => ActionKind::PlayCard,
            Action::Attack { .. } => ActionKind::Attack,
            Action::AttachDon { .. } => ActionKind::AttachDon,
            Action::DetachDon { .. } => ActionKind::DetachDon,
            Action::UseCounter { .. } => ActionKind::UseCounter,
            Action::UseBlocker { .. } => ActionKind::UseBlocker,
            Action::ActivateAbility { .. } => ActionKind::ActivateAbility,
            Action::UseTrigger { .. } => ActionKind::UseTrigger,
            Action::DeclineTrigger { .. } => ActionKind::DeclineTrigger,
            Action::PassPhase { .. } => ActionKind::PassPhase,
            Action::Mulligan { .. } => ActionKind::Mulligan,
        }
    }

    /// The acting player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            Action::PlayCard { player, .. }
            | Action::Attack { player, .. }
            | Action::AttachDon { player, .. }
            | Action::DetachDon { player, .. }
            | Action::UseCounter { player, .. }
            | Action::UseBlocker { player, .. }
            | Action::ActivateAbility { player, .. }
            | Action::UseTrigger { player, .. }
            | Action::DeclineTrigger { player, .. }
            | Action::PassPhase { player }
            | Action::Mulligan { player } => player,
        }
    }

    /// Shorthand for a pass by `player`.
    #[must_use]
    pub fn pass(player: PlayerId) -> Self {
        Action::PassPhase { player }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::PassPhase { .. })
    }

    /// Blocker and counter plays, taken by the defending player mid-battle.
    #[must_use]
    pub fn is_defensive(&self) -> bool {
        matches!(self, Action::UseBlocker { .. } | Action::UseCounter { .. })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlayCard { player, card, don_paid } => {
                write!(f, "{player} plays {card} for {don_paid}")
            }
            Action::Attack { player, attacker, target } => {
                write!(f, "{player} attacks {target} with {attacker}")
            }
            Action::AttachDon { player, target, count } => {
                write!(f, "{player} attaches {count} DON!! to {target}")
            }
            Action::DetachDon { player, target, count } => {
                write!(f, "{player} detaches {count} DON!! from {target}")
            }
            Action::UseCounter { player, card } => write!(f, "{player} counters with {card}"),
            Action::UseBlocker { player, blocker } => write!(f, "{player} blocks with {blocker}"),
            Action::ActivateAbility { player, card } => write!(f, "{player} activates {card}"),
            Action::UseTrigger { player, card } => write!(f, "{player} triggers {card}"),
            Action::DeclineTrigger { player, card } => {
                write!(f, "{player} declines trigger {card}")
            }
            Action::PassPhase { player } => write!(f, "{player} passes"),
            Action::Mulligan { player } => write!(f, "{player} mulligans"),
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay and debugging; the sequence number is global to the
/// game so records sort in execution order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Phase the action was taken in.
    pub phase: Phase,

    /// Position in the game's history.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: Action, turn: u32, phase: Phase, sequence: u32) -> Self {
        Self {
            player: action.player(),
            action,
            turn,
            phase,
            sequence,
        }
    }
}
