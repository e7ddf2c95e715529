//! Error types for the engine.
//!
//! Two kinds of failure are kept apart:
//!
//! - [`RuleViolation`]: a prospective action is illegal. Callers re-poll;
//!   nothing was applied. Its `Display` is the validator's reason string.
//! - [`EngineError`]: something a correct caller never triggers (unknown
//!   ids, battle steps out of order) or a fatal protocol failure.

use thiserror::Error;

use crate::battle::BattlePhase;
use crate::cards::CardId;
use crate::core::{ActionKind, Phase, PlayerId};

/// Why the validator rejected an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("game is already over")]
    GameOver,

    #[error("{0} is not a seat in this game")]
    UnknownPlayer(PlayerId),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{action} is not allowed during the {phase} phase")]
    WrongPhase { action: ActionKind, phase: Phase },

    #[error("{0} is not allowed while a battle is in progress")]
    BattleInProgress(ActionKind),

    #[error("a life trigger must be resolved first")]
    TriggerPending,

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("{0} is not in hand")]
    NotInHand(CardId),

    #[error("{0} cannot be played from hand")]
    NotPlayable(CardId),

    #[error("{card} costs {cost} DON!!, but {paid} was offered")]
    CostMismatch { card: CardId, cost: u32, paid: u32 },

    #[error("needs {needed} active DON!!, only {available} available")]
    InsufficientDon { needed: u32, available: u32 },

    #[error("character area is full")]
    CharacterAreaFull,

    #[error("{0} can only be used as a counter during battle")]
    CounterOnly(CardId),

    #[error("{0} is not on your field")]
    NotOnField(CardId),

    #[error("{0} is rested")]
    Rested(CardId),

    #[error("{0} was played this turn")]
    SummoningSick(CardId),

    #[error("cannot attack during your first turn")]
    FirstTurn,

    #[error("{0} is not an opposing leader or character")]
    InvalidTarget(CardId),

    #[error("{0} is active and cannot be attacked")]
    TargetActive(CardId),

    #[error("no battle is in progress")]
    NoBattle,

    #[error("{action} is not allowed during the {step:?} step of battle")]
    WrongBattleStep { action: ActionKind, step: BattlePhase },

    #[error("only the defending player may use {0}")]
    NotDefender(ActionKind),

    #[error("{0} does not have [Blocker]")]
    NotBlocker(CardId),

    #[error("a blocker was already used this battle")]
    BlockerAlreadyUsed,

    #[error("{0} has no counter value")]
    NoCounter(CardId),

    #[error("DON!! count must be positive")]
    ZeroDon,

    #[error("{target} has {attached} DON!! attached, cannot detach {requested}")]
    InsufficientAttached {
        target: CardId,
        attached: u32,
        requested: u32,
    },

    #[error("{0} has no [Activate: Main] ability")]
    NoActivatedAbility(CardId),

    #[error("{0} already used its ability this turn")]
    AbilityAlreadyUsed(CardId),

    #[error("{card} needs {required} DON!! attached to activate, has {attached}")]
    AbilityDonRequirement {
        card: CardId,
        required: u32,
        attached: u32,
    },

    #[error("no life trigger is pending")]
    NoTrigger,

    #[error("pending trigger belongs to {owner}, not {player}")]
    NotTriggerOwner { owner: PlayerId, player: PlayerId },

    #[error("{0} is not the pending trigger card")]
    TriggerMismatch(CardId),

    #[error("mulligan is only available before the first turn")]
    MulliganUnavailable,
}

/// Fatal engine failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("illegal action: {0}")]
    Illegal(#[from] RuleViolation),

    #[error("card {0} is not registered")]
    UnknownCard(CardId),

    #[error("card {card} is not in {owner}'s {zone}")]
    CardNotInZone {
        card: CardId,
        owner: PlayerId,
        zone: &'static str,
    },

    #[error("battle step {actual:?} does not allow this, expected {expected:?}")]
    BattleStep {
        expected: BattlePhase,
        actual: BattlePhase,
    },

    #[error("a blocker was already used in this battle")]
    BlockerReused,

    #[error("blocker {0} is not active")]
    BlockerNotActive(CardId),

    #[error("attacks are resolved through the battle protocol")]
    AttackOutsideBattle,

    #[error("invalid deck: {0}")]
    InvalidDeck(String),

    #[error("card id {0} is used more than once")]
    DuplicateCard(CardId),

    #[error("{player} exceeded {rejections} consecutive rejected actions")]
    ProtocolViolation { player: PlayerId, rejections: u32 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
