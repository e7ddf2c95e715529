//! Battles: one attack from declaration to resolution.
//!
//! - `protocol`: the `Battle` state machine
//! - `interactive`: runs a battle with the defending agent's choices

pub mod interactive;
pub mod protocol;

pub use interactive::run_interactive;
pub use protocol::{
    Battle, BattleOutcome, BattlePhase, BattleResult, BattleWindow, ModificationSource,
    PowerModification, Side,
};
