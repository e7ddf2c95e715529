//! Simplified action simulation for lookahead.
//!
//! A candidate is applied to a clone of the position, never to the
//! position itself. Attacks resolve as a bare power comparison with no
//! blocker or counter offers, and a life trigger revealed by the hit is
//! declined. Any rejection discards the branch.

use tracing::trace;

use crate::battle::Battle;
use crate::core::{Action, GameState};
use crate::error::Result;
use crate::rules::{self, validate};

/// State after `action`, or `None` if it could not be applied.
#[must_use]
pub fn simulate(state: &GameState, action: &Action) -> Option<GameState> {
    let mut next = state.clone();
    match apply_simplified(&mut next, action) {
        Ok(()) => Some(next),
        Err(error) => {
            trace!(%action, %error, "simulation rejected");
            None
        }
    }
}

fn apply_simplified(state: &mut GameState, action: &Action) -> Result<()> {
    match *action {
        Action::Attack { attacker, target, .. } => {
            validate(state, action)?;
            state.record(action.clone());
            Battle::run_undefended(state, attacker, target)?;
            state.pending_trigger = None;
            Ok(())
        }
        _ => rules::apply(state, action),
    }
}
