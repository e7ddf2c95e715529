//! Interactive battle flow.
//!
//! Runs one attack through the protocol, asking the defending agent for a
//! blocker between declaration and the Counter step and for counters
//! before resolution. Each choice is validated first; an illegal choice
//! is logged and skipped, never applied. Agents that do not override the
//! hooks defend with nothing.

use tracing::{debug, warn};

use super::protocol::{Battle, BattleResult};
use crate::agents::Agent;
use crate::cards::CardId;
use crate::core::{Action, GameState};
use crate::error::Result;
use crate::rules::validate;

/// Record and run a validated attack with `defender` choosing defenses.
pub fn run_interactive(
    state: &mut GameState,
    attacker: CardId,
    target: CardId,
    defender: &mut dyn Agent,
) -> Result<BattleResult> {
    let attacking_player = state.active_player;
    let defending_player = attacking_player.opponent();
    state.record(Action::Attack {
        player: attacking_player,
        attacker,
        target,
    });

    let mut battle = Battle::initiate(state, attacker, target)?;

    if let Some(blocker) = defender.get_defensive_blocker(state, &battle) {
        let action = Action::UseBlocker {
            player: defending_player,
            blocker,
        };
        match validate(state, &action) {
            Ok(()) => {
                battle.apply_blocker(state, blocker)?;
                state.record(action);
            }
            Err(reason) => warn!(agent = defender.name(), %reason, "ignoring blocker choice"),
        }
    }
    battle.advance(state)?;

    for card in defender.get_defensive_counters(state, &battle) {
        let action = Action::UseCounter {
            player: defending_player,
            card,
        };
        match validate(state, &action) {
            Ok(()) => {
                battle.apply_counter(state, card)?;
                state.record(action);
            }
            Err(reason) => warn!(agent = defender.name(), %reason, "ignoring counter choice"),
        }
    }
    battle.advance(state)?;

    let result = battle.resolve(state)?;
    debug!(
        %attacker,
        target = %result.target,
        attacker_power = result.attacker_power,
        defender_power = result.defender_power,
        outcome = ?result.outcome,
        "battle resolved"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::PassAgent;
    use crate::battle::BattleOutcome;
    use crate::core::{ActionKind, PlayerId};
    use crate::testing::*;
    use crate::zones::CardStatus;

    const P1: PlayerId = PlayerId::ONE;
    const P2: PlayerId = PlayerId::TWO;

    /// Defender with fixed choices.
    struct Stubborn {
        blocker: Option<CardId>,
        counters: Vec<CardId>,
    }

    impl Agent for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn player(&self) -> PlayerId {
            P2
        }

        fn get_action(&mut self, _: &GameState) -> Option<Action> {
            None
        }

        fn get_defensive_blocker(&mut self, _: &GameState, _: &Battle) -> Option<CardId> {
            self.blocker
        }

        fn get_defensive_counters(&mut self, _: &GameState, _: &Battle) -> Vec<CardId> {
            self.counters.clone()
        }
    }

    #[test]
    fn test_no_hooks_means_no_defense() {
        let mut state = duel();
        let brute = place(&mut state, P1, BRUTE, CardStatus::Active);
        place(&mut state, P2, WALL, CardStatus::Active);

        let result = run_interactive(&mut state, brute, LEADER_TWO, &mut PassAgent::new(P2)).unwrap();

        assert!(result.succeeded());
        assert_eq!(state.players[P2].life.len(), 4);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].action.kind(), ActionKind::Attack);
    }

    #[test]
    fn test_defender_choices_applied_and_recorded() {
        let mut state = duel();
        let brute = place(&mut state, P1, BRUTE, CardStatus::Active);
        let wall = place(&mut state, P2, WALL, CardStatus::Active);
        let mut defender = Stubborn {
            blocker: Some(wall),
            counters: vec![card(P2, GUARD)],
        };

        let result = run_interactive(&mut state, brute, LEADER_TWO, &mut defender).unwrap();

        assert_eq!(result.outcome, BattleOutcome::DefenseSucceeded);
        let kinds: Vec<_> = state.history.iter().map(|r| r.action.kind()).collect();
        assert_eq!(kinds, vec![ActionKind::Attack, ActionKind::UseBlocker, ActionKind::UseCounter]);
        assert_eq!(state.battle, None);
    }

    #[test]
    fn test_illegal_defenses_are_skipped() {
        let mut state = duel();
        let brute = place(&mut state, P1, BRUTE, CardStatus::Active);
        // Not a blocker, and a card with no counter value.
        let grunt = place(&mut state, P2, GRUNT, CardStatus::Active);
        let mut defender = Stubborn {
            blocker: Some(grunt),
            counters: vec![card(P2, BRUTE), card(P2, 20)],
        };

        let result = run_interactive(&mut state, brute, LEADER_TWO, &mut defender).unwrap();

        assert!(result.succeeded());
        assert_eq!(result.target, LEADER_TWO);
        assert!(state.players[P2].character(grunt).unwrap().is_active());
        assert!(state.players[P2].in_hand(card(P2, BRUTE)));
        assert_eq!(state.history.len(), 1);
    }
}
