//! Validator, legal-action and transition integration tests.

mod common;

use common::*;
use deckhand::core::{Action, ActionKind, Phase};
use deckhand::error::{EngineError, RuleViolation};
use deckhand::rules::{apply, legal_actions, transitions, validate};
use deckhand::zones::CardStatus;

fn play(player: deckhand::core::PlayerId, offset: u32, don_paid: u32) -> Action {
    Action::PlayCard { player, card: id(player, offset), don_paid }
}

// =============================================================================
// Playing cards
// =============================================================================

#[test]
fn test_play_character_pays_exact_cost() {
    let mut state = table();
    apply(&mut state, &play(P1, RAIDER, 3)).unwrap();

    let p1 = &state.players[P1];
    assert_eq!(p1.active_don, 3);
    assert!(p1.is_on_field(id(P1, RAIDER)));
    assert!(p1.character(id(P1, RAIDER)).unwrap().is_active());
    assert!(p1.played_this_turn.contains(&id(P1, RAIDER)));
    assert!(!p1.in_hand(id(P1, RAIDER)));
}

#[test]
fn test_wrong_payment_rejected_with_reason() {
    let state = table();
    let err = validate(&state, &play(P1, RAIDER, 2)).unwrap_err();

    assert_eq!(
        err,
        RuleViolation::CostMismatch { card: id(P1, RAIDER), cost: 3, paid: 2 }
    );
    assert_eq!(err.to_string(), "Card(1001) costs 3 DON!!, but 2 was offered");
}

#[test]
fn test_insufficient_don_rejected() {
    let mut state = table();
    state.players[P1].active_don = 2;

    assert_eq!(
        validate(&state, &play(P1, RAIDER, 3)),
        Err(RuleViolation::InsufficientDon { needed: 3, available: 2 })
    );
}

#[test]
fn test_character_area_caps_at_five() {
    let mut state = table();
    for offset in 10..=14 {
        field(&mut state, P1, offset, CardStatus::Active);
    }

    assert_eq!(validate(&state, &play(P1, DECKHAND, 1)), Err(RuleViolation::CharacterAreaFull));
    let err = apply(&mut state, &play(P1, DECKHAND, 1)).unwrap_err();
    assert_eq!(err, EngineError::Illegal(RuleViolation::CharacterAreaFull));
    assert_eq!(state.players[P1].characters.len(), 5);
}

#[test]
fn test_leader_never_played_from_hand() {
    let mut state = table();
    state.players[P1].hand.push_back(leader(P1));

    let action = Action::PlayCard { player: P1, card: leader(P1), don_paid: 0 };
    assert_eq!(validate(&state, &action), Err(RuleViolation::NotPlayable(leader(P1))));
}

#[test]
fn test_counter_event_rejected_outside_battle() {
    let state = table();
    assert_eq!(
        validate(&state, &play(P1, PARRY, 1)),
        Err(RuleViolation::CounterOnly(id(P1, PARRY)))
    );
}

#[test]
fn test_main_event_with_counter_playable_in_main() {
    let mut state = table();
    let rally = id(P1, RALLY);
    state.players[P1].hand.push_back(rally);

    assert_eq!(validate(&state, &play(P1, RALLY, 1)), Ok(()));
    assert!(legal_actions(&state, P1).contains(&play(P1, RALLY, 1)));

    apply(&mut state, &play(P1, RALLY, 1)).unwrap();
    assert_eq!(state.players[P1].trash.last(), Some(&rally));
    assert_eq!(state.players[P1].active_don, 5);
}

#[test]
fn test_only_in_main_and_only_on_own_turn() {
    let mut state = table();
    assert_eq!(validate(&state, &play(P2, SCOUT, 2)), Err(RuleViolation::NotYourTurn(P2)));

    state.phase = Phase::Don;
    assert_eq!(
        validate(&state, &play(P1, SCOUT, 2)),
        Err(RuleViolation::WrongPhase { action: ActionKind::PlayCard, phase: Phase::Don })
    );
}

// =============================================================================
// Attacking
// =============================================================================

#[test]
fn test_summoning_sickness_until_refresh() {
    let mut state = table();
    apply(&mut state, &play(P1, RAIDER, 3)).unwrap();
    let raider = id(P1, RAIDER);
    let attack = Action::Attack { player: P1, attacker: raider, target: leader(P2) };

    assert_eq!(validate(&state, &attack), Err(RuleViolation::SummoningSick(raider)));
    assert!(!legal_actions(&state, P1).contains(&attack));

    transitions::refresh(&mut state, P1);

    assert!(validate(&state, &attack).is_ok());
    assert!(legal_actions(&state, P1).contains(&attack));
}

#[test]
fn test_rush_waives_sickness_but_not_first_turn() {
    let mut state = table();
    apply(&mut state, &play(P1, RUNNER, 3)).unwrap();
    let runner = id(P1, RUNNER);
    let attack = Action::Attack { player: P1, attacker: runner, target: leader(P2) };

    assert!(validate(&state, &attack).is_ok());

    state.players[P1].first_turn = true;
    assert_eq!(validate(&state, &attack), Err(RuleViolation::FirstTurn));
}

#[test]
fn test_first_turn_blocks_leader_attack() {
    let mut state = table();
    let attack = Action::Attack { player: P1, attacker: leader(P1), target: leader(P2) };
    assert!(validate(&state, &attack).is_ok());

    state.players[P1].first_turn = true;
    assert_eq!(validate(&state, &attack), Err(RuleViolation::FirstTurn));
}

#[test]
fn test_only_rested_characters_are_targets() {
    let mut state = table();
    let raider = field(&mut state, P1, RAIDER, CardStatus::Active);
    let scout = field(&mut state, P2, SCOUT, CardStatus::Active);
    let attack = Action::Attack { player: P1, attacker: raider, target: scout };

    assert_eq!(validate(&state, &attack), Err(RuleViolation::TargetActive(scout)));

    state.players[P2].characters[0].status = CardStatus::Rested;
    assert!(validate(&state, &attack).is_ok());

    let own = Action::Attack { player: P1, attacker: raider, target: leader(P1) };
    assert_eq!(validate(&state, &own), Err(RuleViolation::InvalidTarget(leader(P1))));
}

#[test]
fn test_rested_attacker_rejected() {
    let mut state = table();
    let raider = field(&mut state, P1, RAIDER, CardStatus::Rested);
    let attack = Action::Attack { player: P1, attacker: raider, target: leader(P2) };

    assert_eq!(validate(&state, &attack), Err(RuleViolation::Rested(raider)));
}

#[test]
fn test_attack_is_not_applied_directly() {
    let mut state = table();
    let raider = field(&mut state, P1, RAIDER, CardStatus::Active);
    let attack = Action::Attack { player: P1, attacker: raider, target: leader(P2) };

    assert_eq!(apply(&mut state, &attack), Err(EngineError::AttackOutsideBattle));
    assert!(state.history.is_empty());
}

// =============================================================================
// Defensive actions
// =============================================================================

#[test]
fn test_defense_needs_an_open_battle() {
    let mut state = table();
    let sentinel = field(&mut state, P2, SENTINEL, CardStatus::Active);

    assert_eq!(
        validate(&state, &Action::UseBlocker { player: P2, blocker: sentinel }),
        Err(RuleViolation::NoBattle)
    );
    assert_eq!(
        validate(&state, &Action::UseCounter { player: P2, card: id(P2, PARRY) }),
        Err(RuleViolation::NoBattle)
    );
}

// =============================================================================
// DON!!
// =============================================================================

#[test]
fn test_attach_and_detach_in_don_phase() {
    let mut state = table();
    state.phase = Phase::Don;
    let raider = field(&mut state, P1, RAIDER, CardStatus::Active);

    apply(&mut state, &Action::AttachDon { player: P1, target: raider, count: 2 }).unwrap();
    assert_eq!(state.players[P1].attached(raider), 2);
    assert_eq!(state.players[P1].active_don, 4);

    assert_eq!(
        validate(&state, &Action::DetachDon { player: P1, target: raider, count: 3 }),
        Err(RuleViolation::InsufficientAttached { target: raider, attached: 2, requested: 3 })
    );
    apply(&mut state, &Action::DetachDon { player: P1, target: raider, count: 1 }).unwrap();
    assert_eq!(state.players[P1].attached(raider), 1);
    assert_eq!(state.players[P1].active_don, 5);
}

#[test]
fn test_attach_bounded_by_active_don() {
    let mut state = table();
    state.phase = Phase::Don;

    assert_eq!(
        validate(&state, &Action::AttachDon { player: P1, target: leader(P1), count: 7 }),
        Err(RuleViolation::InsufficientDon { needed: 7, available: 6 })
    );
    assert_eq!(
        validate(&state, &Action::AttachDon { player: P1, target: leader(P1), count: 0 }),
        Err(RuleViolation::ZeroDon)
    );
}

#[test]
fn test_pass_only_in_main_or_end() {
    let mut state = table();
    state.phase = Phase::Don;
    assert_eq!(
        validate(&state, &Action::pass(P1)),
        Err(RuleViolation::WrongPhase { action: ActionKind::PassPhase, phase: Phase::Don })
    );

    state.phase = Phase::End;
    assert!(validate(&state, &Action::pass(P1)).is_ok());
}

// =============================================================================
// Phases and refresh
// =============================================================================

#[test]
fn test_refresh_returns_don_and_readies_field() {
    let mut state = table();
    let raider = field(&mut state, P1, RAIDER, CardStatus::Rested);
    {
        let p1 = &mut state.players[P1];
        p1.active_don = 0;
        p1.attached_don.insert(raider, 3);
        p1.leader.status = CardStatus::Rested;
    }

    let outcome = transitions::refresh(&mut state, P1);

    let p1 = &state.players[P1];
    assert_eq!((outcome.detached, outcome.gained), (3, 2));
    assert_eq!(p1.active_don, 5);
    assert_eq!(p1.don_pool, 8);
    assert_eq!(p1.don_deck, 2);
    assert_eq!(p1.total_attached(), 0);
    assert!(p1.leader.is_active());
    assert!(p1.character(raider).unwrap().is_active());
}

#[test]
fn test_refresh_respects_pool_cap() {
    let mut state = table();
    {
        let p1 = &mut state.players[P1];
        p1.don_pool = 9;
        p1.active_don = 0;
    }

    let outcome = transitions::refresh(&mut state, P1);

    assert_eq!(outcome.gained, 1);
    assert_eq!(state.players[P1].don_pool, 10);
    assert_eq!(state.players[P1].active_don, 1);
}

#[test]
fn test_pass_from_end_starts_opponent_turn() {
    let mut state = table();
    apply(&mut state, &Action::pass(P1)).unwrap();
    assert_eq!(state.phase, Phase::End);

    apply(&mut state, &Action::pass(P1)).unwrap();
    assert_eq!(state.phase, Phase::Refresh);
    assert_eq!(state.active_player, P2);
    assert_eq!(state.turn, 4);
    // Entering Refresh readied Player 2 and gave them DON!!.
    assert_eq!(state.players[P2].don_pool, 8);

    transitions::advance(&mut state);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(state.players[P2].hand.len(), 7);
}

#[test]
fn test_draw_from_empty_deck_defeats() {
    let mut state = table();
    state.players[P1].deck.clear();

    assert_eq!(transitions::draw_for_turn(&mut state, P1), 0);
    assert!(state.players[P1].defeated);
    assert_eq!(state.winner(), Some(P2));
    assert!(legal_actions(&state, P1).is_empty());
    assert_eq!(validate(&state, &Action::pass(P1)), Err(RuleViolation::GameOver));
}

// =============================================================================
// Legal actions
// =============================================================================

#[test]
fn test_legal_actions_enumeration() {
    let mut state = table();
    state.players[P1].active_don = 2;
    let raider = field(&mut state, P1, RAIDER, CardStatus::Active);
    let scout = field(&mut state, P2, SCOUT, CardStatus::Rested);
    field(&mut state, P2, SENTINEL, CardStatus::Active);

    let actions = legal_actions(&state, P1);

    // Affordable plays only; the counter event is never listed.
    assert!(actions.contains(&play(P1, SCOUT, 2)));
    assert!(actions.contains(&play(P1, DECKHAND, 1)));
    assert!(!actions.contains(&play(P1, RUNNER, 3)));
    assert!(!actions.contains(&play(P1, PARRY, 1)));
    // Active attacker against the leader and each rested character.
    assert!(actions.contains(&Action::Attack { player: P1, attacker: raider, target: leader(P2) }));
    assert!(actions.contains(&Action::Attack { player: P1, attacker: raider, target: scout }));
    assert_eq!(actions.iter().filter(|a| a.kind() == ActionKind::Attack).count(), 2);
    assert!(actions.contains(&Action::pass(P1)));
    for action in &actions {
        assert!(validate(&state, action).is_ok(), "{action}");
    }

    assert!(legal_actions(&state, P2).is_empty());
}

#[test]
fn test_don_phase_lists_attach_targets() {
    let mut state = table();
    state.phase = Phase::Don;
    let raider = field(&mut state, P1, RAIDER, CardStatus::Active);

    let actions = legal_actions(&state, P1);

    assert!(actions.contains(&Action::AttachDon { player: P1, target: leader(P1), count: 1 }));
    assert!(actions.contains(&Action::AttachDon { player: P1, target: raider, count: 1 }));
    assert!(!actions.iter().any(|a| a.is_pass()));
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_history_records_sequence() {
    let mut state = table();
    apply(&mut state, &play(P1, SCOUT, 2)).unwrap();
    apply(&mut state, &play(P1, DECKHAND, 1)).unwrap();

    let records: Vec<_> = state.history.iter().collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sequence, 0);
    assert_eq!(records[1].sequence, 1);
    assert!(records.iter().all(|r| r.turn == 3 && r.phase == Phase::Main && r.player == P1));
}
