//! Action legality.
//!
//! [`validate`] answers whether an action may be applied to a state and
//! why not; it never mutates. [`legal_actions`] enumerates the actions
//! a player may take right now, each of which passes `validate`.
//!
//! Leader attacks are accepted by `validate` but not enumerated: leaders
//! never rest from attacking, so listing them would let a search or random
//! agent attack without bound.

use crate::battle::{BattlePhase, BattleWindow};
use crate::cards::{Capability, CardId, CardKind};
use crate::core::{Action, ActionKind, GameState, Phase, PlayerId, PLAYER_COUNT};
use crate::error::RuleViolation;
use crate::zones::PlayerState;

type Verdict = Result<(), RuleViolation>;

/// Check whether `action` is legal in `state`.
///
/// `Ok(())` means it may be applied; the error's `Display` is the reason.
pub fn validate(state: &GameState, action: &Action) -> Verdict {
    let player = action.player();
    if player.index() >= PLAYER_COUNT {
        return Err(RuleViolation::UnknownPlayer(player));
    }
    if state.is_terminal() {
        return Err(RuleViolation::GameOver);
    }

    match *action {
        Action::UseBlocker { player, blocker } => validate_blocker(state, player, blocker),
        Action::UseCounter { player, card } => validate_counter(state, player, card),
        Action::UseTrigger { player, card } | Action::DeclineTrigger { player, card } => {
            validate_trigger(state, player, card)
        }
        Action::Mulligan { player } => validate_mulligan(state, player),
        _ => validate_turn_action(state, action),
    }
}

/// Once per player, before that player's first turn starts.
fn validate_mulligan(state: &GameState, player: PlayerId) -> Verdict {
    if state.battle.is_some() {
        return Err(RuleViolation::BattleInProgress(ActionKind::Mulligan));
    }
    if state.pending_trigger.is_some() {
        return Err(RuleViolation::TriggerPending);
    }
    let me = state.player(player);
    if me.mulligan_available && me.turns_started == 0 {
        Ok(())
    } else {
        Err(RuleViolation::MulliganUnavailable)
    }
}

/// Actions taken by the active player on their own turn.
fn validate_turn_action(state: &GameState, action: &Action) -> Verdict {
    let player = action.player();
    let kind = action.kind();

    if player != state.active_player {
        return Err(RuleViolation::NotYourTurn(player));
    }
    if state.battle.is_some() {
        return Err(RuleViolation::BattleInProgress(kind));
    }
    if state.pending_trigger.is_some() {
        return Err(RuleViolation::TriggerPending);
    }

    match *action {
        Action::PlayCard { card, don_paid, .. } => {
            require_phase(state, kind, &[Phase::Main])?;
            validate_play(state, player, card, don_paid)
        }
        Action::Attack { attacker, target, .. } => {
            require_phase(state, kind, &[Phase::Main])?;
            validate_attack(state, player, attacker, target)
        }
        Action::AttachDon { target, count, .. } => {
            require_phase(state, kind, &[Phase::Don])?;
            let me = state.player(player);
            if count == 0 {
                return Err(RuleViolation::ZeroDon);
            }
            if !me.is_on_field(target) {
                return Err(RuleViolation::NotOnField(target));
            }
            if count > me.active_don {
                return Err(RuleViolation::InsufficientDon {
                    needed: count,
                    available: me.active_don,
                });
            }
            Ok(())
        }
        Action::DetachDon { target, count, .. } => {
            require_phase(state, kind, &[Phase::Don])?;
            let me = state.player(player);
            if count == 0 {
                return Err(RuleViolation::ZeroDon);
            }
            if !me.is_on_field(target) {
                return Err(RuleViolation::NotOnField(target));
            }
            let attached = me.attached(target);
            if count > attached {
                return Err(RuleViolation::InsufficientAttached {
                    target,
                    attached,
                    requested: count,
                });
            }
            Ok(())
        }
        Action::ActivateAbility { card, .. } => {
            require_phase(state, kind, &[Phase::Main])?;
            validate_ability(state, player, card)
        }
        Action::PassPhase { .. } => require_phase(state, kind, &[Phase::Main, Phase::End]),
        // Routed by `validate`.
        Action::UseBlocker { .. }
        | Action::UseCounter { .. }
        | Action::UseTrigger { .. }
        | Action::DeclineTrigger { .. }
        | Action::Mulligan { .. } => Ok(()),
    }
}

fn require_phase(state: &GameState, action: ActionKind, allowed: &[Phase]) -> Verdict {
    if allowed.contains(&state.phase) {
        Ok(())
    } else {
        Err(RuleViolation::WrongPhase {
            action,
            phase: state.phase,
        })
    }
}

fn validate_play(state: &GameState, player: PlayerId, card: CardId, don_paid: u32) -> Verdict {
    let me = state.player(player);
    if !me.in_hand(card) {
        return Err(RuleViolation::NotInHand(card));
    }
    let def = state.card(card).ok_or(RuleViolation::UnknownCard(card))?;
    if def.kind == CardKind::Leader {
        return Err(RuleViolation::NotPlayable(card));
    }
    if def.is_counter_only() {
        return Err(RuleViolation::CounterOnly(card));
    }
    if don_paid != def.cost {
        return Err(RuleViolation::CostMismatch {
            card,
            cost: def.cost,
            paid: don_paid,
        });
    }
    if def.cost > me.active_don {
        return Err(RuleViolation::InsufficientDon {
            needed: def.cost,
            available: me.active_don,
        });
    }
    if def.kind == CardKind::Character && me.characters.len() >= state.rules.max_characters {
        return Err(RuleViolation::CharacterAreaFull);
    }
    Ok(())
}

fn validate_attack(state: &GameState, player: PlayerId, attacker: CardId, target: CardId) -> Verdict {
    let me = state.player(player);
    let attacking = me
        .field_card(attacker)
        .ok_or(RuleViolation::NotOnField(attacker))?;

    if me.first_turn {
        return Err(RuleViolation::FirstTurn);
    }
    if !attacking.is_active() {
        return Err(RuleViolation::Rested(attacker));
    }
    if !me.is_leader(attacker) && me.played_this_turn.contains(&attacker) {
        let rush = state
            .card(attacker)
            .map_or(false, |c| c.has_capability(Capability::Rush));
        if !rush {
            return Err(RuleViolation::SummoningSick(attacker));
        }
    }

    let opponent = state.player(player.opponent());
    if opponent.is_leader(target) {
        return Ok(());
    }
    match opponent.character(target) {
        Some(fc) if fc.is_active() => Err(RuleViolation::TargetActive(target)),
        Some(_) => Ok(()),
        None => Err(RuleViolation::InvalidTarget(target)),
    }
}

fn validate_ability(state: &GameState, player: PlayerId, card: CardId) -> Verdict {
    let me = state.player(player);
    if !me.is_on_field(card) {
        return Err(RuleViolation::NotOnField(card));
    }
    let def = state.card(card).ok_or(RuleViolation::UnknownCard(card))?;
    if !def.has_capability(Capability::ActiveMain) {
        return Err(RuleViolation::NoActivatedAbility(card));
    }
    if me.abilities_used.contains(&card) {
        return Err(RuleViolation::AbilityAlreadyUsed(card));
    }
    let required = def.don_cost_of(Capability::ActiveMain).unwrap_or(0);
    let attached = me.attached(card);
    if attached < required {
        return Err(RuleViolation::AbilityDonRequirement {
            card,
            required,
            attached,
        });
    }
    Ok(())
}

/// Open battle window where `player` is the defender.
fn defending_window(state: &GameState, player: PlayerId, kind: ActionKind) -> Result<&BattleWindow, RuleViolation> {
    let window = state.battle.as_ref().ok_or(RuleViolation::NoBattle)?;
    if window.defender() != player {
        return Err(RuleViolation::NotDefender(kind));
    }
    Ok(window)
}

fn validate_blocker(state: &GameState, player: PlayerId, blocker: CardId) -> Verdict {
    let window = defending_window(state, player, ActionKind::UseBlocker)?;
    if window.step != BattlePhase::Blocker {
        return Err(RuleViolation::WrongBattleStep {
            action: ActionKind::UseBlocker,
            step: window.step,
        });
    }
    if window.blocker_used {
        return Err(RuleViolation::BlockerAlreadyUsed);
    }
    let me = state.player(player);
    let fc = me.character(blocker).ok_or(RuleViolation::NotOnField(blocker))?;
    let def = state.card(blocker).ok_or(RuleViolation::UnknownCard(blocker))?;
    if !def.has_capability(Capability::Blocker) {
        return Err(RuleViolation::NotBlocker(blocker));
    }
    if !fc.is_active() {
        return Err(RuleViolation::Rested(blocker));
    }
    Ok(())
}

fn validate_counter(state: &GameState, player: PlayerId, card: CardId) -> Verdict {
    let window = defending_window(state, player, ActionKind::UseCounter)?;
    if window.step != BattlePhase::Counter {
        return Err(RuleViolation::WrongBattleStep {
            action: ActionKind::UseCounter,
            step: window.step,
        });
    }
    if !state.player(player).in_hand(card) {
        return Err(RuleViolation::NotInHand(card));
    }
    let def = state.card(card).ok_or(RuleViolation::UnknownCard(card))?;
    if def.counter_value().is_none() {
        return Err(RuleViolation::NoCounter(card));
    }
    Ok(())
}

fn validate_trigger(state: &GameState, player: PlayerId, card: CardId) -> Verdict {
    let pending = state.pending_trigger.ok_or(RuleViolation::NoTrigger)?;
    if pending.player != player {
        return Err(RuleViolation::NotTriggerOwner {
            owner: pending.player,
            player,
        });
    }
    if pending.card != card {
        return Err(RuleViolation::TriggerMismatch(card));
    }
    Ok(())
}

/// Every action `player` may legally take right now.
///
/// Turn actions come only for the active player outside battle. During a
/// battle the defender gets blocker or counter options for the current
/// step; the owner of a pending trigger gets use/decline.
#[must_use]
pub fn legal_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    let mut actions = Vec::new();
    if state.is_terminal() || player.index() >= PLAYER_COUNT {
        return actions;
    }

    if let Some(pending) = state.pending_trigger {
        if pending.player == player {
            actions.push(Action::UseTrigger { player, card: pending.card });
            actions.push(Action::DeclineTrigger { player, card: pending.card });
        }
        return actions;
    }

    if let Some(window) = &state.battle {
        if window.defender() == player {
            defensive_actions(state, player, window.step, &mut actions);
        }
        return actions;
    }

    let me = state.player(player);
    if validate_mulligan(state, player).is_ok() {
        actions.push(Action::Mulligan { player });
    }
    if player != state.active_player {
        return actions;
    }

    match state.phase {
        Phase::Main => main_actions(state, player, me, &mut actions),
        Phase::Don => {
            if me.active_don > 0 {
                for target in me.field_ids() {
                    actions.push(Action::AttachDon { player, target, count: 1 });
                }
            }
            for (&target, &attached) in me.attached_don.iter() {
                if attached > 0 && me.is_on_field(target) {
                    actions.push(Action::DetachDon { player, target, count: 1 });
                }
            }
        }
        Phase::End => actions.push(Action::pass(player)),
        Phase::Refresh | Phase::Draw => {}
    }

    actions
}

fn main_actions(state: &GameState, player: PlayerId, me: &PlayerState, out: &mut Vec<Action>) {
    let mut push_if_legal = |action: Action| {
        if validate(state, &action).is_ok() {
            out.push(action);
        }
    };

    for &card in me.hand.iter() {
        let cost = state.card(card).map_or(0, |c| c.cost);
        push_if_legal(Action::PlayCard { player, card, don_paid: cost });
    }

    let opponent = state.player(player.opponent());
    let targets: Vec<CardId> = std::iter::once(opponent.leader.card)
        .chain(opponent.characters.iter().filter(|fc| !fc.is_active()).map(|fc| fc.card))
        .collect();
    for attacker in me.characters.iter().map(|fc| fc.card) {
        for &target in &targets {
            push_if_legal(Action::Attack { player, attacker, target });
        }
    }

    for card in me.field_ids() {
        push_if_legal(Action::ActivateAbility { player, card });
    }

    push_if_legal(Action::pass(player));
}

fn defensive_actions(state: &GameState, player: PlayerId, step: BattlePhase, out: &mut Vec<Action>) {
    let me = state.player(player);
    match step {
        BattlePhase::Blocker => {
            for fc in me.characters.iter() {
                let action = Action::UseBlocker { player, blocker: fc.card };
                if validate(state, &action).is_ok() {
                    out.push(action);
                }
            }
        }
        BattlePhase::Counter => {
            for &card in me.hand.iter() {
                let action = Action::UseCounter { player, card };
                if validate(state, &action).is_ok() {
                    out.push(action);
                }
            }
        }
        _ => {}
    }
}
