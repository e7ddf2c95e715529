//! Named state transitions.
//!
//! All mutation of a [`GameState`] goes through these functions: the
//! orchestrator, the battle protocol and the minimax simulator call the
//! same code. Each transition assumes its action was validated and
//! reports an [`EngineError`] if the state contradicts that.
//!
//! [`apply`] is the entry point for non-battle actions: it validates,
//! records the action in the history and dispatches.

use tracing::{debug, info};

use super::validator::validate;
use crate::cards::{Capability, CardId, CardKind};
use crate::core::{Action, GameState, PendingTrigger, Phase, PlayerId};
use crate::error::{EngineError, Result, RuleViolation};
use crate::zones::{CardStatus, FieldCard, Zone};

/// DON!! movement during a refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// DON!! detached from the field and returned to active.
    pub detached: u32,
    /// DON!! moved from the DON!! deck into the pool.
    pub gained: u32,
}

/// What a successful hit on a leader did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeDamage {
    /// Top life card moved to hand.
    LifeLost(CardId),
    /// No life left; the defender is defeated.
    Defeated,
}

fn not_in(card: CardId, owner: PlayerId, zone: Zone) -> EngineError {
    EngineError::CardNotInZone {
        card,
        owner,
        zone: zone.name(),
    }
}

// === Phase effects ===

/// Start-of-turn refresh for `player`.
///
/// Detaches all DON!! back to active, moves up to `don_per_refresh` from
/// the DON!! deck into the pool (capped), readies the leader and every
/// character and clears per-turn tracking. The first-turn flag is cleared
/// from the player's second turn on.
pub fn refresh(state: &mut GameState, player: PlayerId) -> RefreshOutcome {
    let rules = &state.rules;
    let (per_refresh, cap) = (rules.don_per_refresh, rules.don_cap);
    let p = &mut state.players[player];

    let detached = p.total_attached();
    p.attached_don.clear();

    let gained = per_refresh
        .min(cap.saturating_sub(p.don_pool))
        .min(p.don_deck);
    p.don_deck -= gained;
    p.don_pool += gained;
    p.active_don += detached + gained;

    p.leader.status = CardStatus::Active;
    for fc in p.characters.iter_mut() {
        fc.status = CardStatus::Active;
    }
    p.played_this_turn.clear();
    p.abilities_used.clear();
    if p.turns_started > 0 {
        p.first_turn = false;
    }
    p.turns_started += 1;

    debug!(%player, detached, gained, pool = p.don_pool, "refresh");
    RefreshOutcome { detached, gained }
}

/// Draw-phase draw for `player`. Skipped during the player's first turn.
///
/// Returns the number of cards drawn. Drawing from an empty deck
/// defeats the player.
pub fn draw_for_turn(state: &mut GameState, player: PlayerId) -> usize {
    let count = state.rules.draw_per_turn;
    let p = &mut state.players[player];
    if p.first_turn {
        return 0;
    }
    let drawn = p.draw(count);
    if drawn < count {
        p.defeated = true;
        info!(%player, "deck out");
    }
    drawn
}

/// Move to the next phase and apply the automatic effects of the phase
/// entered (refresh, draw).
pub fn advance(state: &mut GameState) -> Phase {
    let phase = state.advance_phase();
    let player = state.active_player;
    match phase {
        Phase::Refresh => {
            refresh(state, player);
        }
        Phase::Draw => {
            draw_for_turn(state, player);
        }
        Phase::Don | Phase::Main | Phase::End => {}
    }
    debug!(turn = state.turn, %phase, %player, "phase");
    phase
}

// === Player actions ===

/// Validate, record and apply a non-battle action.
///
/// Attacks and defensive plays go through the battle protocol instead.
pub fn apply(state: &mut GameState, action: &Action) -> Result<()> {
    if matches!(
        action,
        Action::Attack { .. } | Action::UseBlocker { .. } | Action::UseCounter { .. }
    ) {
        return Err(EngineError::AttackOutsideBattle);
    }
    validate(state, action)?;
    state.record(action.clone());
    debug!(%action, "apply");

    match *action {
        Action::PlayCard { player, card, don_paid } => apply_play_card(state, player, card, don_paid),
        Action::AttachDon { player, target, count } => apply_attach_don(state, player, target, count),
        Action::DetachDon { player, target, count } => apply_detach_don(state, player, target, count),
        Action::ActivateAbility { player, card } => apply_activate_ability(state, player, card),
        Action::UseTrigger { player, card } => apply_use_trigger(state, player, card),
        Action::DeclineTrigger { .. } => {
            state.pending_trigger = None;
            Ok(())
        }
        Action::Mulligan { player } => apply_mulligan(state, player),
        Action::PassPhase { .. } => {
            advance(state);
            Ok(())
        }
        Action::Attack { .. } | Action::UseBlocker { .. } | Action::UseCounter { .. } => {
            Err(EngineError::AttackOutsideBattle)
        }
    }
}

/// Pay for and place a card from hand.
///
/// Characters enter Active and summoning sick, stages go to the stage
/// area, events resolve (opaquely) to the trash.
pub fn apply_play_card(state: &mut GameState, player: PlayerId, card: CardId, don_paid: u32) -> Result<()> {
    let kind = state.require_card(card)?.kind;
    if kind == CardKind::Leader {
        return Err(RuleViolation::NotPlayable(card).into());
    }
    let p = &mut state.players[player];

    if p.active_don < don_paid {
        return Err(RuleViolation::InsufficientDon {
            needed: don_paid,
            available: p.active_don,
        }
        .into());
    }
    if !p.remove_from_hand(card) {
        return Err(not_in(card, player, Zone::Hand));
    }
    p.active_don -= don_paid;

    match kind {
        CardKind::Character => {
            p.characters.push_back(FieldCard::active(card));
            p.played_this_turn.insert(card);
        }
        CardKind::Stage => p.stages.push_back(card),
        CardKind::Event | CardKind::Leader => p.trash.push_back(card),
    }
    Ok(())
}

pub fn apply_attach_don(state: &mut GameState, player: PlayerId, target: CardId, count: u32) -> Result<()> {
    let p = &mut state.players[player];
    if !p.is_on_field(target) {
        return Err(not_in(target, player, Zone::Character));
    }
    if p.active_don < count {
        return Err(RuleViolation::InsufficientDon {
            needed: count,
            available: p.active_don,
        }
        .into());
    }
    p.active_don -= count;
    let attached = p.attached(target);
    p.attached_don.insert(target, attached + count);
    Ok(())
}

pub fn apply_detach_don(state: &mut GameState, player: PlayerId, target: CardId, count: u32) -> Result<()> {
    let p = &mut state.players[player];
    let attached = p.attached(target);
    if attached < count {
        return Err(RuleViolation::InsufficientAttached {
            target,
            attached,
            requested: count,
        }
        .into());
    }
    if attached == count {
        p.attached_don.remove(&target);
    } else {
        p.attached_don.insert(target, attached - count);
    }
    p.active_don += count;
    Ok(())
}

/// Mark an `[Activate: Main]` ability as used this turn.
///
/// The effect itself is not executed; the history records the activation.
pub fn apply_activate_ability(state: &mut GameState, player: PlayerId, card: CardId) -> Result<()> {
    let p = &mut state.players[player];
    if !p.is_on_field(card) {
        return Err(not_in(card, player, Zone::Character));
    }
    p.abilities_used.insert(card);
    Ok(())
}

/// Resolve the pending trigger: the card goes from hand to trash.
pub fn apply_use_trigger(state: &mut GameState, player: PlayerId, card: CardId) -> Result<()> {
    let p = &mut state.players[player];
    if !p.remove_from_hand(card) {
        return Err(not_in(card, player, Zone::Hand));
    }
    p.trash.push_back(card);
    state.pending_trigger = None;
    Ok(())
}

/// Return the hand to the deck, reshuffle and draw a new opening hand.
pub fn apply_mulligan(state: &mut GameState, player: PlayerId) -> Result<()> {
    let hand_size = state.rules.opening_hand;
    let p = &mut state.players[player];
    if !p.mulligan_available {
        return Err(RuleViolation::MulliganUnavailable.into());
    }
    let hand = std::mem::take(&mut p.hand);
    p.deck.append(hand);
    p.mulligan_available = false;

    shuffle_deck(state, player);
    state.players[player].draw(hand_size);
    Ok(())
}

/// Shuffle a player's deck with the game RNG.
pub fn shuffle_deck(state: &mut GameState, player: PlayerId) {
    let mut cards: Vec<CardId> = state.players[player].deck.iter().copied().collect();
    state.rng.shuffle(&mut cards);
    state.players[player].deck = cards.into_iter().collect();
}

// === Battle effects ===

/// Rest a leader or character.
pub fn rest(state: &mut GameState, owner: PlayerId, card: CardId) -> Result<()> {
    let fc = state.players[owner]
        .field_card_mut(card)
        .ok_or_else(|| not_in(card, owner, Zone::Character))?;
    fc.status = CardStatus::Rested;
    Ok(())
}

/// A successful hit on `defender`'s leader.
///
/// Takes the top life card into hand, or defeats the defender when no
/// life is left. A life card with `[Trigger]` becomes the pending trigger.
pub fn take_life_damage(state: &mut GameState, defender: PlayerId) -> LifeDamage {
    let Some(card) = state.players[defender].life.pop_front() else {
        state.players[defender].defeated = true;
        info!(player = %defender, "defeated");
        return LifeDamage::Defeated;
    };
    state.players[defender].hand.push_back(card);

    let has_trigger = state
        .card(card)
        .map_or(false, |c| c.has_capability(Capability::Trigger));
    if has_trigger {
        state.pending_trigger = Some(PendingTrigger {
            player: defender,
            card,
        });
    }
    LifeDamage::LifeLost(card)
}

/// K.O. a character: it goes to the trash and its attached DON!! and
/// per-turn tracking are dropped.
pub fn ko_character(state: &mut GameState, owner: PlayerId, card: CardId) -> Result<()> {
    let p = &mut state.players[owner];
    let index = p
        .character_index(card)
        .ok_or_else(|| not_in(card, owner, Zone::Character))?;
    p.characters.remove(index);
    p.trash.push_back(card);
    p.attached_don.remove(&card);
    p.played_this_turn.remove(&card);
    p.abilities_used.remove(&card);
    Ok(())
}
