//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::cards::{Card, CardId, CardRegistry};
use crate::core::{GameRng, GameState, Phase, PlayerId, PlayerMap, RulesConfig};
use crate::game::{DeckList, GameSetup};
use crate::zones::{CardStatus, FieldCard, PlayerState};

pub const LEADER_ONE: CardId = CardId(1000);
pub const LEADER_TWO: CardId = CardId(2000);

/// Character, cost 2, power 3000, counter 1000.
pub const GRUNT: u32 = 1;
/// Character, cost 4, power 6000.
pub const BRUTE: u32 = 2;
/// Blocker, cost 2, power 5000.
pub const WALL: u32 = 3;
/// Rush, cost 3, power 4000.
pub const SPRINTER: u32 = 4;
/// Counter-only event, cost 1, +2000.
pub const GUARD: u32 = 5;
/// Stage, cost 1.
pub const SHIP: u32 = 6;
/// `[Activate: Main] [DON!! x1]` character, cost 3, power 5000.
pub const CAPTAIN: u32 = 7;
/// Event with both counter and main abilities, cost 1.
pub const SURPRISE: u32 = 8;
/// `[Trigger]` character, cost 1, power 2000. Top life card.
pub const LUCKY: u32 = 10;

fn base(player: PlayerId) -> u32 {
    1000 * (player.0 as u32 + 1)
}

/// Id of a fixture card owned by `player`.
pub fn card(player: PlayerId, offset: u32) -> CardId {
    CardId::new(base(player) + offset)
}

pub fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    for player in PlayerId::all() {
        let id = |offset| card(player, offset);
        let cards = vec![
            Card::leader(id(0), "Leader", 5000, 5),
            Card::character(id(GRUNT), "Grunt", 2, 3000).with_counter(1000),
            Card::character(id(BRUTE), "Brute", 4, 6000),
            Card::character(id(WALL), "Wall", 2, 5000).with_text("[Blocker]"),
            Card::character(id(SPRINTER), "Sprinter", 3, 4000).with_text("[Rush]"),
            Card::event(id(GUARD), "Guard Point", 1).with_text("[Counter +2000]"),
            Card::stage(id(SHIP), "Ship", 1),
            Card::character(id(CAPTAIN), "Captain", 3, 5000)
                .with_text("[Activate: Main] [DON!! x1] Give up to 1 character +1000."),
            Card::event(id(SURPRISE), "Surprise", 1)
                .with_text("[Main] Draw 1 card. [Counter +1000]"),
            Card::character(id(LUCKY), "Lucky", 1, 2000).with_text("[Trigger] Play this card."),
        ];
        let fillers = (11..=14)
            .chain(20..=29)
            .map(|offset| Card::character(id(offset), "Filler", 1, 1000));
        for c in cards.into_iter().chain(fillers) {
            registry.register(c).expect("fixture ids are unique");
        }
    }
    registry
}

fn seat(player: PlayerId) -> PlayerState {
    let id = |offset| card(player, offset);
    let mut p = PlayerState::new(player, id(0), 6);
    p.hand = (GRUNT..=CAPTAIN).map(id).collect();
    p.life = std::iter::once(LUCKY).chain(11..=14).map(id).collect();
    p.deck = (20..=29).map(id).collect();
    p.don_pool = 4;
    p.active_don = 4;
    p.first_turn = false;
    p.mulligan_available = false;
    p.turns_started = 1;
    p
}

/// Turn 3, Player 1's Main phase. Both hands hold cards 1..=7, both
/// fields hold only the leader, 4 active DON!! each.
pub fn duel() -> GameState {
    let mut state = GameState::new(
        Arc::new(registry()),
        PlayerMap::new(seat),
        RulesConfig::default(),
        PlayerId::ONE,
        GameRng::new(42),
    );
    state.turn = 3;
    state.phase = Phase::Main;
    state.players[PlayerId::ONE].turns_started = 2;
    state
}

/// Move a card from hand (if there) onto the character area.
pub fn place(state: &mut GameState, player: PlayerId, offset: u32, status: CardStatus) -> CardId {
    let id = card(player, offset);
    let p = state.player_mut(player);
    p.remove_from_hand(id);
    p.characters.push_back(FieldCard { card: id, status });
    id
}

/// Two full 50-card decks over a fresh registry, ready for `GameSetup`.
///
/// Player 1's cards are numbered from 10_000, player 2's from 20_000.
/// The deck cycles through blockers, counter characters, vanilla
/// characters, counter events and rush characters.
pub fn starter_setup() -> GameSetup {
    let mut registry = CardRegistry::new();
    let mut decks = Vec::new();
    for player in PlayerId::all() {
        let base = 10_000 * (player.0 as u32 + 1);
        let leader = CardId::new(base);
        registry
            .register(Card::leader(leader, "Captain", 5000, 5))
            .expect("fixture ids are unique");
        let cards: Vec<CardId> = (1..=50).map(|n| CardId::new(base + n)).collect();
        for &id in &cards {
            let card = match id.raw() % 5 {
                0 => Card::character(id, "Lookout", 2, 4000).with_text("[Blocker]"),
                1 => Card::character(id, "Deckhand", 1, 2000).with_counter(1000),
                2 => Card::character(id, "Bosun", 3, 5000),
                3 => Card::event(id, "Parry", 1).with_text("[Counter +2000]"),
                _ => Card::character(id, "Boarder", 4, 6000).with_text("[Rush]"),
            };
            registry.register(card).expect("fixture ids are unique");
        }
        decks.push(DeckList::new(leader, cards));
    }
    let second = decks.pop().expect("two decks");
    let first = decks.pop().expect("two decks");
    GameSetup::new(registry, first, second)
}
