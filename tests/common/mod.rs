//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use deckhand::cards::{Card, CardId, CardRegistry};
use deckhand::core::{GameRng, GameState, Phase, PlayerId, PlayerMap, RulesConfig};
use deckhand::game::{DeckList, GameSetup};
use deckhand::zones::{CardStatus, FieldCard, PlayerState};

pub const P1: PlayerId = PlayerId::ONE;
pub const P2: PlayerId = PlayerId::TWO;

/// Character, cost 3, power 6000.
pub const RAIDER: u32 = 1;
/// Character, cost 2, power 4000.
pub const SCOUT: u32 = 2;
/// Blocker, cost 2, power 5000.
pub const SENTINEL: u32 = 3;
/// Rush, cost 3, power 4000.
pub const RUNNER: u32 = 4;
/// Counter event, cost 1, +2000.
pub const PARRY: u32 = 5;
/// Character, cost 1, power 1000.
pub const DECKHAND: u32 = 6;
/// Event with a `[Main]` effect and `[Counter +1000]`, cost 1. Not dealt.
pub const RALLY: u32 = 7;

/// Leader id of `player`: power 5000, life 5.
pub fn leader(player: PlayerId) -> CardId {
    CardId::new(100 * (player.0 as u32 + 1))
}

/// Id of a fixture card owned by `player`.
pub fn id(player: PlayerId, offset: u32) -> CardId {
    CardId::new(1000 * (player.0 as u32 + 1) + offset)
}

pub fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    for player in PlayerId::all() {
        let cards = [
            Card::leader(leader(player), "Leader", 5000, 5),
            Card::character(id(player, RAIDER), "Raider", 3, 6000),
            Card::character(id(player, SCOUT), "Scout", 2, 4000),
            Card::character(id(player, SENTINEL), "Sentinel", 2, 5000).with_text("[Blocker]"),
            Card::character(id(player, RUNNER), "Runner", 3, 4000).with_text("[Rush]"),
            Card::event(id(player, PARRY), "Parry", 1).with_text("[Counter +2000]"),
            Card::character(id(player, DECKHAND), "Deckhand", 1, 1000),
            Card::event(id(player, RALLY), "Rally", 1).with_text("[Main] Draw 1 card. [Counter +1000]"),
        ];
        for card in cards {
            registry.register(card).unwrap();
        }
        for offset in 10..=19 {
            registry
                .register(Card::character(id(player, offset), "Filler", 1, 1000))
                .unwrap();
        }
    }
    registry
}

fn seat(player: PlayerId) -> PlayerState {
    let mut p = PlayerState::new(player, leader(player), 4);
    p.hand = (RAIDER..=DECKHAND).map(|o| id(player, o)).collect();
    p.life = (10..=14).map(|o| id(player, o)).collect();
    p.deck = (15..=19).map(|o| id(player, o)).collect();
    p.don_pool = 6;
    p.active_don = 6;
    p.first_turn = false;
    p.turns_started = 1;
    p.mulligan_available = false;
    p
}

/// Turn 3, Player 1's Main phase, empty character areas, 6 active DON!!
/// each, hands holding offsets 1..=6.
pub fn table() -> GameState {
    let mut state = GameState::new(
        Arc::new(registry()),
        PlayerMap::new(seat),
        RulesConfig::default(),
        P1,
        GameRng::new(7),
    );
    state.turn = 3;
    state.phase = Phase::Main;
    state.players[P1].turns_started = 2;
    state
}

/// Put a card from hand (or nowhere) into the character area.
pub fn field(state: &mut GameState, player: PlayerId, offset: u32, status: CardStatus) -> CardId {
    let card = id(player, offset);
    let p = state.player_mut(player);
    p.remove_from_hand(card);
    p.characters.push_back(FieldCard { card, status });
    card
}

/// Two legal 50-card decks over a fresh registry.
pub fn full_setup(seed: u64) -> GameSetup {
    let mut registry = CardRegistry::new();
    let mut lists = Vec::new();
    for player in PlayerId::all() {
        let base = 10_000 * (player.0 as u32 + 1);
        let leader = CardId::new(base);
        registry.register(Card::leader(leader, "Leader", 5000, 5)).unwrap();
        let cards: Vec<CardId> = (1..=50).map(|n| CardId::new(base + n)).collect();
        for &card in &cards {
            let def = match card.raw() % 4 {
                0 => Card::character(card, "Sentinel", 2, 5000).with_text("[Blocker]"),
                1 => Card::character(card, "Raider", 3, 6000),
                2 => Card::event(card, "Parry", 1).with_text("[Counter +2000]"),
                _ => Card::character(card, "Scout", 2, 4000).with_counter(1000),
            };
            registry.register(def).unwrap();
        }
        lists.push(DeckList::new(leader, cards));
    }
    let second = lists.pop().unwrap();
    let first = lists.pop().unwrap();
    GameSetup::new(registry, first, second).with_seed(seed)
}
