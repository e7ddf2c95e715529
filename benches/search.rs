//! Criterion benchmarks for lookahead cost.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use deckhand::agents::{simulate, MinimaxAgent, MinimaxConfig};
use deckhand::cards::{Card, CardId, CardRegistry};
use deckhand::core::{Action, GameState, Phase, PlayerId};
use deckhand::game::{DeckList, GameSetup};
use deckhand::rules::transitions;

/// Starting player's first Main phase in a freshly dealt game.
fn opening_main() -> GameState {
    let mut registry = CardRegistry::new();
    let mut decks = Vec::new();
    for player in PlayerId::all() {
        let base = 10_000 * (u32::from(player.0) + 1);
        registry.register(Card::leader(CardId::new(base), "Leader", 5000, 5)).unwrap();
        let cards: Vec<CardId> = (1..=50).map(|n| CardId::new(base + n)).collect();
        for &card in &cards {
            let def = match card.raw() % 3 {
                0 => Card::character(card, "Sentinel", 2, 5000).with_text("[Blocker]"),
                1 => Card::character(card, "Raider", 1, 3000).with_counter(1000),
                _ => Card::character(card, "Runner", 2, 4000).with_text("[Rush]"),
            };
            registry.register(def).unwrap();
        }
        decks.push(DeckList::new(CardId::new(base), cards));
    }
    let second = decks.pop().unwrap();
    let first = decks.pop().unwrap();

    let mut state = GameSetup::new(registry, first, second).with_seed(42).build().unwrap();
    let player = state.active_player;
    state.players[player].mulligan_available = false;
    transitions::refresh(&mut state, player);
    while state.phase != Phase::Main {
        transitions::advance(&mut state);
    }
    state
}

fn benchmark_state_clone(c: &mut Criterion) {
    let state = opening_main();
    c.bench_function("state_clone", |b| b.iter(|| black_box(state.clone())));
}

fn benchmark_simulate_pass(c: &mut Criterion) {
    let state = opening_main();
    let pass = Action::pass(state.active_player);
    c.bench_function("simulate_pass", |b| b.iter(|| simulate(black_box(&state), &pass)));
}

fn benchmark_minimax_search(c: &mut Criterion) {
    let state = opening_main();
    let player = state.active_player;
    for depth in [1, 2, 3] {
        c.bench_function(&format!("minimax_depth_{depth}"), |b| {
            b.iter_batched(
                || MinimaxAgent::new(player, MinimaxConfig::default().with_depth(depth)),
                |mut agent| black_box(agent.search(&state)),
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(
    benches,
    benchmark_state_clone,
    benchmark_simulate_pass,
    benchmark_minimax_search
);
criterion_main!(benches);
