//! Game setup from two deck lists.
//!
//! [`GameSetup`] checks both decks, then for each player shuffles the deck
//! with the game RNG, sets aside as many life cards as the leader's life,
//! deals the opening hand and leaves the remainder as the deck. DON!! decks
//! start full with an empty pool. The resulting state sits at turn 1,
//! Refresh, with mulligans still available.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::info;

use crate::cards::{CardId, CardKind, CardRegistry};
use crate::core::{GameConfig, GameRng, GameState, PlayerId, PlayerMap};
use crate::error::{EngineError, Result};
use crate::zones::PlayerState;

/// A leader and the main deck that goes with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckList {
    pub leader: CardId,
    pub cards: Vec<CardId>,
}

impl DeckList {
    #[must_use]
    pub fn new(leader: CardId, cards: Vec<CardId>) -> Self {
        Self { leader, cards }
    }
}

/// Builder for an initial [`GameState`].
#[derive(Clone, Debug)]
pub struct GameSetup {
    registry: Arc<CardRegistry>,
    decks: PlayerMap<DeckList>,
    config: GameConfig,
}

impl GameSetup {
    pub fn new(registry: impl Into<Arc<CardRegistry>>, first: DeckList, second: DeckList) -> Self {
        Self {
            registry: registry.into(),
            decks: PlayerMap::from_pair(first, second),
            config: GameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.config.starting_player = player;
        self
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Check both decks without building anything.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for (player, deck) in self.decks.iter() {
            self.validate_deck(player, deck)?;
            for &id in std::iter::once(&deck.leader).chain(deck.cards.iter()) {
                if !seen.insert(id) {
                    return Err(EngineError::DuplicateCard(id));
                }
            }
        }
        Ok(())
    }

    fn validate_deck(&self, player: PlayerId, deck: &DeckList) -> Result<()> {
        let rules = &self.config.rules;
        let leader = self.registry.require(deck.leader)?;
        if leader.kind != CardKind::Leader {
            return Err(EngineError::InvalidDeck(format!(
                "{player}'s leader slot holds {}, which is not a leader",
                deck.leader
            )));
        }
        if deck.cards.len() != rules.deck_size {
            return Err(EngineError::InvalidDeck(format!(
                "{player}'s deck has {} cards, expected {}",
                deck.cards.len(),
                rules.deck_size
            )));
        }
        for &id in &deck.cards {
            if self.registry.require(id)?.kind == CardKind::Leader {
                return Err(EngineError::InvalidDeck(format!("{player}'s deck contains leader {id}")));
            }
        }
        let needed = leader.life as usize + rules.opening_hand;
        if needed > deck.cards.len() {
            return Err(EngineError::InvalidDeck(format!(
                "{player}'s deck cannot cover {} life cards and an opening hand of {}",
                leader.life, rules.opening_hand
            )));
        }
        Ok(())
    }

    /// Validate, shuffle and deal.
    pub fn build(self) -> Result<GameState> {
        self.validate()?;
        let rules = self.config.rules.clone();
        let mut rng = GameRng::new(self.config.seed);

        let mut seat = |player: PlayerId| -> Result<PlayerState> {
            let deck = self.decks.get(player);
            let life = self.registry.require(deck.leader)?.life as usize;

            let mut cards = deck.cards.clone();
            rng.shuffle(&mut cards);
            let mut rest = cards.into_iter();

            let mut state = PlayerState::new(player, deck.leader, rules.don_deck_size);
            state.life = rest.by_ref().take(life).collect();
            state.hand = rest.by_ref().take(rules.opening_hand).collect();
            state.deck = rest.collect();
            Ok(state)
        };
        let first = seat(PlayerId::ONE)?;
        let second = seat(PlayerId::TWO)?;

        info!(
            seed = self.config.seed,
            starting_player = %self.config.starting_player,
            "game set up"
        );
        Ok(GameState::new(
            self.registry,
            PlayerMap::from_pair(first, second),
            rules,
            self.config.starting_player,
            rng,
        ))
    }
}
