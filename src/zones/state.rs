//! Per-player zone state.
//!
//! Ordered zones (deck, life, hand) are `im::Vector`s with the front as
//! the top. Field zones hold [`FieldCard`]s so status travels with the
//! card. All collections are persistent, so cloning a `PlayerState` shares
//! structure and copies on write.

use im::{OrdMap, OrdSet, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;

/// Tapped/untapped status of a card on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    Active,
    Rested,
}

/// A leader or character on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldCard {
    pub card: CardId,
    pub status: CardStatus,
}

impl FieldCard {
    #[must_use]
    pub fn active(card: CardId) -> Self {
        Self {
            card,
            status: CardStatus::Active,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == CardStatus::Active
    }
}

/// Named zones, used in lookups and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Leader,
    Character,
    Stage,
    Hand,
    Deck,
    Trash,
    Life,
}

impl Zone {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Zone::Leader => "leader area",
            Zone::Character => "character area",
            Zone::Stage => "stage area",
            Zone::Hand => "hand",
            Zone::Deck => "deck",
            Zone::Trash => "trash",
            Zone::Life => "life",
        }
    }
}

/// Everything one player owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub leader: FieldCard,
    pub characters: Vector<FieldCard>,
    pub stages: Vector<CardId>,
    pub hand: Vector<CardId>,
    /// Front is the top card.
    pub deck: Vector<CardId>,
    pub trash: Vector<CardId>,
    /// Face-down life cards, front is taken first.
    pub life: Vector<CardId>,

    /// DON!! cards not yet moved to the pool.
    pub don_deck: u32,
    /// Lifetime DON!! total, never decreases.
    pub don_pool: u32,
    /// Spendable DON!!.
    pub active_don: u32,
    /// DON!! attached to the leader or characters.
    pub attached_don: OrdMap<CardId, u32>,

    pub played_this_turn: OrdSet<CardId>,
    /// Cards whose `[Activate: Main]` was used this turn.
    pub abilities_used: OrdSet<CardId>,
    pub first_turn: bool,
    /// Turns this player has started.
    pub turns_started: u32,
    pub defeated: bool,
    pub mulligan_available: bool,
}

impl PlayerState {
    /// Empty zones around a leader. Setup fills deck, life and hand.
    #[must_use]
    pub fn new(id: PlayerId, leader: CardId, don_deck: u32) -> Self {
        Self {
            id,
            leader: FieldCard::active(leader),
            characters: Vector::new(),
            stages: Vector::new(),
            hand: Vector::new(),
            deck: Vector::new(),
            trash: Vector::new(),
            life: Vector::new(),
            don_deck,
            don_pool: 0,
            active_don: 0,
            attached_don: OrdMap::new(),
            played_this_turn: OrdSet::new(),
            abilities_used: OrdSet::new(),
            first_turn: true,
            turns_started: 0,
            defeated: false,
            mulligan_available: true,
        }
    }

    // === Field ===

    #[must_use]
    pub fn character_index(&self, card: CardId) -> Option<usize> {
        self.characters.iter().position(|fc| fc.card == card)
    }

    #[must_use]
    pub fn character(&self, card: CardId) -> Option<&FieldCard> {
        self.characters.iter().find(|fc| fc.card == card)
    }

    /// Leader or character with this id.
    #[must_use]
    pub fn field_card(&self, card: CardId) -> Option<&FieldCard> {
        if self.leader.card == card {
            Some(&self.leader)
        } else {
            self.character(card)
        }
    }

    pub fn field_card_mut(&mut self, card: CardId) -> Option<&mut FieldCard> {
        if self.leader.card == card {
            return Some(&mut self.leader);
        }
        let index = self.character_index(card)?;
        self.characters.get_mut(index)
    }

    #[must_use]
    pub fn is_leader(&self, card: CardId) -> bool {
        self.leader.card == card
    }

    #[must_use]
    pub fn is_on_field(&self, card: CardId) -> bool {
        self.field_card(card).is_some()
    }

    /// Ids of the leader and every character, leader first.
    pub fn field_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        std::iter::once(self.leader.card).chain(self.characters.iter().map(|fc| fc.card))
    }

    // === Hand ===

    #[must_use]
    pub fn in_hand(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Remove a card from hand. Returns false if it was not there.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        match self.hand.index_of(&card) {
            Some(index) => {
                self.hand.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move up to `count` cards from the top of the deck to hand.
    ///
    /// Returns how many were drawn.
    pub fn draw(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            match self.deck.pop_front() {
                Some(card) => {
                    self.hand.push_back(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    // === DON!! ===

    #[must_use]
    pub fn attached(&self, card: CardId) -> u32 {
        self.attached_don.get(&card).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_attached(&self) -> u32 {
        self.attached_don.values().sum()
    }

    // === Lookup ===

    /// Zone currently holding `card`, if this player owns it.
    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        if self.leader.card == card {
            Some(Zone::Leader)
        } else if self.character(card).is_some() {
            Some(Zone::Character)
        } else if self.stages.contains(&card) {
            Some(Zone::Stage)
        } else if self.hand.contains(&card) {
            Some(Zone::Hand)
        } else if self.deck.contains(&card) {
            Some(Zone::Deck)
        } else if self.trash.contains(&card) {
            Some(Zone::Trash)
        } else if self.life.contains(&card) {
            Some(Zone::Life)
        } else {
            None
        }
    }

    /// Every card id this player holds, across all zones.
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.field_ids()
            .chain(self.stages.iter().copied())
            .chain(self.hand.iter().copied())
            .chain(self.deck.iter().copied())
            .chain(self.trash.iter().copied())
            .chain(self.life.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        let mut p = PlayerState::new(PlayerId::ONE, CardId::new(100), 10);
        p.deck = (1..=5).map(CardId::new).collect();
        p
    }

    #[test]
    fn test_new_player() {
        let p = PlayerState::new(PlayerId::TWO, CardId::new(7), 10);
        assert_eq!(p.leader, FieldCard::active(CardId::new(7)));
        assert_eq!(p.don_deck, 10);
        assert_eq!(p.don_pool, 0);
        assert!(p.first_turn);
        assert!(p.mulligan_available);
        assert!(!p.defeated);
    }

    #[test]
    fn test_draw_from_top() {
        let mut p = player();
        assert_eq!(p.draw(2), 2);
        assert_eq!(p.hand, Vector::from(vec![CardId::new(1), CardId::new(2)]));
        assert_eq!(p.deck.front(), Some(&CardId::new(3)));

        assert_eq!(p.draw(10), 3);
        assert!(p.deck.is_empty());
        assert_eq!(p.draw(1), 0);
    }

    #[test]
    fn test_remove_from_hand() {
        let mut p = player();
        p.draw(3);
        assert!(p.remove_from_hand(CardId::new(2)));
        assert!(!p.remove_from_hand(CardId::new(2)));
        assert_eq!(p.hand.len(), 2);
    }

    #[test]
    fn test_field_lookup() {
        let mut p = player();
        p.characters.push_back(FieldCard::active(CardId::new(20)));

        assert!(p.is_leader(CardId::new(100)));
        assert!(p.is_on_field(CardId::new(20)));
        assert!(!p.is_on_field(CardId::new(1)));
        assert_eq!(p.field_ids().collect::<Vec<_>>(), vec![CardId::new(100), CardId::new(20)]);

        p.field_card_mut(CardId::new(20)).unwrap().status = CardStatus::Rested;
        assert!(!p.character(CardId::new(20)).unwrap().is_active());
    }

    #[test]
    fn test_zone_of_and_all_cards() {
        let mut p = player();
        p.draw(1);
        p.life.push_back(CardId::new(50));

        assert_eq!(p.zone_of(CardId::new(100)), Some(Zone::Leader));
        assert_eq!(p.zone_of(CardId::new(1)), Some(Zone::Hand));
        assert_eq!(p.zone_of(CardId::new(2)), Some(Zone::Deck));
        assert_eq!(p.zone_of(CardId::new(50)), Some(Zone::Life));
        assert_eq!(p.zone_of(CardId::new(999)), None);
        assert_eq!(p.all_cards().count(), 7);
    }

    #[test]
    fn test_attached_totals() {
        let mut p = player();
        p.attached_don.insert(CardId::new(100), 2);
        p.attached_don.insert(CardId::new(20), 1);

        assert_eq!(p.attached(CardId::new(100)), 2);
        assert_eq!(p.attached(CardId::new(3)), 0);
        assert_eq!(p.total_attached(), 3);
    }
}
