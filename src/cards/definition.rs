//! Card values.
//!
//! Every physical card in a game has its own [`CardId`], so two copies of
//! the same printed card are distinct ids. A [`Card`] holds the printed
//! values plus the capability set derived from its effect text.

use serde::{Deserialize, Serialize};

use super::capabilities::{Capability, CapabilityOracle, CapabilitySet};

/// Unique identifier for a card in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Printed card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Leader,
    Character,
    Event,
    Stage,
}

/// Static card data.
///
/// ## Example
///
/// ```
/// use deckhand::cards::{Capability, Card, CardId};
///
/// let zoro = Card::character(CardId::new(1), "Zoro", 3, 5000)
///     .with_counter(1000)
///     .with_text("[Rush]");
///
/// assert!(zoro.has_capability(Capability::Rush));
/// assert_eq!(zoro.counter_value(), Some(1000));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    /// DON!! cost to play. Leaders have none.
    pub cost: u32,
    /// Base power. Events and stages have none.
    pub power: i32,
    /// Printed counter value (0 when absent).
    pub counter: i32,
    /// Leader life. Zero for other kinds.
    pub life: u32,
    pub effect_text: String,
    pub capabilities: CapabilitySet,
}

impl Card {
    fn base(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            cost: 0,
            power: 0,
            counter: 0,
            life: 0,
            effect_text: String::new(),
            capabilities: CapabilitySet::new(),
        }
    }

    #[must_use]
    pub fn leader(id: CardId, name: impl Into<String>, power: i32, life: u32) -> Self {
        Self {
            power,
            life,
            ..Self::base(id, name, CardKind::Leader)
        }
    }

    #[must_use]
    pub fn character(id: CardId, name: impl Into<String>, cost: u32, power: i32) -> Self {
        Self {
            cost,
            power,
            ..Self::base(id, name, CardKind::Character)
        }
    }

    #[must_use]
    pub fn event(id: CardId, name: impl Into<String>, cost: u32) -> Self {
        Self {
            cost,
            ..Self::base(id, name, CardKind::Event)
        }
    }

    #[must_use]
    pub fn stage(id: CardId, name: impl Into<String>, cost: u32) -> Self {
        Self {
            cost,
            ..Self::base(id, name, CardKind::Stage)
        }
    }

    /// Set the printed counter value.
    #[must_use]
    pub fn with_counter(mut self, counter: i32) -> Self {
        self.counter = counter;
        self
    }

    /// Set the effect text and derive capabilities with the bracket oracle.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_text_from(text, &super::capabilities::BracketOracle)
    }

    /// Set the effect text and derive capabilities with `oracle`.
    #[must_use]
    pub fn with_text_from(mut self, text: impl Into<String>, oracle: &dyn CapabilityOracle) -> Self {
        self.effect_text = text.into();
        self.capabilities = oracle.derive(&self.effect_text);
        self
    }

    /// Replace the capability set directly.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn is_leader(&self) -> bool {
        self.kind == CardKind::Leader
    }

    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Power this card adds when used as a counter.
    ///
    /// The capability's stated bonus wins over the printed value.
    /// `None` when the card cannot counter.
    #[must_use]
    pub fn counter_value(&self) -> Option<i32> {
        if let Some(value) = self.capabilities.counter_value() {
            return Some(value);
        }
        (self.counter > 0).then_some(self.counter)
    }

    /// DON!! requirement of one of this card's capabilities.
    #[must_use]
    pub fn don_cost_of(&self, capability: Capability) -> Option<u32> {
        self.capabilities.don_cost_of(capability)
    }

    /// Events with `[Counter]` and no `[Main]` effect: usable only as a
    /// battle counter.
    #[must_use]
    pub fn is_counter_only(&self) -> bool {
        self.kind == CardKind::Event
            && self.has_capability(Capability::Counter)
            && !self.capabilities.has_main_effect()
    }
}
