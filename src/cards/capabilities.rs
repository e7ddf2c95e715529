//! Card capabilities.
//!
//! The engine never reads effect text while playing. Each card's
//! capabilities are derived once, when the card is built or registered,
//! into a [`CapabilitySet`]: a bitset of flags, whether the card has an
//! event `[Main]` effect, and the two numeric facts the rules consult
//! (counter value and per-capability DON!! requirement).
//!
//! Derivation is delegated to a [`CapabilityOracle`]. [`BracketOracle`]
//! recognises the bracketed keywords printed on cards, e.g.
//! `"[Activate: Main] [DON!! x2] ..."` or `"[Counter +2000]"`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Capability kinds the rules consult.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    OnPlay,
    ActiveMain,
    Blocker,
    Rush,
    Trigger,
    Counter,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::OnPlay,
        Capability::ActiveMain,
        Capability::Blocker,
        Capability::Rush,
        Capability::Trigger,
        Capability::Counter,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Capabilities of one card, computed once.
///
/// ```
/// use deckhand::cards::{Capability, CapabilitySet};
///
/// let caps = CapabilitySet::new()
///     .with(Capability::ActiveMain)
///     .with_don_cost(Capability::ActiveMain, 2);
///
/// assert!(caps.contains(Capability::ActiveMain));
/// assert_eq!(caps.don_cost_of(Capability::ActiveMain), Some(2));
/// assert_eq!(caps.don_cost_of(Capability::Blocker), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    flags: u8,
    /// Event text usable from the Main phase (`[Main]`).
    main_effect: bool,
    counter: Option<i32>,
    don_costs: SmallVec<[(Capability, u32); 2]>,
}

impl CapabilitySet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability.
    #[must_use]
    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    /// Add `Counter` with the given power bonus.
    #[must_use]
    pub fn with_counter(mut self, value: i32) -> Self {
        self.insert(Capability::Counter);
        self.counter = Some(value);
        self
    }

    /// Record the DON!! requirement of a capability, adding it if absent.
    #[must_use]
    pub fn with_don_cost(mut self, capability: Capability, cost: u32) -> Self {
        self.insert(capability);
        match self.don_costs.iter_mut().find(|(c, _)| *c == capability) {
            Some(entry) => entry.1 = cost,
            None => self.don_costs.push((capability, cost)),
        }
        self
    }

    /// Mark the card as having a `[Main]` event effect.
    #[must_use]
    pub fn with_main_effect(mut self) -> Self {
        self.main_effect = true;
        self
    }

    #[must_use]
    pub fn has_main_effect(&self) -> bool {
        self.main_effect
    }

    pub fn insert(&mut self, capability: Capability) {
        self.flags |= capability.bit();
    }

    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.flags & capability.bit() != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags == 0 && !self.main_effect
    }

    /// Counter bonus stated by the capability itself, if any.
    #[must_use]
    pub fn counter_value(&self) -> Option<i32> {
        self.counter
    }

    /// DON!! requirement attached to a capability, if any.
    #[must_use]
    pub fn don_cost_of(&self, capability: Capability) -> Option<u32> {
        self.don_costs
            .iter()
            .find(|(c, _)| *c == capability)
            .map(|(_, cost)| *cost)
    }

    /// Iterate over the capabilities present.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

/// Derives a card's capabilities from its effect text.
///
/// Implementations are consulted once per card, never during play.
pub trait CapabilityOracle {
    fn derive(&self, effect_text: &str) -> CapabilitySet;
}

/// Oracle that reads bracketed keywords.
///
/// Recognised (case-insensitive): `[On Play]`, `[Activate: Main]` or
/// `[Active Main]`, `[Blocker]`, `[Rush]`, `[Trigger]`, `[Counter +N]`,
/// and the event timing `[Main]`.
/// A `[DON!! xN]` bracket sets the requirement of the keyword before it;
/// `DON!! xN` inside the keyword bracket does the same.
#[derive(Clone, Copy, Debug, Default)]
pub struct BracketOracle;

impl BracketOracle {
    fn is_main_timing(tag: &str) -> bool {
        tag.trim().eq_ignore_ascii_case("main")
    }

    fn keyword(tag: &str) -> Option<Capability> {
        let lower = tag.trim().to_ascii_lowercase();
        let checks = [
            ("on play", Capability::OnPlay),
            ("activate: main", Capability::ActiveMain),
            ("active main", Capability::ActiveMain),
            ("blocker", Capability::Blocker),
            ("rush", Capability::Rush),
            ("trigger", Capability::Trigger),
            ("counter", Capability::Counter),
        ];
        checks
            .iter()
            .find(|(prefix, _)| lower.starts_with(prefix))
            .map(|(_, cap)| *cap)
    }

    /// Number after `marker` (e.g. `x` in `DON!! x2`, `+` in `Counter +1000`).
    fn number_after(tag: &str, marker: char) -> Option<u32> {
        let start = tag.find(marker)? + marker.len_utf8();
        let digits: String = tag[start..]
            .chars()
            .skip_while(|c| c.is_whitespace())
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }

    fn don_requirement(tag: &str) -> Option<u32> {
        let upper = tag.to_ascii_uppercase();
        let at = upper.find("DON!!")?;
        Self::number_after(&upper[at..], 'X')
    }
}

impl CapabilityOracle for BracketOracle {
    fn derive(&self, effect_text: &str) -> CapabilitySet {
        let mut set = CapabilitySet::new();
        let mut last: Option<Capability> = None;
        let mut rest = effect_text;

        while let Some(open) = rest.find('[') {
            let after = &rest[open + 1..];
            let Some(close) = after.find(']') else { break };
            let tag = &after[..close];
            rest = &after[close + 1..];

            if Self::is_main_timing(tag) {
                set.main_effect = true;
                last = None;
            } else if let Some(cap) = Self::keyword(tag) {
                set.insert(cap);
                if cap == Capability::Counter {
                    if let Some(value) = Self::number_after(tag, '+') {
                        set.counter = Some(value as i32);
                    }
                }
                if let Some(cost) = Self::don_requirement(tag) {
                    set = set.with_don_cost(cap, cost);
                }
                last = Some(cap);
            } else if let (Some(cost), Some(cap)) = (Self::don_requirement(tag), last) {
                set = set.with_don_cost(cap, cost);
            } else {
                last = None;
            }
        }

        set
    }
}
