//! Zone system for card locations.
//!
//! Each player owns a fixed set of zones (leader, characters, stages,
//! hand, deck, trash, life) plus the DON!! economy counters.
//!
//! ## Key Types
//!
//! - `PlayerState`: One player's zones and resources
//! - `FieldCard`: Leader or character with its status
//! - `CardStatus`: Active or Rested
//! - `Zone`: Zone names for lookups and errors

pub mod state;

pub use state::{CardStatus, FieldCard, PlayerState, Zone};
