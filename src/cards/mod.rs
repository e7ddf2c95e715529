//! Card system: card values, capabilities, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of one physical card in a game
//! - `Card`: Printed values plus derived capabilities
//! - `CapabilitySet`: Capability flags computed once per card
//! - `CapabilityOracle`: Derives capability sets from effect text
//! - `CardRegistry`: Card lookup shared by every state clone

pub mod capabilities;
pub mod definition;
pub mod registry;

pub use capabilities::{BracketOracle, Capability, CapabilityOracle, CapabilitySet};
pub use definition::{Card, CardId, CardKind};
pub use registry::CardRegistry;
