//! Rules: legality, state transitions, and game outcome.
//!
//! - `validator`: `validate` and `legal_actions`
//! - `transitions`: every named mutation of `GameState`
//! - `result`: `GameResult`

pub mod result;
pub mod transitions;
pub mod validator;

pub use result::GameResult;
pub use transitions::{apply, LifeDamage, RefreshOutcome};
pub use validator::{legal_actions, validate};
