//! Pickleball scoring rules.
//!
//! - **ScoreState**: live score, serving team and doubles serve rotation
//! - **ScoreSnapshot**: immutable capture of the live fields, used for undo
//!   and persistence

mod enums;
mod snapshot;
mod state;

pub use enums::*;
pub use snapshot::*;
pub use state::*;
