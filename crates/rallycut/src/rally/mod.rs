//! Rally log and undo stack.
//!
//! The manager has two phases, waiting and in-rally. Every start and end
//! pushes an [`Action`] carrying the score snapshot taken before it, so undo
//! can restore the score without inverting the scoring rules.

mod action;
mod manager;
#[allow(clippy::module_inception)]
mod rally;

pub use action::*;
pub use manager::*;
pub use rally::*;
