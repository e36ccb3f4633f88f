//! Prelude module for convenient imports
//!
//! ```
//! use rallycut::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Session types: `MatchTracker`, `TrackerConfig`, `SessionData`
//! - Scoring: `ScoreState`, `ScoreSnapshot`, `GameType`, `VictoryRules`, `Team`, `Winner`
//! - Rallies: `RallyManager`, `Rally`, `Segment`
//! - Timeline: `map_segments`, `DurationConvention`, `Timecode`
//! - Error handling: `Error`, `Result`

// Session types
pub use crate::config::TrackerConfig;
pub use crate::session::SessionData;
pub use crate::tracker::MatchTracker;

// Error handling
pub use crate::error::{Error, Result};

// Scoring
pub use crate::score::{GameType, ScoreSnapshot, ScoreState, Team, VictoryRules, Winner};

// Rallies
pub use crate::rally::{Rally, RallyManager, Segment};

// Timeline
pub use crate::timeline::{DurationConvention, Timecode, map_segments};

// Export format trait
pub use crate::export::ExportFormat;
