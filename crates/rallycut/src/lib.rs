//! # rallycut
//!
//! Rally tracking and scoring engine for recorded pickleball matches.
//!
//! This crate provides:
//! - Pickleball scoring rules for singles and doubles (`ScoreState`)
//! - An undo-capable rally log with reaction-time padding (`RallyManager`)
//! - Output-timeline placement of rally segments and timecode rendering
//! - Segment exporters and session serialization
//!
//! All operations are synchronous and single-owner; the editing session
//! (`MatchTracker`) applies one operator event at a time.

pub mod config;
pub mod error;
pub mod export;
pub mod prelude;
pub mod rally;
pub mod score;
pub mod session;
pub mod timeline;
pub mod tracker;

pub use config::{TrackerConfig, TrackerConfigBuilder};
pub use error::{Error, Result};
pub use export::{
    ExportFormat, JsonExporter, SubtitleCue, TsvExporter, export_segments_json,
    parse_segments_json, subtitle_cues,
};
pub use rally::{Action, ActionType, Rally, RallyManager, RallyPhase, Segment, UndoOutcome};
pub use score::{
    GameType, MAX_SCORE, ScoreSnapshot, ScoreState, Serve, ServerInfo, ServerNumber, Team,
    VictoryRules, Winner,
};
pub use session::{SESSION_VERSION, SessionData};
pub use timeline::{
    DurationConvention, OutputTimeline, Timecode, TimelineEntry, frame_to_seconds, map_segments,
};
pub use tracker::{MatchTracker, RallyResult};
