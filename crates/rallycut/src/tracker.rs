//! Editing-session coordinator.
//!
//! `MatchTracker` owns one [`ScoreState`] and one [`RallyManager`] and
//! applies each operator event to both:
//!
//! - start: snapshot the score, open a rally
//! - end: snapshot, apply the rally outcome, record the rally
//! - undo: pop the last action and restore the score it carried
//!
//! ## Example
//!
//! ```
//! use rallycut::{MatchTracker, TrackerConfig};
//!
//! let mut tracker = MatchTracker::new(TrackerConfig::default()).unwrap();
//! tracker.start_rally(10.0).unwrap();
//! let result = tracker.server_wins(15.0).unwrap();
//! assert_eq!(result.rally.score_at_start, "0-0-2");
//! assert_eq!(tracker.score_string(), "1-0-2");
//!
//! tracker.undo().unwrap();
//! assert_eq!(tracker.score_string(), "0-0-2");
//! ```

use tracing::info;

use crate::config::TrackerConfig;
use crate::error::{Error, Result};
use crate::rally::{Rally, RallyManager, Segment, UndoOutcome};
use crate::score::{ScoreState, Team, Winner};
use crate::timeline::{DurationConvention, OutputTimeline, map_segments};

/// Outcome of closing a rally
#[derive(Debug, Clone, PartialEq)]
pub struct RallyResult {
    pub rally: Rally,
    /// Score after the rally outcome was applied
    pub score: String,
    pub game_over: Option<Team>,
}

#[derive(Debug)]
pub struct MatchTracker {
    config: TrackerConfig,
    score: ScoreState,
    rallies: RallyManager,
}

impl MatchTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let score = ScoreState::new(
            config.game_type,
            config.victory_rules,
            config.player_names.clone(),
        )?;
        let rallies = RallyManager::new(config.fps)?;
        Ok(Self {
            config,
            score,
            rallies,
        })
    }

    pub(crate) fn from_parts(config: TrackerConfig, score: ScoreState, rallies: RallyManager) -> Self {
        Self {
            config,
            score,
            rallies,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn rally_manager(&self) -> &RallyManager {
        &self.rallies
    }

    pub fn score_string(&self) -> String {
        self.score.get_score_string()
    }

    pub fn game_over(&self) -> Option<Team> {
        self.score.game_over()
    }

    pub fn start_rally(&mut self, timestamp: f64) -> Result<u64> {
        self.rallies
            .start_rally(timestamp, self.score.save_snapshot())
    }

    /// Close the open rally with `winner` and apply the scoring rules.
    ///
    /// Nothing changes if the rally cannot be closed.
    pub fn end_rally(
        &mut self,
        timestamp: f64,
        winner: Winner,
        comment: Option<String>,
    ) -> Result<RallyResult> {
        if !self.rallies.is_in_rally() {
            return Err(Error::NoRallyInProgress);
        }

        let score_at_start = self.score.get_score_string();
        let before = self.score.save_snapshot();

        let mut after = self.score.clone();
        match winner {
            Winner::Server => after.server_wins(),
            Winner::Receiver => after.receiver_wins(),
        }

        let rally = self
            .rallies
            .end_rally(timestamp, winner, score_at_start, before, comment)?;
        self.score = after;

        let game_over = self.score.game_over();
        if let Some(team) = game_over {
            let [a, b] = self.score.score();
            info!("Game over: team {} wins {}-{}", team, a, b);
        }

        Ok(RallyResult {
            rally,
            score: self.score.get_score_string(),
            game_over,
        })
    }

    pub fn server_wins(&mut self, timestamp: f64) -> Result<RallyResult> {
        self.end_rally(timestamp, Winner::Server, None)
    }

    pub fn receiver_wins(&mut self, timestamp: f64) -> Result<RallyResult> {
        self.end_rally(timestamp, Winner::Receiver, None)
    }

    /// Undo the last start or end and restore the score recorded with it
    pub fn undo(&mut self) -> Result<UndoOutcome> {
        let outcome = self.rallies.undo()?;
        self.score.restore_snapshot(&outcome.action.score_before)?;
        Ok(outcome)
    }

    pub fn set_score(&mut self, score: &str) -> Result<()> {
        self.score.set_score(score)
    }

    pub fn force_side_out(&mut self) {
        self.score.force_side_out();
    }

    /// Review-mode correction: shift a recorded rally by whole frames
    pub fn update_rally_timing(
        &mut self,
        index: usize,
        start_delta: i64,
        end_delta: i64,
    ) -> Result<&Rally> {
        self.rallies.update_rally_timing(index, start_delta, end_delta)
    }

    /// Review-mode correction of the score text shown for a rally.
    ///
    /// The live score is not touched.
    pub fn update_rally_score(&mut self, index: usize, score_at_start: impl Into<String>) -> Result<()> {
        self.rallies.update_rally_score(index, score_at_start)
    }

    pub fn set_rally_comment(&mut self, index: usize, comment: Option<String>) -> Result<()> {
        self.rallies.set_rally_comment(index, comment)
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.rallies.to_segments()
    }

    pub fn timeline(&self, convention: DurationConvention) -> Result<OutputTimeline> {
        map_segments(&self.segments(), self.config.fps, convention)
    }
}
