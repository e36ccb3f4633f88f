//! Session serialization.
//!
//! Only the rally log and the live score are saved. The undo stack is not
//! part of a session, so a resumed session starts with nothing to undo.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::error::{Error, Result};
use crate::rally::{Rally, RallyManager};
use crate::score::{GameType, ScoreSnapshot, ScoreState, VictoryRules};
use crate::tracker::MatchTracker;

/// Current session format version
pub const SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub fps: f64,
    pub game_type: GameType,
    pub victory_rules: VictoryRules,
    pub player_names: [Vec<String>; 2],
    pub score: ScoreSnapshot,
    pub rallies: Vec<Rally>,
}

impl SessionData {
    pub fn capture(tracker: &MatchTracker) -> Self {
        let config = tracker.config();
        Self {
            version: SESSION_VERSION,
            saved_at: Utc::now(),
            fps: config.fps,
            game_type: config.game_type,
            victory_rules: config.victory_rules,
            player_names: config.player_names.clone(),
            score: tracker.score_state().save_snapshot(),
            rallies: tracker.rally_manager().rallies().to_vec(),
        }
    }

    /// Rebuild a tracker from the saved log and score
    pub fn restore(self) -> Result<MatchTracker> {
        if self.version > SESSION_VERSION {
            return Err(Error::InvalidConfig(format!(
                "session version {} is newer than supported version {}",
                self.version, SESSION_VERSION
            )));
        }

        let config = TrackerConfig {
            fps: self.fps,
            game_type: self.game_type,
            victory_rules: self.victory_rules,
            player_names: self.player_names,
        };
        let mut score = ScoreState::new(
            config.game_type,
            config.victory_rules,
            config.player_names.clone(),
        )?;
        score.restore_snapshot(&self.score)?;
        let rallies = RallyManager::from_rallies(config.fps, self.rallies)?;

        debug!(
            "Restored session with {} rallies at {}",
            rallies.rally_count(),
            score.get_score_string()
        );
        Ok(MatchTracker::from_parts(config, score, rallies))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Saved session to {}", path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}
