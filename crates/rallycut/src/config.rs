//! Tracker configuration and timing constants.

use crate::error::{Error, Result};
use crate::score::{GameType, VictoryRules};

/// Offsets applied to operator-marked timestamps to absorb reaction lag
pub mod padding {
    /// Subtracted from the rally start press (seconds)
    pub const START_SECS: f64 = 0.5;
    /// Added to the rally end press (seconds)
    pub const END_SECS: f64 = 1.0;
}

pub const DEFAULT_FPS: f64 = 60.0;

/// Reject frame rates that would make frame arithmetic meaningless
pub fn check_fps(fps: f64) -> Result<f64> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(Error::InvalidFrameRate(fps))
    }
}

/// Configuration for one tracked game
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Frame rate of the source video
    pub fps: f64,
    pub game_type: GameType,
    pub victory_rules: VictoryRules,
    /// Roster per team: one name for singles, two for doubles
    pub player_names: [Vec<String>; 2],
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            game_type: GameType::default(),
            victory_rules: VictoryRules::default(),
            player_names: default_player_names(GameType::default()),
        }
    }
}

impl TrackerConfig {
    /// Create a new configuration builder
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }
}

/// Placeholder roster ("Team A 1", "Team A 2", ...)
pub fn default_player_names(game_type: GameType) -> [Vec<String>; 2] {
    let roster = |team: &str| {
        (1..=game_type.roster_size())
            .map(|n| format!("Team {} {}", team, n))
            .collect::<Vec<String>>()
    };
    [roster("A"), roster("B")]
}

/// Builder for TrackerConfig
#[derive(Debug, Clone, Default)]
pub struct TrackerConfigBuilder {
    fps: Option<f64>,
    game_type: Option<GameType>,
    victory_rules: Option<VictoryRules>,
    player_names: Option<[Vec<String>; 2]>,
}

impl TrackerConfigBuilder {
    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn game_type(mut self, game_type: GameType) -> Self {
        self.game_type = Some(game_type);
        self
    }

    pub fn victory_rules(mut self, victory_rules: VictoryRules) -> Self {
        self.victory_rules = Some(victory_rules);
        self
    }

    pub fn player_names(mut self, team_a: Vec<String>, team_b: Vec<String>) -> Self {
        self.player_names = Some([team_a, team_b]);
        self
    }

    /// Build the configuration.
    ///
    /// Without explicit names a placeholder roster sized for the game type
    /// is used. Roster sizes themselves are checked by `ScoreState::new`.
    pub fn build(self) -> Result<TrackerConfig> {
        let default = TrackerConfig::default();
        let game_type = self.game_type.unwrap_or(default.game_type);
        Ok(TrackerConfig {
            fps: check_fps(self.fps.unwrap_or(default.fps))?,
            game_type,
            victory_rules: self.victory_rules.unwrap_or(default.victory_rules),
            player_names: self
                .player_names
                .unwrap_or_else(|| default_player_names(game_type)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_fps() {
        assert_eq!(check_fps(29.97).unwrap(), 29.97);
        assert!(matches!(check_fps(0.0), Err(Error::InvalidFrameRate(_))));
        assert!(matches!(check_fps(-30.0), Err(Error::InvalidFrameRate(_))));
        assert!(matches!(check_fps(f64::NAN), Err(Error::InvalidFrameRate(_))));
        assert!(matches!(
            check_fps(f64::INFINITY),
            Err(Error::InvalidFrameRate(_))
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = TrackerConfig::builder().build().unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.player_names[0].len(), 2);
    }

    #[test]
    fn test_builder_singles_default_roster() {
        let config = TrackerConfig::builder()
            .game_type(GameType::Singles)
            .fps(30.0)
            .build()
            .unwrap();
        assert_eq!(config.fps, 30.0);
        assert_eq!(
            config.player_names,
            [vec!["Team A 1".to_string()], vec!["Team B 1".to_string()]]
        );
    }

    #[test]
    fn test_builder_rejects_bad_fps() {
        let result = TrackerConfig::builder().fps(0.0).build();
        assert!(matches!(result, Err(Error::InvalidFrameRate(_))));
    }
}
