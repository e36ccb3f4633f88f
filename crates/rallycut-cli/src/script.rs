//! Event scripts: a recorded sequence of operator button presses.
//!
//! ```toml
//! [game]
//! fps = 60.0
//! type = "doubles"
//! rules = "11"
//! team_a = ["Ana", "Ari"]
//! team_b = ["Ben", "Bo"]
//!
//! [[events]]
//! action = "start"
//! at = 10.0
//!
//! [[events]]
//! action = "server"
//! at = 15.0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rallycut::config::{DEFAULT_FPS, default_player_names};
use rallycut::{GameType, TrackerConfig, VictoryRules};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub game: GameSection,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameSection {
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default, rename = "type")]
    pub game_type: GameType,
    #[serde(default)]
    pub rules: VictoryRules,
    pub team_a: Option<Vec<String>>,
    pub team_b: Option<Vec<String>>,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            game_type: GameType::default(),
            rules: VictoryRules::default(),
            team_a: None,
            team_b: None,
        }
    }
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

/// One operator action; `at` is the player position in seconds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Event {
    Start {
        at: f64,
    },
    Server {
        at: f64,
        comment: Option<String>,
    },
    Receiver {
        at: f64,
        comment: Option<String>,
    },
    Undo,
    SideOut,
    SetScore {
        score: String,
    },
}

impl Script {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn tracker_config(&self) -> Result<TrackerConfig> {
        let defaults = default_player_names(self.game.game_type);
        let [default_a, default_b] = defaults;
        let config = TrackerConfig::builder()
            .fps(self.game.fps)
            .game_type(self.game.game_type)
            .victory_rules(self.game.rules)
            .player_names(
                self.game.team_a.clone().unwrap_or(default_a),
                self.game.team_b.clone().unwrap_or(default_b),
            )
            .build()?;
        Ok(config)
    }
}
