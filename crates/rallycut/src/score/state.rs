use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::score::{GameType, MAX_SCORE, Serve, ScoreSnapshot, ServerNumber, Team, VictoryRules};

/// Who is serving right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo<'a> {
    pub team: Team,
    pub player_name: &'a str,
    /// `None` for singles
    pub server_number: Option<ServerNumber>,
}

/// Live score for one game and the pickleball rules that move it.
///
/// Doubles games open at "0-0-2": the first team to serve gets a single
/// server, so a fault before any point is scored is an immediate side-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    game_type: GameType,
    victory_rules: VictoryRules,
    player_names: [Vec<String>; 2],
    score: [u32; 2],
    serving_team: Team,
    serve: Serve,
}

impl ScoreState {
    pub fn new(
        game_type: GameType,
        victory_rules: VictoryRules,
        player_names: [Vec<String>; 2],
    ) -> Result<Self> {
        let roster_size = game_type.roster_size();
        for (team, names) in player_names.iter().enumerate() {
            if names.len() != roster_size {
                return Err(Error::InvalidConfig(format!(
                    "team {} needs {} player name(s) for {}, got {}",
                    team,
                    roster_size,
                    game_type,
                    names.len()
                )));
            }
        }

        let serve = match game_type {
            GameType::Singles => Serve::Singles,
            GameType::Doubles => Serve::Doubles {
                server_number: ServerNumber::Two,
                first_server_player_index: 1,
            },
        };

        Ok(Self {
            game_type,
            victory_rules,
            player_names,
            score: [0, 0],
            serving_team: Team::A,
            serve,
        })
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn victory_rules(&self) -> VictoryRules {
        self.victory_rules
    }

    pub fn player_names(&self) -> &[Vec<String>; 2] {
        &self.player_names
    }

    pub fn score(&self) -> [u32; 2] {
        self.score
    }

    pub fn serving_team(&self) -> Team {
        self.serving_team
    }

    pub fn server_number(&self) -> Option<ServerNumber> {
        self.save_snapshot().server_number()
    }

    pub fn first_server_player_index(&self) -> Option<u8> {
        self.save_snapshot().first_server_player_index()
    }

    /// Serving team wins the rally: one point, nothing else moves
    pub fn server_wins(&mut self) {
        let points = &mut self.score[self.serving_team.index()];
        *points = points.saturating_add(1);
        debug!("Server wins, score now {}", self.get_score_string());
    }

    /// Receiving team wins the rally: the serve moves, the score does not
    pub fn receiver_wins(&mut self) {
        match self.serve {
            Serve::Singles => {
                self.serving_team = self.serving_team.other();
            }
            Serve::Doubles {
                server_number,
                first_server_player_index,
            } => {
                // Opening possession has only one server
                if self.score == [0, 0] && server_number == ServerNumber::Two {
                    self.side_out();
                } else if server_number == ServerNumber::One {
                    self.serve = Serve::Doubles {
                        server_number: ServerNumber::Two,
                        first_server_player_index,
                    };
                } else {
                    self.side_out();
                }
            }
        }
        debug!("Receiver wins, score now {}", self.get_score_string());
    }

    fn side_out(&mut self) {
        self.serving_team = self.serving_team.other();
        if self.game_type.is_doubles() {
            let serving_score = self.score[self.serving_team.index()];
            self.serve = Serve::fresh_possession(serving_score, ServerNumber::One);
        }
    }

    /// Winning team, if the game has been decided under the victory rules.
    ///
    /// Timed games never finish here; the caller ends them.
    pub fn game_over(&self) -> Option<Team> {
        let target = self.victory_rules.target_score()?;
        let [a, b] = self.score;
        if a.max(b) >= target && a.abs_diff(b) >= 2 {
            Some(if a > b { Team::A } else { Team::B })
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over().is_some()
    }

    pub fn get_score_string(&self) -> String {
        self.save_snapshot().score_string()
    }

    pub fn get_server_info(&self) -> ServerInfo<'_> {
        let roster = &self.player_names[self.serving_team.index()];
        let (slot, server_number) = match self.serve {
            Serve::Singles => (0, None),
            Serve::Doubles {
                server_number,
                first_server_player_index,
            } => {
                let first = first_server_player_index as usize;
                let slot = match server_number {
                    ServerNumber::One => first,
                    ServerNumber::Two => 1 - first,
                };
                (slot, Some(server_number))
            }
        };

        ServerInfo {
            team: self.serving_team,
            player_name: roster.get(slot).map(String::as_str).unwrap_or_default(),
            server_number,
        }
    }

    /// Manually set the score from a called score string.
    ///
    /// Accepts "X-Y" for singles and "X-Y-Z" for doubles, serving team
    /// first. In doubles the edit starts a fresh possession, so the first
    /// server is re-derived from the serving score's parity.
    pub fn set_score(&mut self, score: &str) -> Result<()> {
        let parts: Vec<&str> = score.trim().split('-').map(str::trim).collect();
        let expected = if self.game_type.is_doubles() { 3 } else { 2 };
        if parts.len() != expected {
            return Err(Error::InvalidScoreFormat(format!(
                "'{}' should have {} parts for {}",
                score, expected, self.game_type
            )));
        }

        let mut values = Vec::with_capacity(expected);
        for part in &parts {
            let value: u32 = part.parse().map_err(|_| {
                Error::InvalidScoreFormat(format!("'{}' is not a number in '{}'", part, score))
            })?;
            values.push(value);
        }
        if let Some(points) = values[..2].iter().find(|&&points| points > MAX_SCORE) {
            return Err(Error::InvalidScoreFormat(format!(
                "{} in '{}' is above the maximum of {}",
                points, score, MAX_SCORE
            )));
        }

        let serve = if self.game_type.is_doubles() {
            let server_number = ServerNumber::from_u32(values[2])?;
            Serve::fresh_possession(values[0], server_number)
        } else {
            Serve::Singles
        };

        self.score[self.serving_team.index()] = values[0];
        self.score[self.serving_team.other().index()] = values[1];
        self.serve = serve;

        info!("Score manually set to {}", self.get_score_string());
        Ok(())
    }

    /// Manually hand the serve to the other team
    pub fn force_side_out(&mut self) {
        self.side_out();
        info!("Forced side-out, score now {}", self.get_score_string());
    }

    pub fn save_snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot::from_parts(self.score, self.serving_team, self.serve)
    }

    /// Restore every live field from a snapshot of the same game type
    pub fn restore_snapshot(&mut self, snapshot: &ScoreSnapshot) -> Result<()> {
        if snapshot.game_type() != self.game_type {
            return Err(Error::InvalidConfig(format!(
                "cannot restore a {} snapshot into a {} game",
                snapshot.game_type(),
                self.game_type
            )));
        }

        self.score = snapshot.score();
        self.serving_team = snapshot.serving_team();
        self.serve = snapshot.serve();
        debug!("Restored score {}", self.get_score_string());
        Ok(())
    }
}
