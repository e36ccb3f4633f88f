use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::score::{GameType, ServerNumber, Team};

/// Highest point total accepted from a manual edit or a saved snapshot
pub const MAX_SCORE: u32 = 999;

/// Serve rotation state whose shape depends on the game type.
///
/// Singles carries nothing beyond the serving team. Doubles tracks which
/// partner is serving and which roster slot counts as "server 1" for the
/// current possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Serve {
    Singles,
    Doubles {
        server_number: ServerNumber,
        first_server_player_index: u8,
    },
}

impl Serve {
    pub fn game_type(&self) -> GameType {
        match self {
            Self::Singles => GameType::Singles,
            Self::Doubles { .. } => GameType::Doubles,
        }
    }

    /// Doubles serve state at the start of a possession.
    ///
    /// Server 1 is roster slot 0 when the serving team's score is even,
    /// slot 1 when it is odd.
    pub fn fresh_possession(serving_score: u32, server_number: ServerNumber) -> Self {
        Self::Doubles {
            server_number,
            first_server_player_index: (serving_score % 2) as u8,
        }
    }
}

/// Immutable capture of the live score, stored on the undo stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRepr", into = "SnapshotRepr")]
pub struct ScoreSnapshot {
    score: [u32; 2],
    serving_team: Team,
    serve: Serve,
}

impl ScoreSnapshot {
    pub fn new(score: [u32; 2], serving_team: Team, serve: Serve) -> Result<Self> {
        if let Some(points) = score.iter().find(|&&points| points > MAX_SCORE) {
            return Err(Error::InvalidScoreFormat(format!(
                "{} points is above the maximum of {}",
                points, MAX_SCORE
            )));
        }
        if let Serve::Doubles {
            first_server_player_index,
            ..
        } = serve
        {
            if first_server_player_index > 1 {
                return Err(Error::InvalidConfig(format!(
                    "first server player index must be 0 or 1, got {}",
                    first_server_player_index
                )));
            }
        }
        Ok(Self {
            score,
            serving_team,
            serve,
        })
    }

    pub(crate) fn from_parts(score: [u32; 2], serving_team: Team, serve: Serve) -> Self {
        Self {
            score,
            serving_team,
            serve,
        }
    }

    pub fn score(&self) -> [u32; 2] {
        self.score
    }

    pub fn serving_team(&self) -> Team {
        self.serving_team
    }

    pub fn serve(&self) -> Serve {
        self.serve
    }

    pub fn game_type(&self) -> GameType {
        self.serve.game_type()
    }

    /// `None` for singles
    pub fn server_number(&self) -> Option<ServerNumber> {
        match self.serve {
            Serve::Singles => None,
            Serve::Doubles { server_number, .. } => Some(server_number),
        }
    }

    /// `None` for singles
    pub fn first_server_player_index(&self) -> Option<u8> {
        match self.serve {
            Serve::Singles => None,
            Serve::Doubles {
                first_server_player_index,
                ..
            } => Some(first_server_player_index),
        }
    }

    pub fn serving_score(&self) -> u32 {
        self.score[self.serving_team.index()]
    }

    pub fn receiving_score(&self) -> u32 {
        self.score[self.serving_team.other().index()]
    }

    /// Score as called before the serve: serving team first, then the
    /// receiving team, then the server number in doubles ("4-2" / "4-2-1")
    pub fn score_string(&self) -> String {
        match self.serve {
            Serve::Singles => format!("{}-{}", self.serving_score(), self.receiving_score()),
            Serve::Doubles { server_number, .. } => format!(
                "{}-{}-{}",
                self.serving_score(),
                self.receiving_score(),
                server_number
            ),
        }
    }
}

/// Flat wire shape shared with the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotRepr {
    score: [u32; 2],
    serving_team: u8,
    server_number: Option<u8>,
    first_server_player_index: Option<u8>,
}

impl From<ScoreSnapshot> for SnapshotRepr {
    fn from(snapshot: ScoreSnapshot) -> Self {
        Self {
            score: snapshot.score,
            serving_team: snapshot.serving_team as u8,
            server_number: snapshot.server_number().map(|n| n.as_u8()),
            first_server_player_index: snapshot.first_server_player_index(),
        }
    }
}

impl TryFrom<SnapshotRepr> for ScoreSnapshot {
    type Error = Error;

    fn try_from(repr: SnapshotRepr) -> Result<Self> {
        let serving_team = Team::from_index(repr.serving_team).ok_or_else(|| {
            Error::InvalidConfig(format!("serving team must be 0 or 1, got {}", repr.serving_team))
        })?;

        let serve = match (repr.server_number, repr.first_server_player_index) {
            (None, None) => Serve::Singles,
            (Some(number), Some(first)) => Serve::Doubles {
                server_number: ServerNumber::from_u32(u32::from(number))?,
                first_server_player_index: first,
            },
            _ => {
                return Err(Error::InvalidConfig(
                    "server_number and first_server_player_index must both be set or both be null"
                        .to_string(),
                ));
            }
        };

        Self::new(repr.score, serving_team, serve)
    }
}
