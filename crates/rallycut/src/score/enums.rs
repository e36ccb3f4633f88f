use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

use crate::error::{Error, Result};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameType {
    Singles,
    #[default]
    Doubles,
}

impl GameType {
    /// Parse a game type name, rejecting anything but `singles` or `doubles`
    pub fn parse(value: &str) -> Result<Self> {
        value
            .parse()
            .map_err(|_| Error::InvalidConfig(format!("unknown game type '{}'", value)))
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Number of players on each team
    pub fn roster_size(&self) -> usize {
        match self {
            Self::Singles => 1,
            Self::Doubles => 2,
        }
    }

    pub fn is_doubles(&self) -> bool {
        matches!(self, Self::Doubles)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
pub enum VictoryRules {
    #[default]
    #[serde(rename = "11")]
    #[strum(serialize = "11")]
    Eleven,
    #[serde(rename = "9")]
    #[strum(serialize = "9")]
    Nine,
    #[serde(rename = "timed")]
    #[strum(serialize = "timed")]
    Timed,
}

impl VictoryRules {
    /// Parse a victory rule name, rejecting anything but `11`, `9` or `timed`
    pub fn parse(value: &str) -> Result<Self> {
        value
            .parse()
            .map_err(|_| Error::InvalidConfig(format!("unknown victory rules '{}'", value)))
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Points needed to win, `None` for timed games which end on an external signal
    pub fn target_score(&self) -> Option<u32> {
        match self {
            Self::Eleven => Some(11),
            Self::Nine => Some(9),
            Self::Timed => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum Team {
    #[default]
    A = 0,
    B = 1,
}

impl Team {
    pub fn from_index(index: u8) -> Option<Self> {
        Self::from_repr(index)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn other(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Which partner of the serving team holds the serve (doubles only).
///
/// On the wire this is the plain integer carried by `ScoreSnapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display)]
#[repr(u8)]
pub enum ServerNumber {
    #[strum(serialize = "1")]
    One = 1,
    #[strum(serialize = "2")]
    Two = 2,
}

impl ServerNumber {
    pub fn from_u32(value: u32) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_repr)
            .ok_or(Error::InvalidServerNumber(value))
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Winner {
    Server,
    Receiver,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
