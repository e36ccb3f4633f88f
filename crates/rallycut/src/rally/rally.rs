use serde::{Deserialize, Serialize};

use crate::score::Winner;

/// One completed point, in source-video frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rally {
    pub start_frame: u64,
    pub end_frame: u64,
    /// Score as called before the serve, serving team first
    pub score_at_start: String,
    pub winner: Winner,
    pub comment: Option<String>,
}

impl Rally {
    pub fn duration_frames(&self) -> u64 {
        self.end_frame.saturating_sub(self.start_frame)
    }

    pub fn to_segment(&self) -> Segment {
        Segment {
            in_frame: self.start_frame,
            out_frame: self.end_frame,
            score: self.score_at_start.clone(),
        }
    }
}

/// Clip boundary handed to downstream video-assembly tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "in")]
    pub in_frame: u64,
    #[serde(rename = "out")]
    pub out_frame: u64,
    pub score: String,
}

impl Segment {
    pub fn new(in_frame: u64, out_frame: u64, score: impl Into<String>) -> Self {
        Self {
            in_frame,
            out_frame,
            score: score.into(),
        }
    }
}
