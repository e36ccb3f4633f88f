use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::check_fps;
use crate::error::Result;

/// A non-negative position on a timeline, held in whole milliseconds.
///
/// The three renderings below are distinct formats consumed by different
/// tools and must not be mixed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode {
    millis: u64,
}

impl Timecode {
    /// Rounded to the nearest millisecond; negative input clamps to zero
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            millis: (seconds.max(0.0) * 1000.0).round() as u64,
        }
    }

    pub fn from_frame(frame: u64, fps: f64) -> Result<Self> {
        Ok(Self::from_seconds(frame_to_seconds(frame, fps)?))
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    pub fn as_seconds(&self) -> f64 {
        self.millis as f64 / 1000.0
    }

    fn split_millis(&self) -> (u64, u64, u64, u64) {
        let ms = self.millis % 1000;
        let total_secs = self.millis / 1000;
        (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60, ms)
    }

    /// `HH:MM:SS.mmm`, used in project files
    pub fn to_project(&self) -> String {
        let (h, m, s, ms) = self.split_millis();
        format!("{:02}:{:02}:{:02}.{:03}", h, m, s, ms)
    }

    /// `HH:MM:SS,mmm`, used in SRT cues
    pub fn to_srt(&self) -> String {
        let (h, m, s, ms) = self.split_millis();
        format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
    }

    /// `H:MM:SS.cc`, used in ASS events (rounded to centiseconds)
    pub fn to_ass(&self) -> String {
        let centis = (self.millis + 5) / 10;
        let total_secs = centis / 100;
        format!(
            "{}:{:02}:{:02}.{:02}",
            total_secs / 3600,
            (total_secs / 60) % 60,
            total_secs % 60,
            centis % 100
        )
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_project())
    }
}

impl Serialize for Timecode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn frame_to_seconds(frame: u64, fps: f64) -> Result<f64> {
    Ok(frame as f64 / check_fps(fps)?)
}
