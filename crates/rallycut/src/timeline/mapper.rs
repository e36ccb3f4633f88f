use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::config::check_fps;
use crate::error::{Error, Result};
use crate::rally::Segment;

/// How many output frames a source range `in..out` occupies.
///
/// Subtitle timing counts `out - in` frames; cross-track clip grouping
/// counts `out - in + 1`. The two disagree by one frame per segment and
/// both are kept as-is because downstream consumers rely on each.
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
pub enum DurationConvention {
    /// `out - in`, used for subtitle cues
    #[default]
    Exclusive,
    /// `out - in + 1`, used for cross-track clip grouping
    Inclusive,
}

impl DurationConvention {
    /// `None` if the inclusive count does not fit in a frame number
    pub fn duration(&self, in_frame: u64, out_frame: u64) -> Option<u64> {
        let span = out_frame.saturating_sub(in_frame);
        match self {
            Self::Exclusive => Some(span),
            Self::Inclusive => span.checked_add(1),
        }
    }
}

/// A segment placed on the concatenated output timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Position in the supplied segment list
    pub index: usize,
    pub source_in: u64,
    pub source_out: u64,
    /// Sum of the durations of every earlier segment
    pub output_start: u64,
    pub duration: u64,
    pub score: String,
}

impl TimelineEntry {
    pub fn output_end(&self) -> u64 {
        self.output_start + self.duration
    }
}

/// Segments laid back to back, in the order they were supplied
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTimeline {
    fps: f64,
    convention: DurationConvention,
    entries: Vec<TimelineEntry>,
    total_frames: u64,
}

impl OutputTimeline {
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn convention(&self) -> DurationConvention {
        self.convention
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the rendered timeline, used for project and track duration
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_frames as f64 / self.fps
    }
}

/// Place each segment at the running sum of the durations before it.
///
/// No reordering or deduplication happens; a segment whose out frame
/// precedes its in frame is rejected, as is a list whose total length
/// does not fit in a frame number.
pub fn map_segments(
    segments: &[Segment],
    fps: f64,
    convention: DurationConvention,
) -> Result<OutputTimeline> {
    let fps = check_fps(fps)?;

    let mut entries = Vec::with_capacity(segments.len());
    let mut cursor = 0u64;
    for (index, segment) in segments.iter().enumerate() {
        if segment.out_frame < segment.in_frame {
            return Err(Error::InvalidSegment {
                index,
                in_frame: segment.in_frame,
                out_frame: segment.out_frame,
            });
        }

        let duration = convention
            .duration(segment.in_frame, segment.out_frame)
            .ok_or(Error::FrameOverflow { index })?;
        entries.push(TimelineEntry {
            index,
            source_in: segment.in_frame,
            source_out: segment.out_frame,
            output_start: cursor,
            duration,
            score: segment.score.clone(),
        });
        cursor = cursor
            .checked_add(duration)
            .ok_or(Error::FrameOverflow { index })?;
    }

    Ok(OutputTimeline {
        fps,
        convention,
        entries,
        total_frames: cursor,
    })
}
