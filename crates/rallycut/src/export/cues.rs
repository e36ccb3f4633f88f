//! Subtitle cue timing.
//!
//! Only the timing is produced here; subtitle file syntax belongs to the
//! generators that consume it.

use serde::Serialize;

use crate::error::Result;
use crate::rally::Segment;
use crate::timeline::{DurationConvention, Timecode, map_segments};

/// One score caption spanning a rally on the output timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleCue {
    /// 1-based, as subtitle formats number their cues
    pub index: usize,
    pub start: Timecode,
    pub end: Timecode,
    pub text: String,
}

/// Build one cue per segment.
///
/// Cues are always placed with `DurationConvention::Exclusive`; the
/// inclusive clip-grouping timeline never feeds subtitle timing.
pub fn subtitle_cues(segments: &[Segment], fps: f64) -> Result<Vec<SubtitleCue>> {
    let timeline = map_segments(segments, fps, DurationConvention::Exclusive)?;
    let cues = timeline
        .iter()
        .map(|entry| SubtitleCue {
            index: entry.index + 1,
            start: Timecode::from_seconds(entry.output_start as f64 / timeline.fps()),
            end: Timecode::from_seconds(entry.output_end() as f64 / timeline.fps()),
            text: entry.score.clone(),
        })
        .collect();
    Ok(cues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_cues_are_back_to_back() {
        let segments = vec![
            Segment::new(570, 960, "0-0-2"),
            Segment::new(1200, 1500, "1-0-2"),
        ];
        let cues = subtitle_cues(&segments, 60.0).unwrap();

        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].index, 1);
        assert_eq!(cues[0].start.to_srt(), "00:00:00,000");
        assert_eq!(cues[0].end.to_srt(), "00:00:06,500");
        assert_eq!(cues[1].start, cues[0].end);
        assert_eq!(cues[1].end.to_ass(), "0:00:11.50");
        assert_eq!(cues[1].text, "1-0-2");
    }

    #[test]
    fn test_cue_timing_ignores_clip_grouping_offset() {
        // One second each; clip grouping would push cue 2 to frame 61
        let segments = vec![Segment::new(0, 60, "0-0"), Segment::new(120, 180, "1-0")];
        let inclusive = map_segments(&segments, 60.0, DurationConvention::Inclusive).unwrap();
        assert_eq!(inclusive.entries()[1].output_start, 61);

        let cues = subtitle_cues(&segments, 60.0).unwrap();
        assert_eq!(cues[1].start.to_srt(), "00:00:01,000");
        assert_eq!(cues[1].end.to_srt(), "00:00:02,000");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            subtitle_cues(&[Segment::new(0, 60, "0-0")], 0.0),
            Err(Error::InvalidFrameRate(_))
        ));
        assert!(matches!(
            subtitle_cues(&[Segment::new(60, 0, "0-0")], 60.0),
            Err(Error::InvalidSegment { index: 0, .. })
        ));
    }
}
