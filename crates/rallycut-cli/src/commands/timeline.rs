//! Timeline command: compare subtitle and clip-grouping placement.

use std::path::Path;

use anyhow::{Context, Result};
use rallycut::{DurationConvention, OutputTimeline, Timecode, map_segments, parse_segments_json};

pub fn run(segments_path: &Path, fps: f64) -> Result<()> {
    let content = std::fs::read_to_string(segments_path)
        .with_context(|| format!("Failed to read {}", segments_path.display()))?;
    let segments = parse_segments_json(&content)?;

    let exclusive = map_segments(&segments, fps, DurationConvention::Exclusive)?;
    let inclusive = map_segments(&segments, fps, DurationConvention::Inclusive)?;

    print!("{}", format_comparison(&exclusive, &inclusive));
    Ok(())
}

/// Side-by-side table of both placements with the drift between them
pub fn format_comparison(exclusive: &OutputTimeline, inclusive: &OutputTimeline) -> String {
    let fps = exclusive.fps();
    let mut output = String::from("#\tscore\tin\tout\texclusive\tinclusive\tdrift\n");
    for (e, i) in exclusive.iter().zip(inclusive.iter()) {
        output.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            e.index + 1,
            e.score,
            e.source_in,
            e.source_out,
            Timecode::from_seconds(e.output_start as f64 / fps),
            Timecode::from_seconds(i.output_start as f64 / fps),
            i.output_start - e.output_start
        ));
    }
    output.push_str(&format!(
        "total\t\t\t\t{} ({} frames)\t{} ({} frames)\t{}\n",
        Timecode::from_seconds(exclusive.total_seconds()),
        exclusive.total_frames(),
        Timecode::from_seconds(inclusive.total_seconds()),
        inclusive.total_frames(),
        inclusive.total_frames() - exclusive.total_frames()
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rallycut::Segment;

    #[test]
    fn test_comparison_shows_drift() {
        let segments = vec![Segment::new(0, 60, "0-0"), Segment::new(120, 180, "1-0")];
        let exclusive = map_segments(&segments, 60.0, DurationConvention::Exclusive).unwrap();
        let inclusive = map_segments(&segments, 60.0, DurationConvention::Inclusive).unwrap();
        let table = format_comparison(&exclusive, &inclusive);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "2\t1-0\t120\t180\t00:00:01.000\t00:00:01.017\t1");
        assert!(lines[3].ends_with("\t2"));
    }
}
