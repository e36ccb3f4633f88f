//! TSV export format implementation

use crate::timeline::{TimelineEntry, Timecode};

use super::format::ExportFormat;

/// TSV (Tab-Separated Values) exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvExporter;

impl ExportFormat for TsvExporter {
    fn header(&self) -> Option<String> {
        Some(format_tsv_header())
    }

    fn format_row(&self, entry: &TimelineEntry, fps: f64) -> String {
        format_tsv_row(entry, fps)
    }
}

pub fn format_tsv_header() -> String {
    [
        "rally",
        "score",
        "in",
        "out",
        "output_start",
        "duration",
        "start",
        "end",
    ]
    .join("\t")
}

pub fn format_tsv_row(entry: &TimelineEntry, fps: f64) -> String {
    let start = Timecode::from_seconds(entry.output_start as f64 / fps);
    let end = Timecode::from_seconds(entry.output_end() as f64 / fps);
    let values = [
        (entry.index + 1).to_string(),
        entry.score.clone(),
        entry.source_in.to_string(),
        entry.source_out.to_string(),
        entry.output_start.to_string(),
        entry.duration.to_string(),
        start.to_project(),
        end.to_project(),
    ];
    values.join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rally::Segment;
    use crate::timeline::{DurationConvention, map_segments};

    #[test]
    fn test_tsv_rows() {
        let segments = vec![Segment::new(570, 960, "0-0-2"), Segment::new(1200, 1500, "1-0-2")];
        let timeline = map_segments(&segments, 60.0, DurationConvention::Exclusive).unwrap();
        let output = TsvExporter.format_rows(&timeline);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "rally\tscore\tin\tout\toutput_start\tduration\tstart\tend");
        assert_eq!(
            lines[1],
            "1\t0-0-2\t570\t960\t0\t390\t00:00:00.000\t00:00:06.500"
        );
        assert_eq!(
            lines[2],
            "2\t1-0-2\t1200\t1500\t390\t300\t00:00:06.500\t00:00:11.500"
        );
    }
}
