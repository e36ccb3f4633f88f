//! JSON export format implementation

use serde_json::{Value as JsonValue, json};

use crate::error::Result;
use crate::rally::Segment;
use crate::timeline::{TimelineEntry, Timecode};

use super::format::ExportFormat;

/// JSON exporter (one object per line, NDJSON format)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn header(&self) -> Option<String> {
        None // JSON doesn't need a header
    }

    fn format_row(&self, entry: &TimelineEntry, fps: f64) -> String {
        format_json_entry(entry, fps).to_string()
    }
}

pub fn format_json_entry(entry: &TimelineEntry, fps: f64) -> JsonValue {
    json!({
        "rally": entry.index + 1,
        "score": entry.score,
        "in": entry.source_in,
        "out": entry.source_out,
        "output_start": entry.output_start,
        "duration": entry.duration,
        "start": Timecode::from_seconds(entry.output_start as f64 / fps).to_project(),
        "end": Timecode::from_seconds(entry.output_end() as f64 / fps).to_project(),
    })
}

/// Segment list in the interchange shape read by the project and subtitle generators
pub fn export_segments_json(segments: &[Segment]) -> Result<String> {
    Ok(serde_json::to_string_pretty(segments)?)
}

/// Parse a segment list written by [`export_segments_json`]
pub fn parse_segments_json(content: &str) -> Result<Vec<Segment>> {
    Ok(serde_json::from_str(content)?)
}
