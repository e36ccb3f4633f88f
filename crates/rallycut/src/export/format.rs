//! ExportFormat trait definition

use crate::timeline::{OutputTimeline, TimelineEntry};

/// Trait for export format implementations
///
/// Provides a common interface for different export formats (TSV, JSON, etc.)
pub trait ExportFormat {
    /// Returns the header line for the format (empty for formats without headers)
    fn header(&self) -> Option<String>;

    /// Format a single placed segment
    fn format_row(&self, entry: &TimelineEntry, fps: f64) -> String;

    /// Format every segment of a timeline
    fn format_rows(&self, timeline: &OutputTimeline) -> String {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push('\n');
        }
        for entry in timeline.iter() {
            output.push_str(&self.format_row(entry, timeline.fps()));
            output.push('\n');
        }
        output
    }
}
