//! Segment export.
//!
//! - **TSV / NDJSON**: one row per placed segment via [`ExportFormat`]
//! - **Segment interchange**: the `{in, out, score}` list for generators
//! - **Cues**: subtitle timing on the output timeline

mod cues;
mod format;
mod json;
mod tsv;

pub use cues::{SubtitleCue, subtitle_cues};
pub use format::ExportFormat;
pub use json::{JsonExporter, export_segments_json, format_json_entry, parse_segments_json};
pub use tsv::{TsvExporter, format_tsv_header, format_tsv_row};
