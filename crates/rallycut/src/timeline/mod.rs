//! Output-timeline placement and timecode rendering.
//!
//! Segments are positioned back to back on a gap-free output timeline.
//! Subtitle timing and clip grouping both use [`map_segments`] with their
//! own [`DurationConvention`].

mod mapper;
mod timecode;

pub use mapper::*;
pub use timecode::*;
