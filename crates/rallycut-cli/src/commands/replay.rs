//! Replay command: run an event script through the tracker and export.

use std::path::Path;

use anyhow::{Context, Result};
use rallycut::{
    DurationConvention, ExportFormat as _, JsonExporter, MatchTracker, SessionData, TsvExporter,
    export_segments_json, subtitle_cues,
};
use tracing::{debug, info};

use crate::cli::ExportFormat;
use crate::script::{Event, Script};

pub fn run(
    script_path: &Path,
    format: ExportFormat,
    convention: DurationConvention,
    output: Option<&Path>,
    session: Option<&Path>,
) -> Result<()> {
    let script = Script::load(script_path)?;
    let tracker = replay(&script)?;

    eprintln!(
        "Replayed {} events: {} rallies, score {}",
        script.events.len(),
        tracker.rally_manager().rally_count(),
        tracker.score_string()
    );
    if let Some(team) = tracker.game_over() {
        eprintln!("Game over, team {} wins", team);
    }

    if let Some(session_path) = session {
        SessionData::capture(&tracker)
            .save(session_path)
            .with_context(|| format!("Failed to save session {}", session_path.display()))?;
    }

    let content = render(&tracker, format, convention)?;

    // Write output
    if let Some(output_path) = output {
        std::fs::write(output_path, &content)?;
        eprintln!("Exported to: {}", output_path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// Apply every scripted event in order, stopping at the first rejected one
pub fn replay(script: &Script) -> Result<MatchTracker> {
    let mut tracker = MatchTracker::new(script.tracker_config()?)?;

    for (n, event) in script.events.iter().enumerate() {
        apply(&mut tracker, event).with_context(|| format!("Event {} ({:?}) failed", n + 1, event))?;
    }

    info!(
        "Replay finished with {} rallies at {}",
        tracker.rally_manager().rally_count(),
        tracker.score_string()
    );
    Ok(tracker)
}

fn apply(tracker: &mut MatchTracker, event: &Event) -> Result<()> {
    match event {
        Event::Start { at } => {
            let frame = tracker.start_rally(*at)?;
            debug!("start @ {:.3}s -> frame {}", at, frame);
        }
        Event::Server { at, comment } => {
            let result = tracker.end_rally(*at, rallycut::Winner::Server, comment.clone())?;
            debug!("server wins @ {:.3}s -> {}", at, result.score);
        }
        Event::Receiver { at, comment } => {
            let result = tracker.end_rally(*at, rallycut::Winner::Receiver, comment.clone())?;
            debug!("receiver wins @ {:.3}s -> {}", at, result.score);
        }
        Event::Undo => {
            let outcome = tracker.undo()?;
            debug!("undo {} -> seek {:.3}s", outcome.action.name(), outcome.seek_to);
        }
        Event::SideOut => tracker.force_side_out(),
        Event::SetScore { score } => tracker.set_score(score)?,
    }
    Ok(())
}

pub fn render(
    tracker: &MatchTracker,
    format: ExportFormat,
    convention: DurationConvention,
) -> Result<String> {
    let content = match format {
        ExportFormat::Tsv => TsvExporter.format_rows(&tracker.timeline(convention)?),
        ExportFormat::Json => JsonExporter.format_rows(&tracker.timeline(convention)?),
        ExportFormat::Segments => export_segments_json(&tracker.segments())?,
        ExportFormat::Cues => serde_json::to_string_pretty(&subtitle_cues(
            &tracker.segments(),
            tracker.config().fps,
        )?)?,
    };
    Ok(content)
}
