//! Inspect command for summarizing a saved session.

use std::path::Path;

use anyhow::{Context, Result};
use rallycut::{SessionData, Timecode};

pub fn run(session_path: &Path) -> Result<()> {
    let data = SessionData::load(session_path)
        .with_context(|| format!("Failed to load session {}", session_path.display()))?;
    print!("{}", summarize(data)?);
    Ok(())
}

pub fn summarize(data: SessionData) -> Result<String> {
    let saved_at = data.saved_at;
    let fps = data.fps;
    let tracker = data.restore()?;
    let state = tracker.score_state();
    let server = state.get_server_info();

    let mut output = String::new();
    output.push_str(&format!("Saved:   {}\n", saved_at.to_rfc3339()));
    output.push_str(&format!(
        "Game:    {} to {} at {} fps\n",
        state.game_type(),
        state.victory_rules(),
        fps
    ));
    output.push_str(&format!(
        "Score:   {} ({} serving)\n",
        tracker.score_string(),
        server.player_name
    ));
    if let Some(team) = tracker.game_over() {
        output.push_str(&format!("Result:  team {} wins\n", team));
    }

    let rallies = tracker.rally_manager().rallies();
    output.push_str(&format!("Rallies: {}\n", rallies.len()));
    for (n, rally) in rallies.iter().enumerate() {
        let start = Timecode::from_seconds(rally.start_frame as f64 / fps);
        let end = Timecode::from_seconds(rally.end_frame as f64 / fps);
        output.push_str(&format!(
            "  {:>3}  {} - {}  {:<8} {}",
            n + 1,
            start,
            end,
            rally.score_at_start,
            rally.winner
        ));
        if let Some(comment) = &rally.comment {
            output.push_str(&format!("  # {}", comment));
        }
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rallycut::{MatchTracker, TrackerConfig};

    #[test]
    fn test_summarize() {
        let mut tracker = MatchTracker::new(TrackerConfig::default()).unwrap();
        tracker.start_rally(10.0).unwrap();
        tracker.server_wins(15.0).unwrap();
        tracker
            .set_rally_comment(0, Some("ace".to_string()))
            .unwrap();

        let summary = summarize(SessionData::capture(&tracker)).unwrap();
        assert!(summary.contains("Game:    doubles to 11 at 60 fps"));
        assert!(summary.contains("Score:   1-0-2 (Team A 1 serving)"));
        assert!(summary.contains("Rallies: 1"));
        assert!(summary.contains("00:00:09.500 - 00:00:16.000"));
        assert!(summary.contains("# ace"));
    }
}
