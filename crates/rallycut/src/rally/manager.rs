use tracing::{debug, info, warn};

use crate::config::{check_fps, padding};
use crate::error::{Error, Result};
use crate::rally::{Action, ActionType, Rally, Segment};
use crate::score::{ScoreSnapshot, Winner};

/// Whether a rally is currently open
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RallyPhase {
    Waiting,
    InRally { start_frame: u64, start_timestamp: f64 },
}

/// Result of a successful undo
#[derive(Debug, Clone, PartialEq)]
pub struct UndoOutcome {
    pub action: Action,
    /// Player position to seek back to (seconds, before padding)
    pub seek_to: f64,
}

/// Records rally boundaries and keeps an undo stack of every start/end.
///
/// The manager never touches the live score. Callers apply the scoring
/// transition themselves and hand over the snapshot taken before it; undo
/// returns that snapshot so the caller can restore the score exactly.
#[derive(Debug, Clone)]
pub struct RallyManager {
    fps: f64,
    rallies: Vec<Rally>,
    actions: Vec<Action>,
    phase: RallyPhase,
}

impl RallyManager {
    pub fn new(fps: f64) -> Result<Self> {
        Ok(Self {
            fps: check_fps(fps)?,
            rallies: Vec::new(),
            actions: Vec::new(),
            phase: RallyPhase::Waiting,
        })
    }

    /// Resume from a saved rally log. The undo stack starts empty.
    pub fn from_rallies(fps: f64, rallies: Vec<Rally>) -> Result<Self> {
        for (index, rally) in rallies.iter().enumerate() {
            if rally.end_frame <= rally.start_frame {
                return Err(Error::InvalidSegment {
                    index,
                    in_frame: rally.start_frame,
                    out_frame: rally.end_frame,
                });
            }
        }

        let mut manager = Self::new(fps)?;
        manager.rallies = rallies;
        Ok(manager)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn phase(&self) -> RallyPhase {
        self.phase
    }

    pub fn is_in_rally(&self) -> bool {
        matches!(self.phase, RallyPhase::InRally { .. })
    }

    pub fn current_start_frame(&self) -> Option<u64> {
        match self.phase {
            RallyPhase::InRally { start_frame, .. } => Some(start_frame),
            RallyPhase::Waiting => None,
        }
    }

    pub fn rallies(&self) -> &[Rally] {
        &self.rallies
    }

    pub fn rally(&self, index: usize) -> Option<&Rally> {
        self.rallies.get(index)
    }

    pub fn rally_count(&self) -> usize {
        self.rallies.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.actions.len()
    }

    pub fn last_action(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn seconds_to_frame(&self, seconds: f64) -> u64 {
        (seconds * self.fps).floor() as u64
    }

    pub fn frame_to_seconds(&self, frame: u64) -> f64 {
        frame as f64 / self.fps
    }

    /// Open a rally at `timestamp` and return the padded start frame
    pub fn start_rally(&mut self, timestamp: f64, score_before: ScoreSnapshot) -> Result<u64> {
        if self.is_in_rally() {
            return Err(Error::RallyAlreadyInProgress);
        }
        check_timestamp(timestamp)?;

        let padded = (timestamp - padding::START_SECS).max(0.0);
        let start_frame = self.seconds_to_frame(padded);

        self.actions.push(Action {
            action_type: ActionType::RallyStart,
            timestamp,
            frame: start_frame,
            score_before,
        });
        self.phase = RallyPhase::InRally {
            start_frame,
            start_timestamp: timestamp,
        };

        debug!("Rally started at {:.3}s (frame {})", timestamp, start_frame);
        Ok(start_frame)
    }

    /// Close the open rally and append it to the log.
    ///
    /// `score_before` is the snapshot taken before the rally outcome was
    /// applied to the score; undoing this end restores it.
    pub fn end_rally(
        &mut self,
        timestamp: f64,
        winner: Winner,
        score_at_start: impl Into<String>,
        score_before: ScoreSnapshot,
        comment: Option<String>,
    ) -> Result<Rally> {
        let RallyPhase::InRally { start_frame, .. } = self.phase else {
            return Err(Error::NoRallyInProgress);
        };
        check_timestamp(timestamp)?;

        let end_frame = self.seconds_to_frame(timestamp + padding::END_SECS);
        if end_frame <= start_frame {
            return Err(Error::InvalidTimestamp(timestamp));
        }

        let rally = Rally {
            start_frame,
            end_frame,
            score_at_start: score_at_start.into(),
            winner,
            comment,
        };
        let rally_index = self.rallies.len();
        self.rallies.push(rally.clone());
        self.actions.push(Action {
            action_type: ActionType::RallyEnd { rally_index },
            timestamp,
            frame: end_frame,
            score_before,
        });
        self.phase = RallyPhase::Waiting;

        info!(
            "Rally {} recorded: frames {}-{}, {} at {}",
            rally_index + 1,
            start_frame,
            end_frame,
            winner,
            rally.score_at_start
        );
        Ok(rally)
    }

    /// Revert the most recent start or end.
    ///
    /// Undoing an end removes its rally and reopens the rally from the
    /// start action beneath it. If that entry is not a start the stack is
    /// malformed and the manager falls back to waiting.
    pub fn undo(&mut self) -> Result<UndoOutcome> {
        let action = self.actions.pop().ok_or(Error::NothingToUndo)?;

        match action.action_type {
            ActionType::RallyEnd { rally_index } => {
                if rally_index < self.rallies.len() {
                    self.rallies.remove(rally_index);
                } else {
                    warn!(
                        "Undo of rally end refers to missing rally {} (have {})",
                        rally_index,
                        self.rallies.len()
                    );
                }

                self.phase = match self.actions.last() {
                    Some(start) if start.is_rally_start() => RallyPhase::InRally {
                        start_frame: start.frame,
                        start_timestamp: start.timestamp,
                    },
                    _ => {
                        warn!("No rally start beneath undone rally end, returning to waiting");
                        RallyPhase::Waiting
                    }
                };
            }
            ActionType::RallyStart => {
                self.phase = RallyPhase::Waiting;
            }
        }

        info!("Undid {} at {:.3}s", action.name(), action.timestamp);
        Ok(UndoOutcome {
            seek_to: action.timestamp,
            action,
        })
    }

    /// Shift a rally's boundaries by whole frames during review.
    ///
    /// The start never goes below frame 0 and the end always stays at
    /// least one frame after the start. A shift past the last
    /// representable frame fails and leaves the rally unchanged.
    pub fn update_rally_timing(
        &mut self,
        index: usize,
        start_delta: i64,
        end_delta: i64,
    ) -> Result<&Rally> {
        let rally = self.rally_mut(index)?;
        let start_frame = shift_frame(rally.start_frame, start_delta)
            .ok_or(Error::FrameOverflow { index })?;
        let min_end = start_frame
            .checked_add(1)
            .ok_or(Error::FrameOverflow { index })?;
        let end_frame = shift_frame(rally.end_frame, end_delta)
            .ok_or(Error::FrameOverflow { index })?
            .max(min_end);

        rally.start_frame = start_frame;
        rally.end_frame = end_frame;
        debug!(
            "Rally {} timing adjusted to frames {}-{}",
            index + 1,
            start_frame,
            end_frame
        );
        Ok(rally)
    }

    pub fn update_rally_score(&mut self, index: usize, score_at_start: impl Into<String>) -> Result<()> {
        let rally = self.rally_mut(index)?;
        rally.score_at_start = score_at_start.into();
        debug!("Rally {} score set to {}", index + 1, rally.score_at_start);
        Ok(())
    }

    pub fn set_rally_comment(&mut self, index: usize, comment: Option<String>) -> Result<()> {
        self.rally_mut(index)?.comment = comment;
        Ok(())
    }

    /// Rally log as clip boundaries, in rally order
    pub fn to_segments(&self) -> Vec<Segment> {
        self.rallies.iter().map(Rally::to_segment).collect()
    }

    fn rally_mut(&mut self, index: usize) -> Result<&mut Rally> {
        let len = self.rallies.len();
        self.rallies
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }
}

/// Move a frame by a signed offset, stopping at frame 0
fn shift_frame(frame: u64, delta: i64) -> Option<u64> {
    if delta < 0 {
        Some(frame.saturating_sub(delta.unsigned_abs()))
    } else {
        frame.checked_add(delta.unsigned_abs())
    }
}

fn check_timestamp(timestamp: f64) -> Result<()> {
    if timestamp.is_finite() && timestamp >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTimestamp(timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{GameType, ScoreState, VictoryRules};
    use proptest::prelude::*;

    fn doubles_state() -> ScoreState {
        ScoreState::new(
            GameType::Doubles,
            VictoryRules::Eleven,
            [
                vec!["A1".to_string(), "A2".to_string()],
                vec!["B1".to_string(), "B2".to_string()],
            ],
        )
        .unwrap()
    }

    fn snapshot() -> ScoreSnapshot {
        doubles_state().save_snapshot()
    }

    #[test]
    fn test_new_rejects_bad_fps() {
        assert!(matches!(
            RallyManager::new(0.0),
            Err(Error::InvalidFrameRate(_))
        ));
        assert!(matches!(
            RallyManager::new(-24.0),
            Err(Error::InvalidFrameRate(_))
        ));
    }

    #[test]
    fn test_start_padding_clamps_at_zero() {
        let mut manager = RallyManager::new(60.0).unwrap();
        assert_eq!(manager.start_rally(0.1, snapshot()).unwrap(), 0);

        let mut manager = RallyManager::new(60.0).unwrap();
        assert_eq!(manager.start_rally(2.0, snapshot()).unwrap(), 90);
    }

    #[test]
    fn test_start_twice_fails() {
        let mut manager = RallyManager::new(60.0).unwrap();
        manager.start_rally(1.0, snapshot()).unwrap();
        assert!(matches!(
            manager.start_rally(2.0, snapshot()),
            Err(Error::RallyAlreadyInProgress)
        ));
        assert_eq!(manager.undo_depth(), 1);
    }

    #[test]
    fn test_end_without_start_fails() {
        let mut manager = RallyManager::new(60.0).unwrap();
        let result = manager.end_rally(5.0, Winner::Server, "0-0-2", snapshot(), None);
        assert!(matches!(result, Err(Error::NoRallyInProgress)));
        assert_eq!(manager.rally_count(), 0);
        assert!(!manager.can_undo());
    }

    #[test]
    fn test_undo_empty_fails() {
        let mut manager = RallyManager::new(60.0).unwrap();
        assert!(matches!(manager.undo(), Err(Error::NothingToUndo)));
    }

    #[test]
    fn test_rejects_negative_and_non_finite_timestamps() {
        let mut manager = RallyManager::new(60.0).unwrap();
        assert!(matches!(
            manager.start_rally(-1.0, snapshot()),
            Err(Error::InvalidTimestamp(_))
        ));
        assert!(matches!(
            manager.start_rally(f64::NAN, snapshot()),
            Err(Error::InvalidTimestamp(_))
        ));
        assert!(!manager.is_in_rally());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut manager = RallyManager::new(60.0).unwrap();
        manager.start_rally(10.0, snapshot()).unwrap();
        let result = manager.end_rally(5.0, Winner::Server, "0-0-2", snapshot(), None);
        assert!(matches!(result, Err(Error::InvalidTimestamp(_))));
        assert!(manager.is_in_rally());
        assert_eq!(manager.rally_count(), 0);
    }

    #[test]
    fn test_start_end_undo_scenario() {
        let mut manager = RallyManager::new(60.0).unwrap();
        let mut state = doubles_state();

        let start = manager.start_rally(10.0, state.save_snapshot()).unwrap();
        assert_eq!(start, 570);

        let score_at_start = state.get_score_string();
        let before = state.save_snapshot();
        state.server_wins();
        let rally = manager
            .end_rally(15.0, Winner::Server, score_at_start, before, None)
            .unwrap();
        assert_eq!(rally.start_frame, 570);
        assert_eq!(rally.end_frame, 960);
        assert_eq!(rally.score_at_start, "0-0-2");
        assert_eq!(rally.winner, Winner::Server);
        assert_eq!(state.get_score_string(), "1-0-2");
        assert!(!manager.is_in_rally());

        let outcome = manager.undo().unwrap();
        assert_eq!(outcome.seek_to, 15.0);
        assert_eq!(manager.rally_count(), 0);
        assert_eq!(
            manager.phase(),
            RallyPhase::InRally {
                start_frame: 570,
                start_timestamp: 10.0
            }
        );
        state.restore_snapshot(&outcome.action.score_before).unwrap();
        assert_eq!(state.get_score_string(), "0-0-2");

        let outcome = manager.undo().unwrap();
        assert_eq!(outcome.seek_to, 10.0);
        assert_eq!(outcome.action.action_type, ActionType::RallyStart);
        assert_eq!(manager.phase(), RallyPhase::Waiting);
        assert!(!manager.can_undo());
    }

    #[test]
    fn test_undo_end_without_matching_start_falls_back_to_waiting() {
        let mut manager = RallyManager::new(60.0).unwrap();
        manager.start_rally(1.0, snapshot()).unwrap();
        manager
            .end_rally(3.0, Winner::Receiver, "0-0-2", snapshot(), None)
            .unwrap();

        // Corrupt the stack: drop the start beneath the end
        manager.actions.remove(0);

        let outcome = manager.undo().unwrap();
        assert_eq!(outcome.action.name(), "RALLY_END");
        assert_eq!(manager.phase(), RallyPhase::Waiting);
        assert_eq!(manager.rally_count(), 0);
        assert!(!manager.can_undo());
    }

    #[test]
    fn test_undo_end_with_stale_rally_index() {
        let mut manager = RallyManager::new(60.0).unwrap();
        manager.start_rally(1.0, snapshot()).unwrap();
        manager
            .end_rally(3.0, Winner::Server, "0-0-2", snapshot(), None)
            .unwrap();
        manager.rallies.clear();

        manager.undo().unwrap();
        assert!(manager.is_in_rally());
    }

    #[test]
    fn test_update_rally_timing_clamps() {
        let mut manager = RallyManager::new(60.0).unwrap();
        manager.start_rally(1.0, snapshot()).unwrap(); // frame 30
        manager
            .end_rally(2.0, Winner::Server, "0-0-2", snapshot(), None)
            .unwrap(); // frame 180

        let rally = manager.update_rally_timing(0, -100, 0).unwrap();
        assert_eq!(rally.start_frame, 0);
        assert_eq!(rally.end_frame, 180);

        let rally = manager.update_rally_timing(0, 50, -500).unwrap();
        assert_eq!(rally.start_frame, 50);
        assert_eq!(rally.end_frame, 51);

        let rally = manager.update_rally_timing(0, 10, 30).unwrap();
        assert_eq!(rally.start_frame, 60);
        assert_eq!(rally.end_frame, 81);

        assert!(matches!(
            manager.update_rally_timing(1, 0, 0),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_update_rally_timing_rejects_overflow() {
        let mut manager = RallyManager::new(60.0).unwrap();
        manager.start_rally(1.0, snapshot()).unwrap(); // frame 30
        manager
            .end_rally(2.0, Winner::Server, "0-0-2", snapshot(), None)
            .unwrap(); // frame 180

        let rally = manager.update_rally_timing(0, i64::MAX, 0).unwrap().clone();
        assert_eq!(rally.start_frame, (1 << 63) + 29);
        assert_eq!(rally.end_frame, (1 << 63) + 30);

        assert!(matches!(
            manager.update_rally_timing(0, i64::MAX, 0),
            Err(Error::FrameOverflow { index: 0 })
        ));
        assert_eq!(manager.rallies()[0], rally);

        // Start on the last frame leaves no room for the end
        let to_last = i64::try_from(u64::MAX - rally.start_frame).unwrap();
        assert!(matches!(
            manager.update_rally_timing(0, to_last, 0),
            Err(Error::FrameOverflow { index: 0 })
        ));
        assert_eq!(manager.rallies()[0], rally);

        let rally = manager.update_rally_timing(0, i64::MIN, i64::MIN).unwrap();
        assert_eq!(rally.start_frame, 29);
        assert_eq!(rally.end_frame, 30);
    }

    #[test]
    fn test_review_corrections() {
        let mut manager = RallyManager::new(30.0).unwrap();
        manager.start_rally(4.0, snapshot()).unwrap();
        manager
            .end_rally(9.0, Winner::Receiver, "0-0-2", snapshot(), None)
            .unwrap();

        manager.update_rally_score(0, "0-0-1").unwrap();
        manager
            .set_rally_comment(0, Some("let serve".to_string()))
            .unwrap();
        let rally = manager.rally(0).unwrap();
        assert_eq!(rally.score_at_start, "0-0-1");
        assert_eq!(rally.comment.as_deref(), Some("let serve"));

        assert!(matches!(
            manager.update_rally_score(3, "1-1"),
            Err(Error::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(matches!(
            manager.set_rally_comment(1, None),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_to_segments_in_rally_order() {
        let mut manager = RallyManager::new(60.0).unwrap();
        for (start, end, score) in [(1.0, 4.0, "0-0-2"), (6.0, 9.5, "0-0-1"), (12.0, 20.0, "1-0-1")] {
            manager.start_rally(start, snapshot()).unwrap();
            manager
                .end_rally(end, Winner::Server, score, snapshot(), None)
                .unwrap();
        }

        let segments = manager.to_segments();
        assert_eq!(
            segments,
            vec![
                Segment::new(30, 300, "0-0-2"),
                Segment::new(330, 630, "0-0-1"),
                Segment::new(690, 1260, "1-0-1"),
            ]
        );
    }

    #[test]
    fn test_from_rallies_resumes_without_undo_history() {
        let rallies = vec![Rally {
            start_frame: 100,
            end_frame: 400,
            score_at_start: "0-0-2".to_string(),
            winner: Winner::Server,
            comment: None,
        }];
        let manager = RallyManager::from_rallies(60.0, rallies).unwrap();
        assert_eq!(manager.rally_count(), 1);
        assert!(!manager.can_undo());
        assert!(!manager.is_in_rally());

        let bad = vec![Rally {
            start_frame: 400,
            end_frame: 400,
            score_at_start: "0-0-2".to_string(),
            winner: Winner::Server,
            comment: None,
        }];
        assert!(matches!(
            RallyManager::from_rallies(60.0, bad),
            Err(Error::InvalidSegment { index: 0, .. })
        ));
    }

    proptest! {
        #[test]
        fn test_undo_reverses_any_sequence(
            gaps in proptest::collection::vec((0.0f64..30.0, 0.0f64..30.0), 0..20),
            close_last in any::<bool>(),
            fps in prop_oneof![Just(24.0f64), Just(29.97), Just(30.0), Just(60.0)],
        ) {
            let mut manager = RallyManager::new(fps).unwrap();
            let initial = snapshot();
            let mut clock = 0.0;
            let mut applied = 0usize;

            for (index, (pause, length)) in gaps.iter().enumerate() {
                clock += pause;
                manager.start_rally(clock, initial).unwrap();
                applied += 1;
                clock += length;
                let is_last = index + 1 == gaps.len();
                if !is_last || close_last {
                    manager.end_rally(clock, Winner::Server, "0-0-2", initial, None).unwrap();
                    applied += 1;
                }
            }

            let mut last = None;
            for _ in 0..applied {
                last = Some(manager.undo().unwrap());
            }

            prop_assert!(!manager.is_in_rally());
            prop_assert_eq!(manager.rally_count(), 0);
            prop_assert!(!manager.can_undo());
            if let Some(outcome) = last {
                prop_assert_eq!(outcome.action.score_before, initial);
            }
        }

        #[test]
        fn test_segments_always_have_positive_length(
            gaps in proptest::collection::vec((0.0f64..30.0, 0.0f64..30.0), 1..20),
        ) {
            let mut manager = RallyManager::new(60.0).unwrap();
            let mut clock = 0.0;
            for (pause, length) in gaps {
                clock += pause;
                manager.start_rally(clock, snapshot()).unwrap();
                clock += length;
                manager.end_rally(clock, Winner::Receiver, "0-0-2", snapshot(), None).unwrap();
            }

            let segments = manager.to_segments();
            prop_assert_eq!(segments.len(), manager.rally_count());
            for (segment, rally) in segments.iter().zip(manager.rallies()) {
                prop_assert!(segment.out_frame > segment.in_frame);
                prop_assert_eq!(segment.in_frame, rally.start_frame);
            }
        }
    }
}
