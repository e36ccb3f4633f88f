use strum::{Display, IntoStaticStr};

use crate::score::ScoreSnapshot;

/// Kind of undoable event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
pub enum ActionType {
    #[strum(serialize = "RALLY_START")]
    RallyStart,
    /// Index of the rally this end created, removed again on undo
    #[strum(serialize = "RALLY_END")]
    RallyEnd { rally_index: usize },
}

/// Entry on the undo stack
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub action_type: ActionType,
    /// Player position in seconds when the operator pressed the button
    pub timestamp: f64,
    /// Frame recorded after padding
    pub frame: u64,
    /// Score captured immediately before this action was applied
    pub score_before: ScoreSnapshot,
}

impl Action {
    pub fn name(&self) -> &'static str {
        self.action_type.into()
    }

    pub fn is_rally_start(&self) -> bool {
        matches!(self.action_type, ActionType::RallyStart)
    }
}
