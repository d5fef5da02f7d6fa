use std::fmt;

use serde::Serialize;

use crate::types::Outcome;

/// Where the orchestrator is in a run.
///
/// `Idle -> Dispatching -> Running -> Finished(_) -> Idle`, the last step
/// after the configured grace period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case", tag = "state", content = "outcome")]
pub enum RunState {
    #[default]
    Idle,
    /// Validated; the ideas step is in flight.
    Dispatching,
    /// Format tasks are in flight.
    Running,
    Finished(Outcome),
}

impl RunState {
    /// A run is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, RunState::Dispatching | RunState::Running)
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            RunState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Dispatching => write!(f, "dispatching"),
            RunState::Running => write!(f, "running"),
            RunState::Finished(Outcome::Completed) => write!(f, "completed"),
            RunState::Finished(Outcome::PartiallyFailed) => write!(f, "partially failed"),
            RunState::Finished(Outcome::Failed) => write!(f, "failed"),
        }
    }
}
