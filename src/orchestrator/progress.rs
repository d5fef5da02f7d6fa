//! Progress reporting.
//!
//! Backends give no progress of their own, so the orchestrator only reports
//! what it knows (task started, task finished) as [`ProgressEvent`]s. The
//! [`ProgressEstimator`] turns those events plus a clock tick into a
//! percentage for display.

use std::fmt;

use serde::Serialize;

use crate::types::{OutputFormat, Outcome};

/// Percentage the estimate never passes while tasks are in flight.
pub const IN_FLIGHT_CEILING: f32 = 80.0;
/// Fraction of the remaining distance to the ceiling covered per tick.
const TICK_STEP: f32 = 0.05;

/// A unit of work inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    Ideas,
    Format(OutputFormat),
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Ideas => f.write_str("ideas"),
            Task::Format(format) => f.write_str(format.as_str()),
        }
    }
}

/// Emitted on the orchestrator's broadcast channel. `run` identifies the
/// submit that produced the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ProgressEvent {
    RunStarted { run: u64, tasks: usize },
    TaskDispatched { run: u64, task: Task },
    TaskCompleted { run: u64, task: Task },
    TaskFailed { run: u64, task: Task, reason: String },
    RunFinished { run: u64, outcome: Outcome },
}

impl ProgressEvent {
    pub fn run(&self) -> u64 {
        match self {
            ProgressEvent::RunStarted { run, .. }
            | ProgressEvent::TaskDispatched { run, .. }
            | ProgressEvent::TaskCompleted { run, .. }
            | ProgressEvent::TaskFailed { run, .. }
            | ProgressEvent::RunFinished { run, .. } => *run,
        }
    }
}

/// Approximate completion percentage.
///
/// Rises monotonically toward [`IN_FLIGHT_CEILING`] while a run is in
/// flight, from finished tasks and from ticks. Jumps to 100 when the run
/// finishes and returns to 0 on [`reset`](Self::reset) or a new run.
#[derive(Debug, Clone, Default)]
pub struct ProgressEstimator {
    percent: f32,
    tasks: usize,
    done: usize,
    active: bool,
}

impl ProgressEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::RunStarted { tasks, .. } => {
                *self = Self {
                    tasks: *tasks,
                    active: true,
                    ..Self::default()
                };
            }
            ProgressEvent::TaskDispatched { .. } => {}
            ProgressEvent::TaskCompleted { .. } | ProgressEvent::TaskFailed { .. } => {
                if !self.active {
                    return;
                }
                self.done = (self.done + 1).min(self.tasks);
                if self.tasks > 0 {
                    let share = IN_FLIGHT_CEILING * self.done as f32 / self.tasks as f32;
                    self.percent = self.percent.max(share);
                }
            }
            ProgressEvent::RunFinished { .. } => {
                self.active = false;
                self.percent = 100.0;
            }
        }
    }

    /// Advance the time-based estimate by one step.
    pub fn tick(&mut self) {
        if self.active && self.percent < IN_FLIGHT_CEILING {
            self.percent += (IN_FLIGHT_CEILING - self.percent) * TICK_STEP;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn percent(&self) -> u8 {
        self.percent.round().clamp(0.0, 100.0) as u8
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
