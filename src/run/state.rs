//! Orchestrator state machine.

use std::fmt;

/// Phases of a run, entered strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunState {
    /// Service constructed, nothing started.
    Init,
    /// Workers and sink are up; the source is being read.
    Running,
    /// Source done and work queue closed; waiting for workers to finish.
    Draining,
    /// Result stream closed and fully drained.
    Done,
}

impl RunState {
    fn next(self) -> Option<RunState> {
        match self {
            RunState::Init => Some(RunState::Running),
            RunState::Running => Some(RunState::Draining),
            RunState::Draining => Some(RunState::Done),
            RunState::Done => None,
        }
    }

    /// Moves to the following phase and logs the transition.
    pub(crate) fn advance(&mut self) {
        if let Some(next) = self.next() {
            log::debug!("Run state: {} -> {}", self, next);
            *self = next;
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Init => "init",
            RunState::Running => "running",
            RunState::Draining => "draining",
            RunState::Done => "done",
        };
        f.write_str(name)
    }
}
