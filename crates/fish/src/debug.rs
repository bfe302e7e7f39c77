//! Debug support for running programs.
//!
//! Provides grid breakpoints, single-stepping and pausing. The session asks
//! [`DebugState::check`] before every step with the cell the pointer is
//! about to execute.

use std::collections::HashSet;

/// A grid cell, as `(x, y)`.
pub type Position = (i64, i64);

/// Debug execution mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugMode {
    /// Run until breakpoint or termination.
    Running,
    /// Paused, waiting for a command.
    Paused,
    /// Execute one instruction then pause.
    StepInto,
}

/// Event that caused execution to pause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DebugEvent {
    /// About to execute a breakpoint cell.
    Breakpoint(Position),
    /// Completed a step.
    Step,
    /// Started in paused mode.
    Paused,
}

/// Debug state for controlling execution.
#[derive(Debug)]
pub struct DebugState {
    breakpoints: HashSet<Position>,
    mode: DebugMode,
    /// Set once an instruction ran since the last pause.
    executed_since_pause: bool,
    /// Where we last paused, so resuming does not re-trigger the same cell.
    last_pause: Option<Position>,
}

impl DebugState {
    /// Create a new debug state in running mode.
    pub fn new() -> Self {
        Self {
            breakpoints: HashSet::new(),
            mode: DebugMode::Running,
            executed_since_pause: true,
            last_pause: None,
        }
    }

    /// Create a new debug state that starts paused.
    pub fn paused() -> Self {
        Self {
            mode: DebugMode::Paused,
            executed_since_pause: false,
            ..Self::new()
        }
    }

    pub fn add_breakpoint(&mut self, position: Position) {
        self.breakpoints.insert(position);
    }

    pub fn remove_breakpoint(&mut self, position: Position) {
        self.breakpoints.remove(&position);
    }

    pub fn has_breakpoint(&self, position: Position) -> bool {
        self.breakpoints.contains(&position)
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = Position> + '_ {
        self.breakpoints.iter().copied()
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub fn mode(&self) -> DebugMode {
        self.mode
    }

    /// Continue running until the next breakpoint.
    pub fn continue_running(&mut self) {
        self.mode = DebugMode::Running;
        self.executed_since_pause = false;
    }

    /// Execute the next instruction, then pause.
    pub fn step_into(&mut self) {
        self.mode = DebugMode::StepInto;
        self.executed_since_pause = false;
    }

    /// Check if we should pause before executing the cell at `position`.
    pub fn check(&mut self, position: Position) -> Option<DebugEvent> {
        match self.mode {
            DebugMode::Paused => {
                if self.executed_since_pause {
                    return None;
                }
                self.last_pause = Some(position);
                Some(DebugEvent::Paused)
            }
            DebugMode::Running => {
                let same_location =
                    self.last_pause == Some(position) && !self.executed_since_pause;
                if self.breakpoints.contains(&position) && !same_location {
                    self.pause_at(position);
                    Some(DebugEvent::Breakpoint(position))
                } else {
                    if !same_location {
                        self.last_pause = None;
                    }
                    None
                }
            }
            DebugMode::StepInto => {
                if self.executed_since_pause {
                    self.pause_at(position);
                    Some(DebugEvent::Step)
                } else {
                    None
                }
            }
        }
    }

    fn pause_at(&mut self, position: Position) {
        self.mode = DebugMode::Paused;
        self.executed_since_pause = false;
        self.last_pause = Some(position);
    }

    /// Mark that an instruction was executed. Call after each step.
    pub fn mark_executed(&mut self) {
        self.executed_since_pause = true;
    }
}

impl Default for DebugState {
    fn default() -> Self {
        Self::new()
    }
}
