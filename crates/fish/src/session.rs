//! Running programs to completion.
//!
//! A [`Session`] owns one [`Program`] and steps it until it terminates, runs
//! out of step budget, or the debugger asks to pause. Output is collected
//! between steps.
//!
//! # Quick Start
//!
//! ```
//! use fish::{RunOutcome, Session, SessionConfig, render_output};
//!
//! let mut session = Session::new("\"olleh\"ooooo;", &[], SessionConfig::default());
//! match session.run(None)? {
//!     RunOutcome::Completed { output, .. } => assert_eq!(render_output(&output), "hello"),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! # Ok::<(), fish::SessionError>(())
//! ```

use fish_vm::{Output, Program, RandomCompass, RuntimeError};
use log::{debug, info};
use thiserror::Error;

use crate::debug::{DebugEvent, DebugState};

/// Default step budget.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Session configuration options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Stop after this many steps. `None` runs forever.
    pub max_steps: Option<u64>,
    /// Seed for `x`. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(DEFAULT_MAX_STEPS),
            seed: None,
        }
    }
}

/// Error from [`Session::run`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// How a call to [`Session::run`] ended.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    /// The program reached `;`.
    Completed { output: Vec<Output>, steps: u64 },
    /// An instruction failed and ended the program.
    Failed {
        output: Vec<Output>,
        steps: u64,
        error: RuntimeError,
    },
    /// The step budget ran out first.
    StepLimit { output: Vec<Output>, steps: u64 },
    /// The debugger paused before the next instruction. Call `run` again to
    /// resume.
    Debug {
        event: DebugEvent,
        output: Vec<Output>,
    },
}

impl RunOutcome {
    /// Output produced so far.
    pub fn output(&self) -> &[Output] {
        match self {
            RunOutcome::Completed { output, .. }
            | RunOutcome::Failed { output, .. }
            | RunOutcome::StepLimit { output, .. }
            | RunOutcome::Debug { output, .. } => output,
        }
    }
}

/// A program plus everything needed to drive it.
pub struct Session {
    program: Program,
    config: SessionConfig,
    output: Vec<Output>,
}

impl Session {
    /// Load `source` with `initial_stack` (bottom first).
    pub fn new(source: &str, initial_stack: &[f64], config: SessionConfig) -> Self {
        let program = match config.seed {
            Some(seed) => Program::with_compass(source, initial_stack, RandomCompass::seeded(seed)),
            None => Program::new(source, initial_stack),
        };
        Self {
            program,
            config,
            output: Vec::new(),
        }
    }

    /// Queue `text` as input.
    pub fn with_input(mut self, text: &str) -> Self {
        self.program.feed_input(text);
        self
    }

    /// Run until the program ends, the budget runs out, or `debug` pauses.
    pub fn run(&mut self, mut debug: Option<&mut DebugState>) -> Result<RunOutcome, SessionError> {
        loop {
            if self.program.has_terminated() {
                return Ok(self.finished());
            }

            if let Some(max) = self.config.max_steps
                && self.program.steps() >= max
            {
                info!("step limit of {max} reached");
                return Ok(RunOutcome::StepLimit {
                    output: self.output.clone(),
                    steps: self.program.steps(),
                });
            }

            if let Some(state) = debug.as_deref_mut()
                && let Some(position) = self.program.next_position()
                && let Some(event) = state.check(position)
            {
                debug!("paused at {position:?}: {event:?}");
                return Ok(RunOutcome::Debug {
                    event,
                    output: self.output.clone(),
                });
            }

            self.program.step()?;
            self.collect_output();

            if let Some(state) = debug.as_deref_mut() {
                state.mark_executed();
            }
        }
    }

    fn collect_output(&mut self) {
        while let Ok(value) = self.program.read_output() {
            self.output.push(value);
        }
    }

    fn finished(&self) -> RunOutcome {
        let output = self.output.clone();
        let steps = self.program.steps();
        match self.program.error() {
            Some(error) => RunOutcome::Failed {
                output,
                steps,
                error: error.clone(),
            },
            None => RunOutcome::Completed { output, steps },
        }
    }

    /// Everything the program has output so far.
    pub fn output(&self) -> &[Output] {
        &self.output
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// Render output values as text.
pub fn render_output(output: &[Output]) -> String {
    output.iter().map(Output::to_string).collect()
}
