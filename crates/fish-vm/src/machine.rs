use log::{debug, trace};

use crate::direction::{Compass, RandomCompass};
use crate::error::RuntimeError;
use crate::grid::Grid;
use crate::instruction::Instruction;
use crate::io::Queue;
use crate::pointer::InstructionPointer;
use crate::stack::StackMachine;
use crate::value::{Output, as_char, code_point};

/// How a program ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Reached `;`.
    Normal,
    /// An instruction failed; see [`Program::error`].
    Error,
}

/// Execution state of a program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgramState {
    Running,
    /// Inside a string literal closed by the given quote.
    ReadingString(char),
    Terminated(Termination),
}

/// A running ><> program.
///
/// The program never loops on its own: the host calls [`Program::step`]
/// until [`Program::has_terminated`] reports true, feeding input and
/// draining output in between.
pub struct Program {
    source: String,
    grid: Grid,
    ip: InstructionPointer,
    stack: StackMachine,
    input: Queue<char>,
    output: Queue<Output>,
    state: ProgramState,
    error: Option<RuntimeError>,
    compass: Box<dyn Compass>,
    steps: u64,
}

impl Program {
    /// Load `source` with `initial_stack` (bottom first) and an
    /// entropy-seeded compass for `x`.
    pub fn new(source: &str, initial_stack: &[f64]) -> Self {
        Self::with_compass(source, initial_stack, RandomCompass::from_entropy())
    }

    /// Load `source` using `compass` to pick directions for `x`.
    pub fn with_compass(
        source: &str,
        initial_stack: &[f64],
        compass: impl Compass + 'static,
    ) -> Self {
        let grid = Grid::from_source(source);
        debug!(
            "loaded {}x{} program with {} initial value(s)",
            grid.width(),
            grid.height(),
            initial_stack.len()
        );
        Self {
            source: source.to_string(),
            grid,
            ip: InstructionPointer::default(),
            stack: StackMachine::with_values(initial_stack),
            input: Queue::new(),
            output: Queue::new(),
            state: ProgramState::Running,
            error: None,
            compass: Box::new(compass),
            steps: 0,
        }
    }

    /// Execute one instruction.
    ///
    /// Returns `Ok(true)` if this step terminated the program, whether by `;`
    /// or by an error. Instruction failures never surface here: they end the
    /// program and are kept in [`Program::error`] for the host to report. The only error returned is
    /// [`RuntimeError::ProgramAlreadyTerminated`].
    pub fn step(&mut self) -> Result<bool, RuntimeError> {
        if self.has_terminated() {
            return Err(RuntimeError::ProgramAlreadyTerminated);
        }
        self.steps += 1;

        if let Err(e) = self.execute_step() {
            debug!(
                "program terminated at ({}, {}) after {} step(s): {}",
                self.ip.x, self.ip.y, self.steps, e
            );
            self.state = ProgramState::Terminated(Termination::Error);
            self.error = Some(e);
        }
        Ok(self.has_terminated())
    }

    fn execute_step(&mut self) -> Result<(), RuntimeError> {
        self.advance();
        let cell = self
            .grid
            .cell(self.ip.x, self.ip.y)
            .ok_or(RuntimeError::OutOfBounds {
                x: self.ip.x as f64,
                y: self.ip.y as f64,
            })?;

        if let ProgramState::ReadingString(quote) = self.state {
            if as_char(cell) == Some(quote) {
                debug!("string literal closed at ({}, {})", self.ip.x, self.ip.y);
                self.state = ProgramState::Running;
            } else {
                self.stack.push(cell);
            }
            return Ok(());
        }

        let instruction = Instruction::decode_cell(cell)?;
        trace!(
            "({}, {}) {:?} {:?}",
            self.ip.x, self.ip.y, self.ip.direction, instruction
        );
        self.execute(instruction)
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), RuntimeError> {
        match instruction {
            Instruction::Literal(value) => self.stack.push(value),
            Instruction::Mirror(mirror) => {
                let direction = mirror.redirect(self.ip.direction, self.compass.as_mut());
                self.ip.change_direction(direction);
            }
            Instruction::Trampoline => self.advance(),
            Instruction::ConditionalTrampoline => {
                if self.stack.pop()? == 0.0 {
                    self.advance();
                }
            }
            Instruction::Arithmetic(op) => op.apply(&mut self.stack)?,
            Instruction::Stack(op) => self.stack.apply(op)?,
            Instruction::Reflect(op) => op.apply(&mut self.stack, &mut self.grid)?,
            Instruction::Teleport => {
                let (y, x) = self.stack.pop2()?;
                self.ip
                    .teleport(x, y, self.grid.width(), self.grid.height())?;
            }
            Instruction::StringMode(quote) => {
                self.state = ProgramState::ReadingString(quote);
            }
            Instruction::OutputChar => {
                let value = self.stack.pop()?;
                let c = as_char(value).ok_or(RuntimeError::InvalidCharacter(value))?;
                self.output.write(Output::Char(c));
            }
            Instruction::OutputNumber => {
                let value = self.stack.pop()?;
                self.output.write(Output::Number(value));
            }
            Instruction::Input => {
                let value = match self.input.read() {
                    Ok(c) => code_point(c),
                    Err(_) => -1.0,
                };
                self.stack.push(value);
            }
            Instruction::Terminate => {
                self.state = ProgramState::Terminated(Termination::Normal);
            }
            Instruction::Nop => {}
        }
        Ok(())
    }

    fn advance(&mut self) {
        self.ip.advance(self.grid.width(), self.grid.height());
    }

    /// Queue one character of input.
    pub fn give_input(&mut self, c: char) {
        self.input.write(c);
    }

    /// Queue input given as a string, which must hold exactly one character.
    pub fn give_input_str(&mut self, s: &str) -> Result<(), RuntimeError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                self.give_input(c);
                Ok(())
            }
            _ => Err(RuntimeError::InvalidInput(s.to_string())),
        }
    }

    /// Queue every character of `text`.
    pub fn feed_input(&mut self, text: &str) {
        for c in text.chars() {
            self.give_input(c);
        }
    }

    /// Take the oldest output value.
    pub fn read_output(&mut self) -> Result<Output, RuntimeError> {
        self.output.read()
    }

    /// Take every pending output value.
    pub fn drain_output(&mut self) -> Vec<Output> {
        self.output.drain()
    }

    pub fn has_terminated(&self) -> bool {
        matches!(self.state, ProgramState::Terminated(_))
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// The error that terminated the program, if any.
    pub fn error(&self) -> Option<&RuntimeError> {
        self.error.as_ref()
    }

    /// Number of `step` calls executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn pointer(&self) -> InstructionPointer {
        self.ip
    }

    /// Position the pointer will execute on the next step.
    ///
    /// `None` for a grid with no cells.
    pub fn next_position(&self) -> Option<(i64, i64)> {
        let mut ip = self.ip;
        ip.advance(self.grid.width(), self.grid.height());
        self.grid.cell(ip.x, ip.y).map(|_| (ip.x, ip.y))
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Copy of the grid, including cells written by `p`.
    pub fn grid(&self) -> Grid {
        self.grid.clone()
    }

    /// Copy of the active stack, bottom to top.
    pub fn stack(&self) -> Vec<f64> {
        self.stack.as_slice().to_vec()
    }

    pub fn register(&self) -> Option<f64> {
        self.stack.register()
    }

    /// Number of stacks archived beneath the active one.
    pub fn substack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Copy of the pending input.
    pub fn input_buffer(&self) -> Vec<char> {
        self.input.snapshot()
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("ip", &self.ip)
            .field("state", &self.state)
            .field("stack", &self.stack)
            .field("steps", &self.steps)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
