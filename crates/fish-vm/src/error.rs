use thiserror::Error;

/// Runtime error raised while executing a program.
///
/// Inside [`Program::step`](crate::Program::step) every variant except
/// [`RuntimeError::ProgramAlreadyTerminated`] terminates the program and is
/// retained for inspection instead of being returned.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RuntimeError {
    /// An operation needed more values than the active stack holds.
    #[error("stack underflow: needed {needed} value(s), found {available}")]
    StackUnderflow { needed: usize, available: usize },

    /// `,` or `%` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// The cell under the instruction pointer is not an instruction.
    #[error("invalid instruction {0:?}")]
    InvalidInstruction(char),

    /// A cell holding a value that is not a Unicode scalar was executed.
    #[error("invalid instruction: cell value {0} is not a character")]
    InvalidCell(f64),

    /// Coordinates outside the grid, or not integral.
    #[error("position ({x}, {y}) is outside the program")]
    OutOfBounds { x: f64, y: f64 },

    /// A direction symbol that is not one of the four cardinal directions.
    #[error("invalid direction {0:?}")]
    InvalidDirection(char),

    /// Read from an empty I/O queue.
    #[error("queue is empty")]
    EmptyQueue,

    /// `step` called after the program terminated.
    #[error("program has already terminated")]
    ProgramAlreadyTerminated,

    /// `o` popped a value that is not a Unicode scalar.
    #[error("cannot output {0} as a character")]
    InvalidCharacter(f64),

    /// `[` popped a count that is negative or not an integer.
    #[error("invalid substack size {0}")]
    InvalidSubstackSize(f64),

    /// Host input that is not exactly one character.
    #[error("input must be a single character, got {0:?}")]
    InvalidInput(String),
}

impl RuntimeError {
    pub(crate) fn underflow(needed: usize, available: usize) -> Self {
        RuntimeError::StackUnderflow { needed, available }
    }
}
