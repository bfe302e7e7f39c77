//! `g` and `p`: reading and writing the program's own grid.

use crate::error::RuntimeError;
use crate::grid::Grid;
use crate::stack::StackMachine;

/// Grid access instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reflect {
    /// `g`: pop y, x; push the cell at (x, y).
    Get,
    /// `p`: pop y, x, v; store v at (x, y).
    Put,
}

impl Reflect {
    pub fn from_char(c: char) -> Option<Reflect> {
        match c {
            'g' => Some(Reflect::Get),
            'p' => Some(Reflect::Put),
            _ => None,
        }
    }

    pub fn apply(self, stack: &mut StackMachine, grid: &mut Grid) -> Result<(), RuntimeError> {
        match self {
            Reflect::Get => {
                let (y, x) = stack.pop2()?;
                stack.push(grid.read(x, y));
                Ok(())
            }
            Reflect::Put => {
                stack.require(3)?;
                let (y, x) = stack.pop2()?;
                let v = stack.pop()?;
                grid.write(x, y, v)
            }
        }
    }
}
