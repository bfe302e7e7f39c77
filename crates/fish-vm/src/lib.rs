//! ><> Virtual Machine
//!
//! This crate provides the execution engine for ><> ("fish"), a
//! two-dimensional stack language. A program is a grid of characters walked
//! by an instruction pointer; every cell it lands on is one instruction.
//!
//! # Architecture
//!
//! The engine handles:
//! - The program grid, including self-modification through `g` and `p`
//! - The instruction pointer with toroidal movement and teleportation
//! - The stack machine: active stack, register and stack-of-stacks
//! - Instruction decoding and single-step dispatch
//! - Input and output queues shared with the host
//!
//! Running a program to completion is the host's job: [`Program::step`]
//! executes exactly one instruction and returns.
//!
//! # Example
//!
//! ```
//! use fish_vm::Program;
//!
//! let mut program = Program::new("12+n;", &[]);
//! while !program.has_terminated() {
//!     program.step()?;
//! }
//! assert_eq!(program.read_output()?.to_string(), "3");
//! # Ok::<(), fish_vm::RuntimeError>(())
//! ```

mod arith;
mod direction;
mod error;
mod grid;
mod instruction;
mod io;
mod machine;
mod pointer;
mod reflect;
mod stack;
mod value;

pub use arith::BinaryOp;
pub use direction::{Compass, Direction, Mirror, RandomCompass};
pub use error::RuntimeError;
pub use grid::Grid;
pub use instruction::Instruction;
pub use io::Queue;
pub use machine::{Program, ProgramState, Termination};
pub use pointer::InstructionPointer;
pub use reflect::Reflect;
pub use stack::{StackMachine, StackOp};
pub use value::{Output, as_char, format_number};
