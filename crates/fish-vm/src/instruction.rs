//! Decoding grid cells into instructions.

use crate::arith::BinaryOp;
use crate::direction::Mirror;
use crate::error::RuntimeError;
use crate::reflect::Reflect;
use crate::stack::StackOp;
use crate::value::as_char;

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction {
    /// `0`-`9`, `a`-`f`: push the hexadecimal digit's value.
    Literal(f64),
    /// Direction change.
    Mirror(Mirror),
    /// `!`: skip the next cell.
    Trampoline,
    /// `?`: pop; skip the next cell if the value is zero.
    ConditionalTrampoline,
    Arithmetic(BinaryOp),
    Stack(StackOp),
    Reflect(Reflect),
    /// `.`: pop y, x and jump there.
    Teleport,
    /// `'` or `"`: push every cell up to the matching quote.
    StringMode(char),
    /// `o`
    OutputChar,
    /// `n`
    OutputNumber,
    /// `i`
    Input,
    /// `;`
    Terminate,
    /// Space.
    Nop,
}

impl Instruction {
    /// Decode a character.
    pub fn decode(c: char) -> Result<Instruction, RuntimeError> {
        if let Some(digit) = c.to_digit(16)
            && !c.is_ascii_uppercase()
        {
            return Ok(Instruction::Literal(digit as f64));
        }
        if let Some(mirror) = Mirror::from_char(c) {
            return Ok(Instruction::Mirror(mirror));
        }
        if let Some(op) = BinaryOp::from_char(c) {
            return Ok(Instruction::Arithmetic(op));
        }
        if let Some(op) = StackOp::from_char(c) {
            return Ok(Instruction::Stack(op));
        }
        if let Some(op) = Reflect::from_char(c) {
            return Ok(Instruction::Reflect(op));
        }

        let instruction = match c {
            '!' => Instruction::Trampoline,
            '?' => Instruction::ConditionalTrampoline,
            '.' => Instruction::Teleport,
            '\'' | '"' => Instruction::StringMode(c),
            'o' => Instruction::OutputChar,
            'n' => Instruction::OutputNumber,
            'i' => Instruction::Input,
            ';' => Instruction::Terminate,
            ' ' => Instruction::Nop,
            other => return Err(RuntimeError::InvalidInstruction(other)),
        };
        Ok(instruction)
    }

    /// Decode a grid cell value.
    pub fn decode_cell(value: f64) -> Result<Instruction, RuntimeError> {
        let c = as_char(value).ok_or(RuntimeError::InvalidCell(value))?;
        Instruction::decode(c)
    }
}
