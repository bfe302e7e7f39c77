//! Binary arithmetic and comparison operators.

use crate::error::RuntimeError;
use crate::stack::StackMachine;

/// A binary operator. `x` is the value popped first (the top of the stack),
/// `y` the one beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `,`
    Div,
    /// `%`
    Mod,
    /// `=`
    Eq,
    /// `)`
    Gt,
    /// `(`
    Lt,
}

impl BinaryOp {
    pub fn from_char(c: char) -> Option<BinaryOp> {
        let op = match c {
            '+' => BinaryOp::Add,
            '-' => BinaryOp::Sub,
            '*' => BinaryOp::Mul,
            ',' => BinaryOp::Div,
            '%' => BinaryOp::Mod,
            '=' => BinaryOp::Eq,
            ')' => BinaryOp::Gt,
            '(' => BinaryOp::Lt,
            _ => return None,
        };
        Some(op)
    }

    /// Compute `y op x`.
    pub fn eval(self, x: f64, y: f64) -> Result<f64, RuntimeError> {
        let result = match self {
            BinaryOp::Add => y + x,
            BinaryOp::Sub => y - x,
            BinaryOp::Mul => y * x,
            BinaryOp::Div => {
                if x == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                y / x
            }
            BinaryOp::Mod => {
                if x == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                // Floor-style: the result takes the sign of the divisor.
                ((y % x) + x) % x
            }
            BinaryOp::Eq => bool_value(y == x),
            BinaryOp::Gt => bool_value(y > x),
            BinaryOp::Lt => bool_value(y < x),
        };
        Ok(result)
    }

    /// Pop two operands, push the result.
    pub fn apply(self, stack: &mut StackMachine) -> Result<(), RuntimeError> {
        let (x, y) = stack.pop2()?;
        let result = self.eval(x, y)?;
        stack.push(result);
        Ok(())
    }
}

fn bool_value(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
