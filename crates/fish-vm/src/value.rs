//! Numeric values and the things a program emits.
//!
//! Every stack slot and grid cell holds an `f64`. Characters enter the
//! machine as their code point and leave it through [`Output`].

use std::fmt;

/// A value emitted to the output queue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Output {
    /// Emitted by `o`.
    Char(char),
    /// Emitted by `n`.
    Number(f64),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Char(c) => write!(f, "{}", c),
            Output::Number(n) => write!(f, "{}", format_number(*n)),
        }
    }
}

/// Textual form of a number as printed by `n`.
///
/// Integral values print without a fractional part; everything else uses the
/// shortest representation that round-trips.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Interpret a value as a non-negative integer index.
pub fn as_index(n: f64) -> Option<usize> {
    if n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n < usize::MAX as f64 {
        Some(n as usize)
    } else {
        None
    }
}

/// Interpret a value as a Unicode scalar.
pub fn as_char(n: f64) -> Option<char> {
    if n.is_finite() && n.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&n) {
        char::from_u32(n as u32)
    } else {
        None
    }
}

/// Numeric value of a character.
pub fn code_point(c: char) -> f64 {
    c as u32 as f64
}
