//! The program grid.
//!
//! The source text fixes the *program extent*: `width` columns by `height`
//! rows, stored densely and walked by the instruction pointer. Cells written
//! by `p` outside that box go into a sparse overflow map; they extend the
//! grid as seen by `g` but never become part of the pointer's torus.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RuntimeError;
use crate::value::{as_char, as_index, code_point};

const PADDING: char = ' ';

/// A mutable two-dimensional grid of cell values.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cells of the program extent.
    cells: Vec<f64>,
    /// Cells outside the program extent, keyed by `(y, x)`.
    overflow: BTreeMap<(usize, usize), f64>,
}

impl Grid {
    /// Build a grid from source text.
    ///
    /// Lines are split on `\n` (a trailing `\r` is dropped) and padded with
    /// spaces to the length of the longest line.
    pub fn from_source(source: &str) -> Self {
        let lines: Vec<Vec<char>> = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
            .collect();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);
        let height = lines.len();

        let mut cells = Vec::with_capacity(width * height);
        for line in &lines {
            cells.extend(line.iter().copied().map(code_point));
            cells.extend(std::iter::repeat_n(code_point(PADDING), width - line.len()));
        }

        Self {
            width,
            height,
            cells,
            overflow: BTreeMap::new(),
        }
    }

    /// Width of the program extent.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the program extent.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns and rows covered by the program extent and every overflow cell.
    pub fn extent(&self) -> (usize, usize) {
        self.overflow
            .keys()
            .fold((self.width, self.height), |(w, h), &(y, x)| {
                (w.max(x.saturating_add(1)), h.max(y.saturating_add(1)))
            })
    }

    fn in_program(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Cell at integer coordinates inside the program extent.
    pub fn cell(&self, x: i64, y: i64) -> Option<f64> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        if self.in_program(x, y) {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Read a cell for `g`. Anything outside the grid reads as 0.
    pub fn read(&self, x: f64, y: f64) -> f64 {
        let (Some(x), Some(y)) = (as_index(x), as_index(y)) else {
            return 0.0;
        };
        if self.in_program(x, y) {
            self.cells[y * self.width + x]
        } else {
            self.overflow.get(&(y, x)).copied().unwrap_or(0.0)
        }
    }

    /// Write a cell for `p`.
    ///
    /// Negative, fractional or non-finite coordinates are rejected. Writes
    /// outside the program extent grow the grid.
    pub fn write(&mut self, x: f64, y: f64, value: f64) -> Result<(), RuntimeError> {
        let (Some(col), Some(row)) = (as_index(x), as_index(y)) else {
            return Err(RuntimeError::OutOfBounds { x, y });
        };
        if self.in_program(col, row) {
            self.cells[row * self.width + col] = value;
        } else {
            self.overflow.insert((row, col), value);
        }
        Ok(())
    }

    /// Cells written outside the program extent, as `(x, y, value)` in row
    /// order.
    pub fn overflow(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.overflow.iter().map(|(&(y, x), &v)| (x, y, v))
    }

    /// Render the program extent as text, one line per row.
    ///
    /// Cells that do not hold a character render as `?`, empty cells as
    /// spaces.
    pub fn rows(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height];
        }
        self.cells
            .chunks(self.width)
            .take(self.height)
            .map(|row| row.iter().map(|&value| render_cell(value)).collect())
            .collect()
    }
}

fn render_cell(value: f64) -> char {
    match as_char(value) {
        Some('\0') => PADDING,
        Some(c) => c,
        None => '?',
    }
}

/// The program rows, followed by one `x,y: c` line per overflow cell.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        for (x, y, value) in self.overflow() {
            write!(f, "\n{},{}: {}", x, y, render_cell(value))?;
        }
        Ok(())
    }
}
