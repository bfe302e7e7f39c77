use crate::direction::Direction;
use crate::error::RuntimeError;
use crate::value::as_index;

/// The instruction pointer: a position on the grid and a facing direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionPointer {
    pub x: i64,
    pub y: i64,
    pub direction: Direction,
}

impl Default for InstructionPointer {
    /// One cell left of the origin, facing east, so the first advance lands
    /// on `(0, 0)`.
    fn default() -> Self {
        Self {
            x: -1,
            y: 0,
            direction: Direction::East,
        }
    }
}

impl InstructionPointer {
    pub fn new(x: i64, y: i64, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    /// Move one cell forward, wrapping around the edges of a
    /// `width` x `height` torus.
    pub fn advance(&mut self, width: usize, height: usize) {
        let (dx, dy) = self.direction.delta();
        self.x = wrap(self.x + dx, width);
        self.y = wrap(self.y + dy, height);
    }

    /// Jump to `(x, y)`, which must be an integral position on the grid.
    pub fn teleport(
        &mut self,
        x: f64,
        y: f64,
        width: usize,
        height: usize,
    ) -> Result<(), RuntimeError> {
        match (as_index(x), as_index(y)) {
            (Some(col), Some(row)) if col < width && row < height => {
                self.x = col as i64;
                self.y = row as i64;
                Ok(())
            }
            _ => Err(RuntimeError::OutOfBounds { x, y }),
        }
    }

    pub fn change_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

fn wrap(coord: i64, size: usize) -> i64 {
    if size == 0 {
        coord
    } else {
        coord.rem_euclid(size as i64)
    }
}
