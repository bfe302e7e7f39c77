//! Directions and the mirror table.

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::RuntimeError;

/// Facing direction of the instruction pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions, in clockwise order from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The direction pointing the other way.
    pub fn reversed(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit step as `(dx, dy)`; y grows southward.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = RuntimeError;

    /// Accepts `N`/`E`/`S`/`W` as well as the arrow instructions.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'N' | '^' => Ok(Direction::North),
            'E' | '>' => Ok(Direction::East),
            'S' | 'v' => Ok(Direction::South),
            'W' | '<' => Ok(Direction::West),
            other => Err(RuntimeError::InvalidDirection(other)),
        }
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..4)]
    }
}

/// Source of directions for the `x` instruction.
pub trait Compass: Send {
    /// Pick the next direction.
    fn choose(&mut self) -> Direction;
}

/// A [`Compass`] drawing uniformly from a random number generator.
#[derive(Clone, Debug)]
pub struct RandomCompass<R = StdRng> {
    rng: R,
}

impl RandomCompass<StdRng> {
    /// Compass seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Compass with a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomCompass<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Compass for RandomCompass<R> {
    fn choose(&mut self) -> Direction {
        self.rng.r#gen()
    }
}

/// A direction-changing instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirror {
    /// `>`, `<`, `^`, `v`.
    Arrow(Direction),
    /// `/`
    Slash,
    /// `\`
    Backslash,
    /// `|`
    Vertical,
    /// `_`
    Horizontal,
    /// `#`
    Reverse,
    /// `x`
    Random,
}

impl Mirror {
    pub fn from_char(c: char) -> Option<Mirror> {
        let mirror = match c {
            '>' => Mirror::Arrow(Direction::East),
            '<' => Mirror::Arrow(Direction::West),
            '^' => Mirror::Arrow(Direction::North),
            'v' => Mirror::Arrow(Direction::South),
            '/' => Mirror::Slash,
            '\\' => Mirror::Backslash,
            '|' => Mirror::Vertical,
            '_' => Mirror::Horizontal,
            '#' => Mirror::Reverse,
            'x' => Mirror::Random,
            _ => return None,
        };
        Some(mirror)
    }

    /// New direction for a pointer travelling `current` that hits this mirror.
    pub fn redirect(self, current: Direction, compass: &mut dyn Compass) -> Direction {
        use Direction::*;

        match self {
            Mirror::Arrow(d) => d,
            Mirror::Slash => match current {
                East => North,
                North => East,
                West => South,
                South => West,
            },
            Mirror::Backslash => match current {
                East => South,
                South => East,
                West => North,
                North => West,
            },
            Mirror::Vertical => match current {
                East | West => current.reversed(),
                North | South => current,
            },
            Mirror::Horizontal => match current {
                North | South => current.reversed(),
                East | West => current,
            },
            Mirror::Reverse => current.reversed(),
            Mirror::Random => compass.choose(),
        }
    }
}
