//! # Model Module
//!
//! The immutable value types the maze is built from: grid coordinates,
//! compass directions, and the directed passages joining locations, along
//! with the entities that inhabit them.

pub mod entities;
pub mod location;
pub mod player;

pub use entities::*;
pub use location::*;
pub use player::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{WarrenError, WarrenResult};

/// A coordinate in the grid space.
///
/// `x` is the row index and `y` the column index, both zero-based and
/// non-negative. Positions compare by value and order row-major (`x` first,
/// then `y`); the ordering exists only for deterministic tie-breaking.
///
/// # Examples
///
/// ```
/// use warren::Position;
///
/// let a = Position::new(1, 2);
/// let b = Position::new(1, 2);
/// assert_eq!(a, b);
/// assert!(Position::new(0, 9) < Position::new(1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Creates a new position at the given row and column.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four compass directions a passage can lead in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns the opposite direction.
    ///
    /// Reversal is involutive: `d.reverse().reverse() == d`.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::Direction;
    ///
    /// assert_eq!(Direction::North.reverse(), Direction::South);
    /// assert_eq!(Direction::East.reverse().reverse(), Direction::East);
    /// ```
    pub fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns all four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Direction {
    type Err = WarrenError;

    fn from_str(s: &str) -> WarrenResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            other => Err(WarrenError::InvalidArgument(format!(
                "unknown direction '{}'",
                other
            ))),
        }
    }
}

/// A directed, one-hop connection from one location to another.
///
/// A passage is usable from exactly one location: the one whose passage list
/// it appears in. Equality is by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Passage {
    /// Where the passage leads
    pub to: Position,
    /// The compass direction of travel
    pub direction: Direction,
}

impl Passage {
    /// Creates a passage leading to `to` in the given direction.
    pub fn new(to: Position, direction: Direction) -> Self {
        Self { to, direction }
    }
}

impl fmt::Display for Passage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.to, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_equality_and_order() {
        assert_eq!(Position::new(3, 4), Position::new(3, 4));
        assert_ne!(Position::new(3, 4), Position::new(4, 3));
        // Row-major: row decides first, column breaks ties.
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 5));
    }

    #[test]
    fn test_direction_reverse_is_involutive() {
        for direction in Direction::all() {
            assert_eq!(direction.reverse().reverse(), direction);
        }
    }

    #[test]
    fn test_direction_reverse_pairs() {
        assert_eq!(Direction::North.reverse(), Direction::South);
        assert_eq!(Direction::South.reverse(), Direction::North);
        assert_eq!(Direction::East.reverse(), Direction::West);
        assert_eq!(Direction::West.reverse(), Direction::East);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("north".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("E".parse::<Direction>().unwrap(), Direction::East);
        assert_eq!(" w ".parse::<Direction>().unwrap(), Direction::West);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_passage_value_equality() {
        let a = Passage::new(Position::new(1, 1), Direction::East);
        let b = Passage::new(Position::new(1, 1), Direction::East);
        let c = Passage::new(Position::new(1, 1), Direction::West);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
