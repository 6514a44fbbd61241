use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
///
/// `x` runs left to right, `y` top to bottom; both are valid for a grid of
/// side `size` iff they are `< size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

/// A value-bearing tile occupying one grid cell.
///
/// `previous_position` and `merged_from` exist purely for renderers:
/// they record where the tile sat before the last move and, for a tile
/// produced by a merge, the two tiles that converged into it. Both are
/// reset at the start of every move resolution and survive exactly one
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub position: Position,
    pub value: u32,
    pub previous_position: Option<Position>,
    pub merged_from: Option<Box<[Tile; 2]>>,
}

impl Tile {
    /// A fresh tile with no render history.
    pub fn new(position: Position, value: u32) -> Self {
        Tile {
            position,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Record the current position so a renderer can animate from it.
    /// Called once per move, before any tile has moved.
    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position);
    }

    /// Relocate the tile. History captured by `save_position` is untouched.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Drop merge provenance carried over from the previous move.
    pub fn clear_merge_history(&mut self) {
        self.merged_from = None;
    }
}

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    /// All four directions, in the classic encoding order
    /// (0: up, 1: right, 2: down, 3: left).
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    /// Unit vector on the grid: positive `x` runs right, positive `y` runs
    /// down.
    #[inline]
    pub fn vector(self) -> (isize, isize) {
        match self {
            Move::Up => (0, -1),
            Move::Right => (1, 0),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Right => "right",
            Move::Down => "down",
            Move::Left => "left",
        };
        write!(f, "{name}")
    }
}

/// Error returned when a direction cannot be parsed from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction `{0}`, expected one of up/right/down/left")]
pub struct ParseMoveError(String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parse a direction name or its single-letter shorthand.
    ///
    /// ```
    /// use twenty48::engine::Move;
    ///
    /// assert_eq!("left".parse::<Move>(), Ok(Move::Left));
    /// assert_eq!("U".parse::<Move>(), Ok(Move::Up));
    /// assert!("sideways".parse::<Move>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "right" | "r" => Ok(Move::Right),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            other => Err(ParseMoveError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_position_captures_pre_move_cell() {
        let mut tile = Tile::new(Position::new(1, 2), 4);
        assert_eq!(tile.previous_position, None);
        tile.save_position();
        tile.move_to(Position::new(0, 2));
        assert_eq!(tile.position, Position::new(0, 2));
        assert_eq!(tile.previous_position, Some(Position::new(1, 2)));
    }

    #[test]
    fn move_to_leaves_history_alone() {
        let mut tile = Tile::new(Position::new(3, 3), 2);
        tile.save_position();
        tile.move_to(Position::new(3, 0));
        tile.move_to(Position::new(3, 1));
        assert_eq!(tile.previous_position, Some(Position::new(3, 3)));
    }

    #[test]
    fn vectors_match_directions() {
        assert_eq!(Move::Up.vector(), (0, -1));
        assert_eq!(Move::Right.vector(), (1, 0));
        assert_eq!(Move::Down.vector(), (0, 1));
        assert_eq!(Move::Left.vector(), (-1, 0));
    }

    #[test]
    fn parse_and_display_round_trip() {
        for dir in Move::ALL {
            assert_eq!(dir.to_string().parse::<Move>(), Ok(dir));
        }
        assert!("".parse::<Move>().is_err());
        assert!("upp".parse::<Move>().is_err());
    }
}
