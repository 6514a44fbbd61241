use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Move, Position, Tile};

/// A square grid of optional tiles.
///
/// The grid exclusively owns every placed tile; a removed tile is handed
/// back to the caller and is never aliased by another grid. Invariant:
/// at most one tile per cell, and each placed tile's recorded `position`
/// equals the cell it occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty `size` x `size` grid.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be positive");
        Grid {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, position: Position) -> usize {
        position.x * self.size + position.y
    }

    #[inline]
    pub fn is_in_bounds(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Every empty cell, x-outer scan order.
    ///
    /// The order only matters insofar as it is stable: random spawning picks
    /// uniformly from this list.
    pub fn available_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for x in 0..self.size {
            for y in 0..self.size {
                let position = Position::new(x, y);
                if self.cell_content(position).is_none() {
                    cells.push(position);
                }
            }
        }
        cells
    }

    pub fn has_available_cells(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_none())
    }

    /// A uniformly random empty cell, or `None` iff the grid is full.
    pub fn random_available_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let cells = self.available_cells();
        if cells.is_empty() {
            return None;
        }
        Some(cells[rng.gen_range(0..cells.len())])
    }

    /// The tile at `position`, or `None` when the cell is empty or the
    /// position lies outside the grid. Safe for any position.
    pub fn cell_content(&self, position: Position) -> Option<&Tile> {
        if self.is_in_bounds(position) {
            self.cells[self.index(position)].as_ref()
        } else {
            None
        }
    }

    /// Place `tile` at its own recorded position.
    ///
    /// # Panics
    ///
    /// Panics if that position is out of bounds: misplacing a tile is a
    /// contract violation, distinguishable from the `None` an empty-cell
    /// query returns.
    pub fn insert(&mut self, tile: Tile) {
        assert!(
            self.is_in_bounds(tile.position),
            "tile position out of bounds: ({}, {})",
            tile.position.x,
            tile.position.y
        );
        let idx = self.index(tile.position);
        self.cells[idx] = Some(tile);
    }

    /// Clear the cell at `position`, returning the tile that occupied it.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn remove(&mut self, position: Position) -> Option<Tile> {
        assert!(
            self.is_in_bounds(position),
            "position out of bounds: ({}, {})",
            position.x,
            position.y
        );
        let idx = self.index(position);
        self.cells[idx].take()
    }

    /// The neighboring cell one step along `direction`, or `None` when the
    /// step would leave the grid.
    pub fn step(&self, position: Position, direction: Move) -> Option<Position> {
        let (dx, dy) = direction.vector();
        let x = position.x.checked_add_signed(dx)?;
        let y = position.y.checked_add_signed(dy)?;
        let next = Position::new(x, y);
        self.is_in_bounds(next).then_some(next)
    }

    /// Iterate over every placed tile, x-outer scan order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().filter_map(Option::as_ref)
    }

    /// Mutable counterpart of [`Grid::tiles`].
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().filter_map(Option::as_mut)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 8);
        for y in 0..self.size {
            if y > 0 {
                writeln!(f, "{rule}")?;
            }
            for x in 0..self.size {
                if x > 0 {
                    write!(f, "|")?;
                }
                match self.cell_content(Position::new(x, y)) {
                    Some(tile) => write!(f, "{:^7}", tile.value)?,
                    None => write!(f, "{:7}", "")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn insert_and_query() {
        let mut grid = Grid::new(4);
        grid.insert(Tile::new(Position::new(2, 1), 8));
        assert_eq!(grid.cell_content(Position::new(2, 1)).map(|t| t.value), Some(8));
        assert_eq!(grid.cell_content(Position::new(1, 2)), None);
        // Out of bounds is an empty query, not a panic
        assert_eq!(grid.cell_content(Position::new(4, 0)), None);
        assert_eq!(grid.cell_content(Position::new(0, 17)), None);
    }

    #[test]
    fn remove_returns_the_tile() {
        let mut grid = Grid::new(4);
        grid.insert(Tile::new(Position::new(0, 0), 2));
        let tile = grid.remove(Position::new(0, 0)).unwrap();
        assert_eq!(tile.value, 2);
        assert_eq!(grid.cell_content(Position::new(0, 0)), None);
        assert_eq!(grid.remove(Position::new(0, 0)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn insert_out_of_bounds_panics() {
        let mut grid = Grid::new(4);
        grid.insert(Tile::new(Position::new(4, 0), 2));
    }

    #[test]
    fn available_cells_scan_order() {
        let mut grid = Grid::new(2);
        grid.insert(Tile::new(Position::new(0, 1), 2));
        assert_eq!(
            grid.available_cells(),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
        );
        assert!(grid.has_available_cells());
    }

    #[test]
    fn random_available_cell_is_none_iff_full() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(2);
        for x in 0..2 {
            for y in 0..2 {
                assert!(grid.random_available_cell(&mut rng).is_some());
                grid.insert(Tile::new(Position::new(x, y), 2));
            }
        }
        assert!(!grid.has_available_cells());
        assert_eq!(grid.random_available_cell(&mut rng), None);
    }

    #[test]
    fn step_stops_at_every_edge() {
        let grid = Grid::new(4);
        assert_eq!(grid.step(Position::new(0, 0), Move::Up), None);
        assert_eq!(grid.step(Position::new(0, 0), Move::Left), None);
        assert_eq!(grid.step(Position::new(3, 3), Move::Down), None);
        assert_eq!(grid.step(Position::new(3, 3), Move::Right), None);
        assert_eq!(
            grid.step(Position::new(1, 2), Move::Up),
            Some(Position::new(1, 1))
        );
        assert_eq!(
            grid.step(Position::new(1, 2), Move::Right),
            Some(Position::new(2, 2))
        );
    }
}
