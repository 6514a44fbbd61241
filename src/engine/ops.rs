use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::state::{Move, Position, Tile};

/// Tile value that wins the game.
pub const WIN_VALUE: u32 = 2048;

/// One merge produced during a single move resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeEvent {
    /// Cell the merged tile landed on.
    pub position: Position,
    /// Value of the merged tile (double the sources).
    pub value: u32,
}

/// Outcome of resolving one directional move, before any random spawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// True iff any tile's final cell differs from its pre-move cell.
    pub moved: bool,
    /// Sum of all merged-tile values this move.
    pub score_delta: u64,
    /// True iff some merge reached [`WIN_VALUE`].
    pub won: bool,
    /// Merges in traversal order.
    pub merges: Vec<MergeEvent>,
}

/// Slide and merge every tile in `direction`.
///
/// Tiles closest to the destination edge are processed first so chained
/// slides resolve correctly, and a tile produced by a merge cannot merge
/// again within the same call. The returned outcome carries the score
/// delta and merge events; spawning the follow-up random tile is the
/// caller's job (see [`spawn_random_tile`]).
///
/// ```
/// use twenty48::engine::{resolve, Grid, Move, Position, Tile};
///
/// let mut grid = Grid::new(4);
/// grid.insert(Tile::new(Position::new(0, 0), 2));
/// grid.insert(Tile::new(Position::new(3, 0), 2));
/// let outcome = resolve(&mut grid, Move::Left);
/// assert!(outcome.moved);
/// assert_eq!(outcome.score_delta, 4);
/// assert_eq!(grid.cell_content(Position::new(0, 0)).map(|t| t.value), Some(4));
/// ```
pub fn resolve(grid: &mut Grid, direction: Move) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();

    // Uniform pre-move snapshot: every tile's render history must reflect
    // the state before any tile has moved.
    for tile in grid.tiles_mut() {
        tile.clear_merge_history();
        tile.save_position();
    }

    let (xs, ys) = traversals(grid.size(), direction);
    for &x in &xs {
        for &y in &ys {
            let cell = Position::new(x, y);
            let value = match grid.cell_content(cell) {
                Some(tile) => tile.value,
                None => continue,
            };
            let (farthest, next) = find_farthest(grid, cell, direction);

            let merge_target = next.filter(|&p| {
                grid.cell_content(p)
                    .is_some_and(|n| n.value == value && n.merged_from.is_none())
            });

            if let Some(target) = merge_target {
                let mut moving = grid.remove(cell).expect("traversal cell is occupied");
                let stationary = grid.remove(target).expect("merge target is occupied");
                // Converge the mover onto the target so a renderer can
                // animate both sources into the merged tile.
                moving.move_to(target);

                let merged_value = value * 2;
                let mut merged = Tile::new(target, merged_value);
                merged.merged_from = Some(Box::new([moving, stationary]));
                grid.insert(merged);

                trace!("merged {value}+{value} -> {merged_value} at ({}, {})", target.x, target.y);
                outcome.score_delta += u64::from(merged_value);
                outcome.merges.push(MergeEvent {
                    position: target,
                    value: merged_value,
                });
                if merged_value >= WIN_VALUE {
                    outcome.won = true;
                }
                outcome.moved = true;
            } else if farthest != cell {
                let mut tile = grid.remove(cell).expect("traversal cell is occupied");
                tile.move_to(farthest);
                grid.insert(tile);
                outcome.moved = true;
            }
        }
    }
    outcome
}

/// Cell visiting order for a move: `0..size` on both axes, with the axis
/// sequence reversed when its vector component is positive, so tiles
/// nearest the destination edge go first.
fn traversals(size: usize, direction: Move) -> (Vec<usize>, Vec<usize>) {
    let (dx, dy) = direction.vector();
    let mut xs: Vec<usize> = (0..size).collect();
    let mut ys: Vec<usize> = (0..size).collect();
    if dx == 1 {
        xs.reverse();
    }
    if dy == 1 {
        ys.reverse();
    }
    (xs, ys)
}

/// Walk from `start` along `direction`: the last empty in-bounds cell
/// reached, plus the first obstacle (`None` when the walk fell off the
/// grid, otherwise the occupied cell a merge would target).
fn find_farthest(grid: &Grid, start: Position, direction: Move) -> (Position, Option<Position>) {
    let mut farthest = start;
    loop {
        match grid.step(farthest, direction) {
            Some(next) if grid.cell_content(next).is_none() => farthest = next,
            next => return (farthest, next),
        }
    }
}

/// True while at least one move can still change the grid: an empty cell
/// exists, or two equal tiles touch orthogonally.
///
/// The adjacency scan always checks exactly the four fixed directions,
/// independent of grid size.
pub fn movable(grid: &Grid) -> bool {
    if grid.has_available_cells() {
        return true;
    }
    for x in 0..grid.size() {
        for y in 0..grid.size() {
            let cell = Position::new(x, y);
            let Some(tile) = grid.cell_content(cell) else {
                continue;
            };
            for direction in Move::ALL {
                let matched = grid
                    .step(cell, direction)
                    .and_then(|neighbor| grid.cell_content(neighbor))
                    .is_some_and(|other| other.value == tile.value);
                if matched {
                    return true;
                }
            }
        }
    }
    false
}

/// Place a random tile (2 with 90% probability, 4 otherwise) on a uniformly
/// random empty cell, returning where it landed.
///
/// A full grid is not an error: the spawn is silently skipped and `None`
/// is returned, which the terminal-state check relies on.
pub fn spawn_random_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Position> {
    let position = grid.random_available_cell(rng)?;
    let value = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
    grid.insert(Tile::new(position, value));
    Some(position)
}
