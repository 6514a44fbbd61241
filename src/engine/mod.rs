//! Engine module: the tile/grid state machine and the move-resolution
//! algorithm. Public API stays small and ergonomic.
//!
//! - [`Grid`] owns the placed tiles; [`Tile`] carries the render history
//!   ([`Tile::previous_position`], [`Tile::merged_from`]) that lets an
//!   external renderer animate a move it never observed.
//! - [`resolve`] slides and merges in one direction and reports the
//!   outcome; [`movable`] and [`spawn_random_tile`] cover the terminal
//!   check and the post-move spawn.
//!
//! The engine is synchronous and RNG-generic: randomness only enters
//! through [`spawn_random_tile`], so a seeded `StdRng` makes whole games
//! deterministic.

mod grid;
mod ops;
mod state;

pub use grid::Grid;
pub use ops::{movable, resolve, spawn_random_tile, MergeEvent, MoveOutcome, WIN_VALUE};
pub use state::{Move, ParseMoveError, Position, Tile};
