//! Game session: orchestrates repeated moves against one grid, spawns the
//! follow-up tiles, tracks score and terminal flags, and publishes a
//! read-only [`Snapshot`] after every move or restart.
//!
//! The session is the seam between the pure engine and the outside world:
//! an input source calls [`Session::apply_move`] / [`Session::restart`],
//! a renderer consumes the returned snapshot (including per-tile render
//! history), and a best-score collaborator reads `score` off the same
//! snapshot. The session itself performs no I/O.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{self, Grid, MergeEvent, Move, Tile};

/// Default grid side length.
pub const DEFAULT_SIZE: usize = 4;
/// Default number of tiles dealt by a new game or restart.
pub const DEFAULT_START_TILES: usize = 2;

/// Read-only view of the session, published after every move or restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All placed tiles, with the render history (`previous_position`,
    /// `merged_from`) of the move that produced this snapshot.
    pub tiles: Vec<Tile>,
    pub score: u64,
    pub over: bool,
    pub won: bool,
    /// Whether the move that produced this snapshot changed the grid.
    pub moved: bool,
    /// Merges resolved by that move, in traversal order.
    pub merges: Vec<MergeEvent>,
}

/// One game of 2048: authoritative grid, score, and terminal flags.
///
/// `over` and `won` are monotonic: once set they stay set until an
/// explicit [`Session::restart`], and either one makes the session
/// reject further moves.
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use twenty48::engine::Move;
/// use twenty48::session::Session;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut session = Session::new(4, 2, &mut rng);
/// let snapshot = session.apply_move(Move::Left, &mut rng);
/// assert!(!snapshot.over);
/// assert!(snapshot.tiles.len() >= 2);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    score: u64,
    over: bool,
    won: bool,
    start_tiles: usize,
}

impl Session {
    /// Start a game on a `size` x `size` grid with `start_tiles` dealt.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new<R: Rng + ?Sized>(size: usize, start_tiles: usize, rng: &mut R) -> Self {
        let mut session = Session {
            grid: Grid::new(size),
            score: 0,
            over: false,
            won: false,
            start_tiles,
        };
        session.deal_start_tiles(rng);
        session
    }

    /// Convenience: defaults (4x4, two start tiles) with thread-local RNG.
    pub fn new_thread() -> Self {
        let mut rng = rand::thread_rng();
        Session::new(DEFAULT_SIZE, DEFAULT_START_TILES, &mut rng)
    }

    /// Resolve one directional move and publish the resulting snapshot.
    ///
    /// Ignored entirely once the session is over or won: the snapshot is
    /// republished unchanged with `moved` false. Otherwise the move is
    /// resolved; iff it changed the grid, the score is accumulated, one
    /// random tile is spawned, and the terminal state is re-evaluated.
    /// A no-op move spawns nothing and changes nothing.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Move, rng: &mut R) -> Snapshot {
        if self.over || self.won {
            return self.snapshot();
        }

        let outcome = engine::resolve(&mut self.grid, direction);
        if outcome.moved {
            self.score += outcome.score_delta;
            if outcome.won {
                self.won = true;
                debug!("reached {} at score {}", engine::WIN_VALUE, self.score);
            }
            engine::spawn_random_tile(&mut self.grid, rng);
            if !engine::movable(&self.grid) {
                self.over = true;
                debug!("no moves left at score {}", self.score);
            }
        }
        self.snapshot_for_move(outcome.moved, outcome.merges)
    }

    /// Convenience: [`Session::apply_move`] with thread-local RNG.
    pub fn apply_move_thread(&mut self, direction: Move) -> Snapshot {
        let mut rng = rand::thread_rng();
        self.apply_move(direction, &mut rng)
    }

    /// Rebuild an empty grid, reset score and flags, deal the start tiles,
    /// and publish the fresh snapshot.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Snapshot {
        self.grid = Grid::new(self.grid.size());
        self.score = 0;
        self.over = false;
        self.won = false;
        self.deal_start_tiles(rng);
        self.snapshot()
    }

    /// The current published view, with no move attributed to it.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_for_move(false, Vec::new())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    fn deal_start_tiles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..self.start_tiles {
            engine::spawn_random_tile(&mut self.grid, rng);
        }
    }

    fn snapshot_for_move(&self, moved: bool, merges: Vec<MergeEvent>) -> Snapshot {
        Snapshot {
            tiles: self.grid.tiles().cloned().collect(),
            score: self.score,
            over: self.over,
            won: self.won,
            moved,
            merges,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new_thread()
    }
}
