//! twenty48: a 2048 move-resolution engine.
//!
//! This crate provides:
//! - A tile/grid model (`engine` module) that keeps per-tile render
//!   history (previous position, merge provenance) for external renderers
//! - The move-resolution algorithm: traversal ordering, farthest-cell
//!   search, single-merge-per-move tie-breaking, win/loss detection
//! - A `Session` that orchestrates moves, spawns, score, and terminal
//!   flags, publishing a serializable snapshot after every move
//!
//! Quick start:
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use twenty48::engine::Move;
//! use twenty48::session::Session;
//!
//! // Deterministic game with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut session = Session::new(4, 2, &mut rng);
//!
//! let snapshot = session.apply_move(Move::Left, &mut rng);
//! assert!(!snapshot.over);
//! assert!(snapshot.tiles.len() >= 2);
//! ```
//!
//! Note: randomness only enters through tile spawning, so a seeded
//! `StdRng` makes whole games reproducible. `Session::apply_move_thread`
//! and `Session::new_thread` are thread-RNG conveniences; prefer the
//! RNG-taking methods when you need determinism.

pub mod engine;
pub mod session;
