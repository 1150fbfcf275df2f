//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the board, the
//! tetromino catalog, collision, rotation, line clearing, scoring and the run-state
//! machine. It has no dependency on a terminal, a clock or any other I/O, which makes it:
//!
//! - **Deterministic**: a seed (or a scripted sequence) fixes the piece order
//! - **Testable**: every rule can be exercised by direct calls
//! - **Embeddable**: any number of independent [`GameState`] values can coexist
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, placement validation and line clearing
//! - [`shape`]: fixed-capacity occupancy matrices and clockwise rotation
//! - [`pieces`]: the compile-time tetromino catalog and the falling piece
//! - [`rng`]: injectable randomness for next-piece selection
//! - [`scoring`]: points, levels and drop intervals
//! - [`game_state`]: the engine tying it all together
//! - [`snapshot`]: read-only copies handed to renderers
//!
//! # Rules
//!
//! - Pieces spawn at (3, 0) and are picked uniformly at random (no bag)
//! - Rotation is clockwise only, about the piece's anchor, with no wall kicks
//! - A piece locks when a downward move (tick or soft drop) is blocked
//! - Clearing 1-4 lines scores 100/300/500/800 times the level
//! - Every 10 lines raise the level and cut the drop interval by 100ms (floor 100ms)
//! - A blocked spawn ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, RunState};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick();
//!
//! assert_eq!(game.run_state(), RunState::Running);
//! assert_eq!(game.snapshot().active.unwrap().y, 1);
//! ```
//!
//! # Timing
//!
//! The engine has no clock. A driver calls [`GameState::tick`] every
//! [`GameState::drop_interval`] and re-reads the interval after each tick,
//! since a level-up shortens it.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::GameState;
pub use pieces::{canonical_shape, Tetromino, CATALOG};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
