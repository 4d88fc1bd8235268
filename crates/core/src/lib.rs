//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rule primitives the engine is built from. It has no
//! dependencies on rendering, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Unit tests for every rule primitive
//! - **Portable**: Runs headless inside any training harness
//!
//! # Module Structure
//!
//! - [`board`]: Grid with buffer rows, active piece, hold slot, next queue
//! - [`pieces`]: Tetromino shape definitions and SRS wall kick tables
//! - [`rng`]: 7-bag random piece generation
//! - [`scoring`]: Guideline line-clear scoring with T-spin, combo and B2B bonuses
//! - [`features`]: Holes/heights of the locked grid for reward shaping
//! - [`snapshot`]: Read-only copies of the state for observers
//!
//! # Example
//!
//! ```
//! use tetris_gym_core::{Board, Randomizer};
//! use tetris_gym_core::types::RotateDirection;
//!
//! let mut rng = Randomizer::new(12345);
//! let mut board = Board::default();
//! board.spawn(rng.next()).unwrap();
//!
//! board.try_move(1, 0);
//! board.try_rotate(RotateDirection::Cw);
//! let drop = board.hard_drop().unwrap();
//! assert!(drop.rows > 0);
//! assert!(board.active().is_none());
//! ```

pub mod board;
pub mod features;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_gym_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, HardDrop, LockResult, Tetromino};
pub use features::{compute_grid_features, GridFeatures};
pub use pieces::{cells_for, kick_table};
pub use rng::Randomizer;
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
