//! Rule engine - episode state and the step/reset contract
//!
//! [`Engine`] owns one episode: the board, the piece sequence, scoring
//! counters and the lock-delay timer. Every call to [`Engine::step`] applies
//! one [`Action`](types::Action) and runs the piece lifecycle
//! (`Falling -> Locking -> LineClear -> Falling`, or `GameOver`) to
//! completion before returning.
//!
//! # Example
//!
//! ```
//! use tetris_gym_engine::{Engine, EngineConfig};
//! use tetris_gym_engine::types::Action;
//!
//! let mut engine = Engine::new(EngineConfig::with_seed(7)).unwrap();
//! let outcome = engine.step(Action::HardDrop);
//! assert!(outcome.locked);
//! assert_eq!(engine.piece_count(), 1);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod phase;

pub use tetris_gym_core as core;
pub use tetris_gym_types as types;

pub use config::{EngineConfig, ScoringConfig};
pub use engine::{Engine, StepOutcome};
pub use error::ConfigError;
pub use phase::{LockDelay, Phase};
