//! Environment adapter - Tetris as a reinforcement-learning environment
//!
//! Wraps the rule engine in the usual `reset`/`step` contract:
//!
//! - [`TetrisEnv::reset`] starts an episode and returns the first [`Observation`].
//! - [`TetrisEnv::step`] applies one action and returns a [`Step`] with the
//!   next observation, a scalar reward, the `done` flag and [`StepInfo`].
//! - [`TetrisEnv::render_state`] reads the current observation without
//!   advancing anything.
//!
//! # Observations
//!
//! [`Observation`] serializes to JSON with serde and flattens to a fixed-length
//! `Vec<f32>` through [`Observation::to_features`].
//!
//! # Rewards
//!
//! Rewards come from a [`RewardFn`]. The default [`ShapedReward`] pays the
//! line-clear score; [`RewardConfig`] adds hole, height, drop, lateral and
//! game-over terms. Closures taking a [`RewardContext`] work too.
//!
//! # Configuration
//!
//! [`EnvConfig`] bundles the engine rules and the reward weights and loads from
//! JSON. Missing fields fall back to defaults:
//!
//! ```json
//! {
//!   "engine": { "seed": 42, "lock_delay_steps": 15 },
//!   "reward": { "hole": -1.0, "lateral": 0.05 }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use tetris_gym_adapter::{TetrisEnv, engine::EngineConfig, types::Action};
//!
//! let mut env = TetrisEnv::new(EngineConfig::with_seed(1)).unwrap();
//! let first = env.reset(Some(1));
//! assert_eq!(first, env.render_state());
//!
//! let step = env.step(Action::HardDrop);
//! assert_eq!(step.info.pieces_locked, 1);
//! assert!(!step.done);
//! ```

pub mod config;
pub mod env;
pub mod observation;
pub mod reward;

pub use tetris_gym_core as core;
pub use tetris_gym_engine as engine;
pub use tetris_gym_types as types;

pub use config::EnvConfig;
pub use env::{Step, StepInfo, TetrisEnv};
pub use observation::{ActivePiece, Observation};
pub use reward::{RewardConfig, RewardContext, RewardFn, ShapedReward};
