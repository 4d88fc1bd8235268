//! Tetris Gym (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so callers can depend on a
//! single package: `tetris_gym::{types, core, engine, adapter}`. The
//! implementation lives in the dedicated crates under `crates/`.

pub use tetris_gym_adapter as adapter;
pub use tetris_gym_core as core;
pub use tetris_gym_engine as engine;
pub use tetris_gym_types as types;

pub use adapter::{EnvConfig, Observation, Step, StepInfo, TetrisEnv};
pub use engine::{Engine, EngineConfig};
pub use types::Action;
