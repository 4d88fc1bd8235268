//! Environment module - the reset/step surface a training loop drives
//!
//! [`TetrisEnv`] wraps one [`Engine`] episode with observation building,
//! reward shaping and per-step info. Everything is synchronous: a call to
//! [`TetrisEnv::step`] returns once the action has been fully applied.

use tracing::debug;

use crate::config::EnvConfig;
use crate::core::features::compute_grid_features;
use crate::engine::{ConfigError, Engine, EngineConfig};
use crate::observation::Observation;
use crate::reward::{RewardContext, RewardFn, ShapedReward};
use crate::types::{Action, GameOverReason};

/// Diagnostics for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    pub lines_cleared: u32,
    /// Steps taken this episode, this one included.
    pub steps: u64,
    pub score_delta: u32,
    pub pieces_locked: u64,
    pub holes: u32,
    pub max_height: u32,
    pub game_over: Option<GameOverReason>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

pub struct TetrisEnv {
    engine: Engine,
    reward: Box<dyn RewardFn + Send>,
}

impl TetrisEnv {
    /// Build an environment with the default reward (line-clear score only).
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: Engine::new(config)?,
            reward: Box::new(ShapedReward::default()),
        })
    }

    /// Build from an [`EnvConfig`], shaping rewards with its weights.
    pub fn from_config(config: EnvConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.engine)?.with_reward(ShapedReward::new(config.reward)))
    }

    pub fn with_reward(mut self, reward: impl RewardFn + Send + 'static) -> Self {
        self.reward = Box::new(reward);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Number of discrete actions accepted by [`TetrisEnv::step_id`].
    pub fn action_count(&self) -> usize {
        Action::COUNT
    }

    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        self.engine.reset(seed);
        self.render_state()
    }

    pub fn step(&mut self, action: Action) -> Step {
        let was_done = self.engine.game_over();
        let outcome = self.engine.step(action);
        let features = compute_grid_features(self.engine.board());
        let done = outcome.done();

        let reward = self.reward.reward(&RewardContext {
            outcome: &outcome,
            features,
            terminated: done && !was_done,
        });

        if done && !was_done {
            debug!(
                steps = self.engine.step_count(),
                pieces = self.engine.piece_count(),
                score = self.engine.score(),
                "episode finished"
            );
        }

        Step {
            observation: self.render_state(),
            reward,
            done,
            info: StepInfo {
                lines_cleared: outcome.lines_cleared,
                steps: self.engine.step_count(),
                score_delta: outcome.score_delta,
                pieces_locked: self.engine.piece_count(),
                holes: features.holes,
                max_height: features.max_height,
                game_over: outcome.game_over,
            },
        }
    }

    /// Step with a discrete action id; ids without an action are no-ops.
    pub fn step_id(&mut self, id: usize) -> Step {
        self.step(Action::from_index(id).unwrap_or(Action::NoOp))
    }

    /// Current observation without advancing the episode.
    pub fn render_state(&self) -> Observation {
        Observation::from_snapshot(&self.engine.snapshot(), self.engine.config().preview_len)
    }
}
