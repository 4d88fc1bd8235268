//! Reward shaping.
//!
//! A reward function sees the engine's [`StepOutcome`] plus the grid features
//! of the locked stack and returns one scalar. [`ShapedReward`] is the default,
//! a weighted sum configured through [`RewardConfig`]; any
//! `Fn(&RewardContext) -> f32` closure works as well.

use serde::{Deserialize, Serialize};

use crate::core::features::GridFeatures;
use crate::engine::StepOutcome;

/// Everything a reward function may look at for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardContext<'a> {
    pub outcome: &'a StepOutcome,
    /// Grid features after the step.
    pub features: GridFeatures,
    /// True only on the step that ended the episode.
    pub terminated: bool,
}

pub trait RewardFn {
    fn reward(&self, ctx: &RewardContext<'_>) -> f32;
}

impl<F> RewardFn for F
where
    F: Fn(&RewardContext<'_>) -> f32,
{
    fn reward(&self, ctx: &RewardContext<'_>) -> f32 {
        self(ctx)
    }
}

/// Weights of [`ShapedReward`]. Only `line_clear` is non-zero by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Per point of line-clear score.
    pub line_clear: f32,
    /// Per hole in the stack, applied on locking steps.
    pub hole: f32,
    /// Per row of the tallest column, applied on locking steps.
    pub height: f32,
    /// Per row soft- or hard-dropped.
    pub drop: f32,
    /// Per column the piece moved sideways.
    pub lateral: f32,
    /// Added once when the episode ends.
    pub game_over: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            line_clear: 1.0,
            hole: 0.0,
            height: 0.0,
            drop: 0.0,
            lateral: 0.0,
            game_over: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapedReward {
    pub weights: RewardConfig,
}

impl ShapedReward {
    pub fn new(weights: RewardConfig) -> Self {
        Self { weights }
    }
}

impl RewardFn for ShapedReward {
    fn reward(&self, ctx: &RewardContext<'_>) -> f32 {
        let w = &self.weights;
        let outcome = ctx.outcome;

        let mut reward = w.line_clear * outcome.line_clear_score as f32
            + w.drop * outcome.drop_rows as f32
            + w.lateral * outcome.moved_columns as f32;
        if outcome.locked {
            reward += w.hole * ctx.features.holes as f32
                + w.height * ctx.features.max_height as f32;
        }
        if ctx.terminated {
            reward += w.game_over;
        }
        reward
    }
}
