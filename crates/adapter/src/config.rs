use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::reward::RewardConfig;

/// Engine rules plus reward weights, loadable from JSON.
///
/// ```
/// use tetris_gym_adapter::EnvConfig;
///
/// let config = EnvConfig::from_json_str(r#"{"engine": {"seed": 3}, "reward": {"hole": -0.5}}"#).unwrap();
/// assert_eq!(config.engine.seed, Some(3));
/// assert_eq!(config.reward.hole, -0.5);
/// assert_eq!(config.reward.line_clear, 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub engine: EngineConfig,
    pub reward: RewardConfig,
}

impl EnvConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid environment config")?;
        config
            .engine
            .validate()
            .context("invalid engine settings")?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("failed to load config {}", path.display()))
    }
}
