//! Engine configuration.
//!
//! All fields have Guideline defaults, so a partial JSON document such as
//! `{"lock_delay_steps": 15}` deserializes into a complete config.

use serde::{Deserialize, Serialize};

use crate::core::pieces::cells_for;
use crate::error::ConfigError;
use crate::types::{
    PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS, GRAVITY_STEPS, LOCK_DELAY_STEPS,
    LOCK_RESET_LIMIT, PREVIEW_LEN,
};

/// Which scoring bonuses are active on top of the line-clear table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub t_spin: bool,
    pub back_to_back: bool,
    pub combo: bool,
    /// Award 1 point per soft-dropped row and 2 per hard-dropped row.
    pub drop_points: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            t_spin: true,
            back_to_back: true,
            combo: true,
            drop_points: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub buffer: u8,
    pub preview_len: usize,
    /// Steps per gravity row, indexed by level; the last entry covers higher levels.
    pub gravity_steps: Vec<u32>,
    pub lock_delay_steps: u32,
    pub max_lock_resets: u32,
    pub scoring: ScoringConfig,
    /// Seed for the first episode. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            buffer: BUFFER_ROWS,
            preview_len: PREVIEW_LEN,
            gravity_steps: GRAVITY_STEPS.to_vec(),
            lock_delay_steps: LOCK_DELAY_STEPS,
            max_lock_resets: LOCK_RESET_LIMIT,
            scoring: ScoringConfig::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default config with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=64).contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !(4..=64).contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if !(2..=16).contains(&self.buffer) {
            return Err(ConfigError::Buffer(self.buffer));
        }
        if !(1..=14).contains(&self.preview_len) {
            return Err(ConfigError::PreviewLen(self.preview_len));
        }
        if self.gravity_steps.is_empty() {
            return Err(ConfigError::EmptyGravity);
        }
        if let Some(level) = self.gravity_steps.iter().position(|&steps| steps == 0) {
            return Err(ConfigError::ZeroGravity { level });
        }
        if self.lock_delay_steps == 0 {
            return Err(ConfigError::ZeroLockDelay);
        }
        validate_shapes()
    }
}

/// Every catalog entry must be four distinct cells inside a 4x4 box.
fn validate_shapes() -> Result<(), ConfigError> {
    for kind in PieceKind::ALL {
        for rotation in [
            Rotation::North,
            Rotation::East,
            Rotation::South,
            Rotation::West,
        ] {
            let shape = cells_for(kind, rotation);
            let in_box = shape
                .iter()
                .all(|&(x, y)| (0..4).contains(&x) && (0..4).contains(&y));
            let distinct = (0..4).all(|i| ((i + 1)..4).all(|j| shape[i] != shape[j]));
            if !in_box || !distinct {
                return Err(ConfigError::MalformedShape { kind, rotation });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_dimensions() {
        let config = EngineConfig {
            width: 3,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Width(3)));

        let config = EngineConfig {
            height: 80,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Height(80)));

        let config = EngineConfig {
            buffer: 1,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Buffer(1)));
    }

    #[test]
    fn rejects_bad_timing() {
        let config = EngineConfig {
            gravity_steps: vec![],
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyGravity));

        let config = EngineConfig {
            gravity_steps: vec![5, 0],
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroGravity { level: 1 }));

        let config = EngineConfig {
            lock_delay_steps: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLockDelay));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"lock_delay_steps": 12, "scoring": {"combo": false}}"#)
                .unwrap();
        assert_eq!(config.lock_delay_steps, 12);
        assert!(!config.scoring.combo);
        assert!(config.scoring.t_spin);
        assert_eq!(config.width, BOARD_WIDTH);
        assert_eq!(config.seed, None);
    }
}
