use thiserror::Error;

use crate::types::{PieceKind, Rotation};

/// Invalid engine configuration. Fatal at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board width {0} is outside 4..=64")]
    Width(u8),
    #[error("board height {0} is outside 4..=64")]
    Height(u8),
    #[error("buffer of {0} rows is outside 2..=16")]
    Buffer(u8),
    #[error("preview length {0} is outside 1..=14")]
    PreviewLen(usize),
    #[error("gravity table is empty")]
    EmptyGravity,
    #[error("gravity interval for level {level} is zero")]
    ZeroGravity { level: usize },
    #[error("lock delay must be at least one step")]
    ZeroLockDelay,
    #[error("shape table entry for {kind:?} {rotation:?} does not fit a 4x4 box of distinct cells")]
    MalformedShape { kind: PieceKind, rotation: Rotation },
}
