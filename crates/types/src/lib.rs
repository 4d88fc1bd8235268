//! Shared vocabulary for the Tetris environment.
//!
//! This crate defines the plain data types used throughout the workspace: piece
//! kinds, rotation states, the discrete action set, game-over reasons, and the
//! default rule constants. Everything here is a small `Copy` value so it can be
//! passed freely between the board, the rule engine and the environment adapter.
//!
//! # Board Dimensions
//!
//! Standard Guideline playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows (indexed 0-19, row 0 at the top)
//! - **Buffer**: 4 hidden rows above row 0 (indexed -4..-1)
//!
//! # Rule Constants
//!
//! Timing values are measured in environment steps, not milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_DELAY_STEPS` | 30 | Steps a grounded piece survives before locking |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock timer resets per piece |
//! | `GRAVITY_STEPS` | `[1]` | Steps per gravity row, indexed by level |
//! | `PREVIEW_LEN` | 5 | Visible next-queue length |
//!
//! # Examples
//!
//! ```
//! use tetris_gym_types::{Action, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.id(), 3);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(Action::from_str("hardDrop"), Some(Action::HardDrop));
//! assert_eq!(Action::from_index(7), Some(Action::NoOp));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Hidden rows above the visible field, used for spawning and overflow.
pub const BUFFER_ROWS: u8 = 4;

/// Number of upcoming pieces kept visible in the next queue.
pub const PREVIEW_LEN: usize = 5;

/// Steps a grounded piece may rest before it locks.
pub const LOCK_DELAY_STEPS: u32 = 30;

/// Maximum number of lock timer resets per piece (15)
pub const LOCK_RESET_LIMIT: u32 = 15;

/// Gravity interval in steps per row, indexed by level.
///
/// The last entry applies to every higher level. One row per step matches the
/// behavior agents were historically trained against.
pub const GRAVITY_STEPS: [u32; 1] = [1];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Guideline line clear table.
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 100 points (Single)
/// - 2 lines: 300 points (Double)
/// - 3 lines: 500 points (Triple)
/// - 4 lines: 800 points (Tetris)
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Full T-spin points by lines cleared (0-3), before the level multiplier.
pub const TSPIN_SCORES: [u32; 4] = [400, 800, 1200, 1600];

/// Mini T-spin points by lines cleared (0-2), before the level multiplier.
pub const TSPIN_MINI_SCORES: [u32; 3] = [100, 200, 400];

/// Combo scoring base value (50 points per combo step)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guideline_defaults() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(LOCK_DELAY_STEPS, 30);
        assert_eq!(LOCK_RESET_LIMIT, 15);
        assert_eq!(PREVIEW_LEN, 5);
        assert!(BUFFER_ROWS >= 2);
    }

    #[test]
    fn piece_ids_are_dense() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i + 1);
            assert_eq!(PieceKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn action_ids_round_trip() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i), Some(*action));
            assert_eq!(Action::from_str(action.as_str()), Some(*action));
        }
        assert_eq!(Action::from_index(Action::COUNT), None);
    }

    #[test]
    fn rotation_index_matches_cycle() {
        let mut r = Rotation::North;
        for i in 0..4 {
            assert_eq!(r.index(), i);
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::North);
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_gym_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Numeric id used in observation encodings (1-7, 0 is reserved for empty).
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`].
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (SRS state `0`)
/// - **East**: Rotated 90° clockwise (SRS state `R`)
/// - **South**: Rotated 180° (SRS state `2`)
/// - **West**: Rotated 90° counter-clockwise (SRS state `L`)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_gym_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotate in the given direction.
    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Cw => self.rotate_cw(),
            RotateDirection::Ccw => self.rotate_ccw(),
        }
    }

    /// Table index: 0 for North through 3 for West.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Direction of a rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    Cw,
    Ccw,
}

/// Discrete actions accepted by the environment, one per step.
///
/// The declaration order defines the stable numeric action ids (0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece one cell down; never locks by itself
    SoftDrop,
    /// Drop to the lowest valid position and lock in the same step
    HardDrop,
    /// Swap the active piece with the hold slot (once per lock)
    Hold,
    /// Let gravity and lock delay run
    NoOp,
}

impl Action {
    /// Size of the discrete action space.
    pub const COUNT: usize = 8;

    /// All actions in id order.
    pub const ALL: [Action; Action::COUNT] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::RotateCw,
        Action::RotateCcw,
        Action::SoftDrop,
        Action::HardDrop,
        Action::Hold,
        Action::NoOp,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_gym_types::Action;
    ///
    /// assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
    /// assert_eq!(Action::from_str("ROTATECW"), Some(Action::RotateCw));
    /// assert_eq!(Action::from_str("pause"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "rotatecw" => Some(Action::RotateCw),
            "rotateccw" => Some(Action::RotateCcw),
            "softdrop" => Some(Action::SoftDrop),
            "harddrop" => Some(Action::HardDrop),
            "hold" => Some(Action::Hold),
            "noop" => Some(Action::NoOp),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::RotateCw => "rotateCw",
            Action::RotateCcw => "rotateCcw",
            Action::SoftDrop => "softDrop",
            Action::HardDrop => "hardDrop",
            Action::Hold => "hold",
            Action::NoOp => "noOp",
        }
    }

    /// Stable numeric id of this action.
    pub fn index(&self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::RotateCw => 2,
            Action::RotateCcw => 3,
            Action::SoftDrop => 4,
            Action::HardDrop => 5,
            Action::Hold => 6,
            Action::NoOp => 7,
        }
    }

    /// Action for a numeric id, `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether this action drops the piece (gravity is skipped for the step).
    pub fn is_drop(&self) -> bool {
        matches!(self, Action::SoftDrop | Action::HardDrop)
    }
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverReason {
    /// A new piece could not be placed at its spawn position.
    BlockOut,
    /// A piece locked with at least one cell above the visible field.
    LockOut,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::BlockOut => "blockOut",
            GameOverReason::LockOut => "lockOut",
        }
    }
}

/// T-Spin detection result
///
/// T-Spins are detected based on corner occupancy around the T piece.
/// - **None**: Not a T-spin
/// - **Mini**: 3+ corners filled but not both front corners
/// - **Full**: 3+ corners filled including both front corners, or the final
///   kick of the rotation was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TSpinKind {
    #[default]
    None,
    Mini,
    Full,
}

impl TSpinKind {
    /// Convert to optional string representation
    ///
    /// Returns `None` for `TSpinKind::None`, `Some("mini")` for Mini,
    /// and `Some("full")` for Full.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            TSpinKind::None => None,
            TSpinKind::Mini => Some("mini"),
            TSpinKind::Full => Some("full"),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
