//! Observation module - what an agent sees after every step
//!
//! The serialized form matches what the environment hands to a trainer:
//! lowercase piece kinds and rotations, piece ids `1..=7` in the grid and the
//! preview, and `0` wherever a slot is empty.

use serde::{Deserialize, Serialize};

use crate::core::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{PieceKind, Rotation};

const KINDS: usize = PieceKind::ALL.len();
const ROTATIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActiveSnapshot> for ActivePiece {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub width: u8,
    pub height: u8,
    /// Visible rows, row-major, `width * height` piece ids.
    pub board: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub active: Option<ActivePiece>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub ghost_y: Option<i8>,
    /// Preview ids, always the configured preview length.
    pub next: Vec<u8>,
    /// 0 while the hold slot is empty.
    pub hold: u8,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
}

impl Observation {
    pub fn from_snapshot(snapshot: &GameSnapshot, preview_len: usize) -> Self {
        let mut next: Vec<u8> = snapshot
            .next_queue
            .iter()
            .take(preview_len)
            .map(|kind| kind.id())
            .collect();
        next.resize(preview_len, 0);

        Self {
            width: snapshot.width,
            height: snapshot.height,
            board: snapshot.board.clone(),
            active: snapshot.active.map(ActivePiece::from),
            ghost_y: snapshot.ghost_y,
            next,
            hold: snapshot.hold.map_or(0, |kind| kind.id()),
            can_hold: snapshot.can_hold,
            score: snapshot.score,
            lines: snapshot.lines,
            level: snapshot.level,
            game_over: snapshot.game_over,
        }
    }

    /// Length of [`Observation::to_features`] for a board and preview size.
    pub fn feature_len(width: u8, height: u8, preview_len: usize) -> usize {
        width as usize * height as usize // occupancy
            + KINDS + ROTATIONS + 3 // active kind, rotation, x, y, ghost y
            + preview_len * KINDS
            + KINDS // hold
            + 2 // can_hold, game_over
    }

    /// Fixed-shape numeric encoding.
    ///
    /// Layout: grid occupancy (0/1), active kind one-hot, rotation one-hot,
    /// x / width, y / height, ghost y / height, one one-hot per preview slot
    /// (all zero for padding), hold one-hot, can-hold, game-over. Positions
    /// are zero when there is no active piece.
    pub fn to_features(&self) -> Vec<f32> {
        let width = self.width as f32;
        let height = self.height as f32;
        let mut out =
            Vec::with_capacity(Self::feature_len(self.width, self.height, self.next.len()));

        out.extend(self.board.iter().map(|&id| if id == 0 { 0.0 } else { 1.0 }));

        match self.active {
            Some(active) => {
                push_one_hot(&mut out, active.kind.id(), KINDS);
                let mut rotation = [0.0; ROTATIONS];
                rotation[active.rotation.index()] = 1.0;
                out.extend_from_slice(&rotation);
                out.push(active.x as f32 / width);
                out.push(active.y as f32 / height);
            }
            None => out.extend(std::iter::repeat(0.0).take(KINDS + ROTATIONS + 2)),
        }
        out.push(self.ghost_y.map_or(0.0, |y| y as f32 / height));

        for &id in &self.next {
            push_one_hot(&mut out, id, KINDS);
        }
        push_one_hot(&mut out, self.hold, KINDS);

        out.push(if self.can_hold { 1.0 } else { 0.0 });
        out.push(if self.game_over { 1.0 } else { 0.0 });
        out
    }

    /// Cell id at a visible position, `None` when out of range.
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width as usize {
            return None;
        }
        self.board.get(y * self.width as usize + x).copied()
    }
}

/// Piece ids start at 1; id 0 encodes as all zeros.
fn push_one_hot(out: &mut Vec<f32>, id: u8, len: usize) {
    let start = out.len();
    out.resize(start + len, 0.0);
    if (1..=len).contains(&(id as usize)) {
        out[start + id as usize - 1] = 1.0;
    }
}
