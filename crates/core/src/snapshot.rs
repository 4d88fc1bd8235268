use crate::board::{Board, Tetromino};
use crate::types::{PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only copy of everything a viewer or agent may look at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Visible rows, row-major, 0 for empty and the piece id otherwise.
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next_queue: Vec<PieceKind>,
    pub can_hold: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub step: u64,
}

impl GameSnapshot {
    /// Copy the board-owned part of the state; counters are filled by the caller.
    pub fn from_board(board: &Board, preview_len: usize) -> Self {
        let mut s = Self::default();
        s.write_board(board, preview_len);
        s
    }

    pub fn write_board(&mut self, board: &Board, preview_len: usize) {
        self.width = board.width();
        self.height = board.height();
        self.board.clear();
        self.board.extend(
            board
                .visible_cells()
                .iter()
                .map(|cell| cell.map_or(0, |kind| kind.id())),
        );
        self.active = board.active().map(ActiveSnapshot::from);
        self.ghost_y = board.ghost_y();
        self.hold = board.hold_piece();
        self.next_queue.clear();
        self.next_queue
            .extend(board.queue().iter().take(preview_len).copied());
        self.can_hold = board.can_hold();
    }

    /// Cell id at a visible position, `None` when out of range.
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width as usize {
            return None;
        }
        self.board.get(y * self.width as usize + x).copied()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_visible_rows_only() {
        let mut board = Board::default();
        board.set(0, -1, Some(PieceKind::I));
        board.set(2, 19, Some(PieceKind::J));
        board.push_queue(PieceKind::S);
        board.push_queue(PieceKind::Z);
        board.spawn(PieceKind::T).unwrap();

        let s = GameSnapshot::from_board(&board, 1);
        assert_eq!(s.board.len(), 200);
        assert_eq!(s.cell(2, 19), Some(PieceKind::J.id()));
        assert_eq!(s.board.iter().filter(|&&c| c != 0).count(), 1);
        assert_eq!(s.next_queue, vec![PieceKind::S]);
        assert_eq!(s.active.unwrap().kind, PieceKind::T);
        assert!(s.playable());
    }
}
