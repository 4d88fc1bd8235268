//! Board module - manages the game grid and the pieces in play
//!
//! The board is a `width x (buffer + height)` grid where each cell can be empty or
//! filled with a piece kind. Uses a flat array for cache locality.
//! Coordinates: (x, y) where x ranges `0..width` (left to right) and y ranges
//! `-buffer..height` (top to bottom). Rows `0..height` are the visible field; the
//! buffer rows above row 0 hold freshly spawned pieces.
//!
//! Besides the grid, the board owns the active piece, the hold slot and the
//! upcoming-piece queue. Every mutating call either succeeds with the active
//! piece in a legal position or returns without touching anything.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::pieces::{cells_for, kick_table, spawn_origin, PieceShape};
use crate::types::{
    Cell, GameOverReason, PieceKind, RotateDirection, Rotation, BOARD_HEIGHT, BOARD_WIDTH,
    BUFFER_ROWS,
};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn origin for a board of `width` columns
    pub fn spawn(kind: PieceKind, width: u8) -> Self {
        let (x, y) = spawn_origin(width);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        cells_for(self.kind, self.rotation)
    }

    /// Absolute board cells occupied by this piece
    pub fn cells(&self) -> PieceShape {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Outcome of committing the active piece to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockResult {
    /// The piece as it was committed.
    pub piece: Tetromino,
    /// Rows that were full and removed, bottom to top (pre-clear coordinates).
    pub cleared_rows: ArrayVec<i8, 4>,
    /// True if any cell of the piece remains above the visible field after the clear.
    pub lock_out: bool,
}

impl LockResult {
    pub fn lines(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// Outcome of a hard drop: distance fallen plus the resulting lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardDrop {
    pub rows: u32,
    pub lock: LockResult,
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    buffer: u8,
    /// Flat array of cells, row-major order ((y + buffer) * width + x)
    cells: Vec<Cell>,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    hold_used: bool,
    queue: VecDeque<PieceKind>,
    /// Index of the placement used by the last successful rotation (0 = un-shifted).
    /// Cleared by lateral movement, spawns and holds.
    last_kick: Option<usize>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8, buffer: u8) -> Self {
        let total = width as usize * (height as usize + buffer as usize);
        Self {
            width,
            height,
            buffer,
            cells: vec![None; total],
            active: None,
            hold: None,
            hold_used: false,
            queue: VecDeque::new(),
            last_kick: None,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        let row = (y as isize + self.buffer as isize) as usize;
        Some(row * self.width as usize + x as usize)
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get the visible height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get the number of hidden rows above the visible field
    pub fn buffer(&self) -> u8 {
        self.buffer
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < -(self.buffer as i8) || y >= self.height as i8
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        match self.index(0, y) {
            Some(start) => self.cells[start..start + self.width as usize]
                .iter()
                .all(|cell| cell.is_some()),
            None => false,
        }
    }

    /// Whether a piece fits: every cell in bounds and empty
    pub fn fits(&self, piece: &Tetromino) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_valid(x, y))
    }

    /// Get a reference to the internal cells array (buffer rows first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The visible rows only, row-major
    pub fn visible_cells(&self) -> &[Cell] {
        &self.cells[self.buffer as usize * self.width as usize..]
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Cells of the active piece, if any
    pub fn active_cells(&self) -> Option<PieceShape> {
        self.active.map(|p| p.cells())
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Whether a hold swap is still available for the current piece
    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    pub fn queue(&self) -> &VecDeque<PieceKind> {
        &self.queue
    }

    pub fn push_queue(&mut self, kind: PieceKind) {
        self.queue.push_back(kind);
    }

    pub fn pop_queue(&mut self) -> Option<PieceKind> {
        self.queue.pop_front()
    }

    /// Placement index used by the last rotation, if the piece has not moved sideways since
    pub fn last_kick(&self) -> Option<usize> {
        self.last_kick
    }

    /// Place a new piece at the spawn origin in its North state
    ///
    /// Fails with `BlockOut` when any spawn cell is occupied. The grid is left
    /// unchanged and there is no active piece afterwards.
    pub fn spawn(&mut self, kind: PieceKind) -> Result<(), GameOverReason> {
        let piece = Tetromino::spawn(kind, self.width);
        if !self.fits(&piece) {
            self.active = None;
            return Err(GameOverReason::BlockOut);
        }
        self.active = Some(piece);
        self.last_kick = None;
        Ok(())
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if !self.fits(&moved) {
            return false;
        }

        self.active = Some(moved);
        // Movement clears the "last action was rotate" marker
        if dx != 0 {
            self.last_kick = None;
        }
        true
    }

    /// Try to rotate the active piece with SRS wall kicks
    ///
    /// Tests the un-shifted placement first, then each kick offset in table order.
    pub fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let to = active.rotation.rotate(direction);
        let rotated = Tetromino {
            rotation: to,
            ..active
        };

        let offsets = std::iter::once((0, 0))
            .chain(kick_table(active.kind, active.rotation, to).iter().copied());

        for (i, (dx, dy)) in offsets.enumerate() {
            let candidate = rotated.shifted(dx, dy);
            if self.fits(&candidate) {
                self.active = Some(candidate);
                self.last_kick = Some(i);
                return true;
            }
        }

        false
    }

    /// Drop one row; never locks
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// How many rows the active piece can fall
    pub fn drop_distance(&self) -> Option<u32> {
        let active = self.active?;
        let mut distance: i8 = 0;
        while self.fits(&active.shifted(0, distance + 1)) {
            distance += 1;
        }
        Some(distance as u32)
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let distance = self.drop_distance()?;
        Some(active.y + distance as i8)
    }

    /// Check if the active piece is resting on something
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(piece) => !self.fits(&piece.shifted(0, 1)),
            None => false,
        }
    }

    /// Hard drop the active piece to the bottom and lock it
    pub fn hard_drop(&mut self) -> Option<HardDrop> {
        let rows = self.drop_distance()?;
        if rows > 0 {
            self.active = self.active.map(|p| p.shifted(0, rows as i8));
        }
        let lock = self.lock()?;
        Some(HardDrop { rows, lock })
    }

    /// Lock the active piece onto the board and clear completed rows
    pub fn lock(&mut self) -> Option<LockResult> {
        let piece = self.active.take()?;
        let cells = piece.cells();

        for &(x, y) in &cells {
            self.set(x, y, Some(piece.kind));
        }

        // Only rows touched by this piece can have become full.
        let mut cleared_rows: ArrayVec<i8, 4> = ArrayVec::new();
        for &(_, y) in &cells {
            if !cleared_rows.contains(&y) && self.is_row_full(y) {
                cleared_rows.push(y);
            }
        }
        cleared_rows.sort_unstable_by(|a, b| b.cmp(a));
        self.remove_rows(&cleared_rows);

        // A surviving cell ends above the field if the clears below it do not pull it down.
        let lock_out = cells.iter().any(|&(_, y)| {
            let shift = cleared_rows.iter().filter(|&&row| row > y).count() as i8;
            !cleared_rows.contains(&y) && y + shift < 0
        });

        self.hold_used = false;
        self.last_kick = None;

        Some(LockResult {
            piece,
            cleared_rows,
            lock_out,
        })
    }

    /// Remove the given rows and shift everything above them down.
    /// Uses a two-pointer compaction, scanning bottom to top.
    fn remove_rows(&mut self, rows: &[i8]) {
        if rows.is_empty() {
            return;
        }

        let width = self.width as usize;
        let total_rows = self.height as usize + self.buffer as usize;
        let mut write = total_rows;

        for read in (0..total_rows).rev() {
            let y = read as i8 - self.buffer as i8;
            if rows.contains(&y) {
                continue;
            }
            write -= 1;
            if write != read {
                self.cells
                    .copy_within(read * width..(read + 1) * width, write * width);
            }
        }

        for cell in &mut self.cells[..write * width] {
            *cell = None;
        }
    }

    /// Swap the active piece with the hold slot
    ///
    /// With an empty hold slot the queue head becomes the active piece. Refused
    /// (returning false, nothing changed) once per lock, without an active
    /// piece, or when the incoming piece cannot spawn.
    pub fn swap_hold(&mut self) -> bool {
        if self.hold_used {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let incoming = match self.hold {
            Some(kind) => kind,
            None => match self.queue.front() {
                Some(&kind) => kind,
                None => return false,
            },
        };

        let piece = Tetromino::spawn(incoming, self.width);
        if !self.fits(&piece) {
            return false;
        }

        if self.hold.is_none() {
            self.queue.pop_front();
        }
        self.hold = Some(active.kind);
        self.active = Some(piece);
        self.hold_used = true;
        self.last_kick = None;
        true
    }

    /// Clear the grid, pieces, hold slot and queue
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
        self.active = None;
        self.hold = None;
        self.hold_used = false;
        self.queue.clear();
        self.last_kick = None;
    }

    /// Convert the visible rows to a 2D vector for testing/display
    pub fn visible_rows(&self) -> Vec<Vec<Cell>> {
        self.visible_cells()
            .chunks(self.width as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT, BUFFER_ROWS)
    }
}
