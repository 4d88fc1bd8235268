//! Rule engine phases and lock delay bookkeeping.

use crate::types::GameOverReason;

/// Where the current piece is in its lifecycle.
///
/// Between steps the engine only rests in `Falling` or `GameOver`; `Locking`
/// and `LineClear` are passed through within the step that locks a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// An active piece is in play.
    Falling,
    /// The active piece must commit to the grid.
    Locking,
    /// A piece was committed and `rows` rows were removed; the next piece spawns next.
    LineClear { rows: u8 },
    /// Terminal until the next reset.
    GameOver(GameOverReason),
}

impl Phase {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self {
            Phase::GameOver(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Lock delay state of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockDelay {
    /// Consecutive grounded steps.
    pub elapsed: u32,
    /// Timer resets spent by moves and rotations.
    pub resets: u32,
    /// Lowest row the piece origin has reached.
    pub lowest_y: i8,
}

impl LockDelay {
    pub fn new(spawn_y: i8) -> Self {
        Self {
            elapsed: 0,
            resets: 0,
            lowest_y: spawn_y,
        }
    }

    /// A move or rotation succeeded. Restarts a running timer while resets remain.
    pub fn on_manipulation(&mut self, max_resets: u32) {
        if self.elapsed > 0 && self.resets < max_resets {
            self.elapsed = 0;
            self.resets += 1;
        }
    }

    /// The piece fell to row `y`. A new lowest row restores the full budget.
    pub fn on_descend(&mut self, y: i8) {
        if y > self.lowest_y {
            self.lowest_y = y;
            self.elapsed = 0;
            self.resets = 0;
        }
    }

    /// Advance one step. Returns true when the piece has to lock.
    ///
    /// Leaving the ground clears the timer only while resets remain; once the
    /// budget is spent the timer pauses in the air and resumes on landing.
    pub fn tick(&mut self, grounded: bool, delay: u32, max_resets: u32) -> bool {
        if !grounded {
            if self.resets < max_resets {
                self.elapsed = 0;
            }
            return false;
        }
        self.elapsed += 1;
        self.elapsed >= delay
    }
}
