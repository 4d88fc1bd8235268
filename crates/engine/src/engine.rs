//! Engine module - episode state and the per-step state machine
//!
//! Ties together the board, the randomizer and the scoring tables. One call to
//! [`Engine::step`] applies exactly one action, gravity, lock delay and, when
//! the piece commits, scoring, queue refill and the next spawn.

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::core::board::{Board, LockResult, Tetromino};
use crate::core::rng::Randomizer;
use crate::core::scoring::{calculate_drop_score, calculate_level, calculate_score, gravity_interval};
use crate::core::snapshot::GameSnapshot;
use crate::error::ConfigError;
use crate::phase::{LockDelay, Phase};
use crate::types::{Action, GameOverReason, PieceKind, RotateDirection, Rotation, TSpinKind};

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    pub lines_cleared: u32,
    /// Points for the clear itself, bonuses included, drop points excluded.
    pub line_clear_score: u32,
    /// Everything added to the score this step.
    pub score_delta: u32,
    /// Rows fallen by soft or hard drop (gravity not included).
    pub drop_rows: u32,
    /// Columns the active piece shifted because of the action.
    pub moved_columns: u32,
    pub locked: bool,
    pub t_spin: TSpinKind,
    /// The clear earned the back-to-back multiplier.
    pub back_to_back: bool,
    pub game_over: Option<GameOverReason>,
}

impl StepOutcome {
    pub fn done(&self) -> bool {
        self.game_over.is_some()
    }
}

/// Complete episode state
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    board: Board,
    randomizer: Randomizer,
    phase: Phase,
    lock_delay: LockDelay,
    gravity_counter: u32,
    score: u32,
    lines: u32,
    level: u32,
    /// -1 when no chain is running
    combo: i32,
    back_to_back: bool,
    step_count: u64,
    piece_count: u64,
}

impl Engine {
    /// Validate the config and start the first episode.
    ///
    /// Without a configured seed the first episode draws one from the OS.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let randomizer = config
            .seed
            .map_or_else(Randomizer::from_entropy, Randomizer::new);
        let board = Board::new(config.width, config.height, config.buffer);

        let mut engine = Self {
            config,
            board,
            randomizer,
            phase: Phase::Falling,
            lock_delay: LockDelay::new(0),
            gravity_counter: 0,
            score: 0,
            lines: 0,
            level: 0,
            combo: -1,
            back_to_back: false,
            step_count: 0,
            piece_count: 0,
        };
        engine.reset(None);
        Ok(engine)
    }

    /// Start a new episode.
    ///
    /// `Some(seed)` restarts the piece sequence from that seed; `None` keeps
    /// drawing from the current sequence.
    pub fn reset(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.randomizer.reseed(seed);
        }
        debug!(seed = self.randomizer.seed(), "episode reset");

        self.board.clear();
        self.phase = Phase::Falling;
        self.gravity_counter = 0;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.combo = -1;
        self.back_to_back = false;
        self.step_count = 0;
        self.piece_count = 0;

        self.refill_queue();
        self.spawn_next();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up scenarios
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lock_delay(&self) -> LockDelay {
        self.lock_delay
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Pieces locked this episode
    pub fn piece_count(&self) -> u64 {
        self.piece_count
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// Seed of the current piece sequence
    pub fn seed(&self) -> u64 {
        self.randomizer.seed()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.write_board(&self.board, self.config.preview_len);
        out.game_over = self.game_over();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.step = self.step_count;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the episode by one action.
    ///
    /// After game over this is a no-op that keeps reporting the reason.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if let Phase::GameOver(reason) = self.phase {
            outcome.game_over = Some(reason);
            return outcome;
        }
        self.step_count += 1;

        let before = self.board.active();
        let mut hard_drop = false;
        match action {
            Action::MoveLeft => self.shift(-1),
            Action::MoveRight => self.shift(1),
            Action::RotateCw => self.rotate(RotateDirection::Cw),
            Action::RotateCcw => self.rotate(RotateDirection::Ccw),
            Action::SoftDrop => {
                if self.board.soft_drop() {
                    outcome.drop_rows += 1;
                    if self.config.scoring.drop_points {
                        self.award(calculate_drop_score(1, false), &mut outcome);
                    }
                    self.descended();
                }
            }
            Action::HardDrop => {
                hard_drop = true;
                self.phase = Phase::Locking;
            }
            Action::Hold => self.hold(),
            Action::NoOp => {}
        }

        if action != Action::Hold {
            if let (Some(a), Some(b)) = (before, self.board.active()) {
                outcome.moved_columns = (b.x - a.x).unsigned_abs() as u32;
            }
        }

        if !action.is_drop() && self.phase == Phase::Falling {
            self.apply_gravity();
        }

        if self.phase == Phase::Falling
            && self
                .lock_delay
                .tick(
                    self.board.is_grounded(),
                    self.config.lock_delay_steps,
                    self.config.max_lock_resets,
                )
        {
            self.phase = Phase::Locking;
        }

        loop {
            match self.phase {
                Phase::Falling => break,
                Phase::Locking => self.lock_active(hard_drop, &mut outcome),
                Phase::LineClear { .. } => self.spawn_next(),
                Phase::GameOver(reason) => {
                    debug!(
                        reason = reason.as_str(),
                        score = self.score,
                        lines = self.lines,
                        "game over"
                    );
                    outcome.game_over = Some(reason);
                    break;
                }
            }
        }

        outcome
    }

    fn award(&mut self, points: u32, outcome: &mut StepOutcome) {
        self.score = self.score.saturating_add(points);
        outcome.score_delta += points;
    }

    fn shift(&mut self, dx: i8) {
        if self.board.try_move(dx, 0) {
            self.lock_delay.on_manipulation(self.config.max_lock_resets);
        }
    }

    fn rotate(&mut self, direction: RotateDirection) {
        if self.board.try_rotate(direction) {
            self.lock_delay.on_manipulation(self.config.max_lock_resets);
        }
    }

    fn hold(&mut self) {
        if !self.board.swap_hold() {
            return;
        }
        self.refill_queue();
        self.gravity_counter = 0;
        if let Some(piece) = self.board.active() {
            self.lock_delay = LockDelay::new(piece.y);
            trace!(kind = piece.kind.as_str(), "spawned from hold");
        }
    }

    fn descended(&mut self) {
        if let Some(piece) = self.board.active() {
            self.lock_delay.on_descend(piece.y);
        }
    }

    fn apply_gravity(&mut self) {
        self.gravity_counter += 1;
        if self.gravity_counter < gravity_interval(&self.config.gravity_steps, self.level) {
            return;
        }
        self.gravity_counter = 0;
        if self.board.soft_drop() {
            self.descended();
        }
    }

    /// Commit the active piece. Leaves the phase at `LineClear` or `GameOver`.
    fn lock_active(&mut self, hard_drop: bool, outcome: &mut StepOutcome) {
        let Some(active) = self.board.active() else {
            self.phase = Phase::LineClear { rows: 0 };
            return;
        };

        let landed = match (hard_drop, self.board.ghost_y()) {
            (true, Some(y)) => Tetromino { y, ..active },
            _ => active,
        };
        let t_spin = if self.config.scoring.t_spin {
            self.t_spin_kind(&landed)
        } else {
            TSpinKind::None
        };

        let lock = if hard_drop {
            match self.board.hard_drop() {
                Some(drop) => {
                    outcome.drop_rows += drop.rows;
                    if self.config.scoring.drop_points {
                        self.award(calculate_drop_score(drop.rows, true), outcome);
                    }
                    Some(drop.lock)
                }
                None => None,
            }
        } else {
            self.board.lock()
        };
        let Some(lock) = lock else {
            self.phase = Phase::LineClear { rows: 0 };
            return;
        };

        self.piece_count += 1;
        outcome.locked = true;
        outcome.t_spin = t_spin;
        self.score_lock(&lock, t_spin, outcome);

        self.phase = if lock.lock_out {
            Phase::GameOver(GameOverReason::LockOut)
        } else {
            Phase::LineClear {
                rows: lock.lines() as u8,
            }
        };
    }

    fn score_lock(&mut self, lock: &LockResult, t_spin: TSpinKind, outcome: &mut StepOutcome) {
        let lines = lock.lines();
        let scoring = self.config.scoring;

        self.combo = if lines > 0 { self.combo + 1 } else { -1 };
        let combo_index = if scoring.combo { self.combo } else { -1 };
        let previous_b2b = scoring.back_to_back && self.back_to_back;

        // Level before the clear
        let result = calculate_score(lines as usize, self.level, t_spin, combo_index, previous_b2b);

        // Only clears can start or break a back-to-back chain.
        if lines > 0 {
            self.back_to_back = result.qualifies_for_b2b;
            self.lines += lines;
            self.level = calculate_level(self.lines);
            debug!(
                lines,
                points = result.total,
                t_spin = t_spin.as_str().unwrap_or("none"),
                combo = self.combo,
                "lines cleared"
            );
        }

        outcome.lines_cleared = lines;
        outcome.line_clear_score = result.total;
        outcome.back_to_back = result.b2b_applied;
        self.award(result.total, outcome);
    }

    /// Three-corner rule. Out-of-bounds corners count as filled.
    fn t_spin_kind(&self, piece: &Tetromino) -> TSpinKind {
        if piece.kind != PieceKind::T {
            return TSpinKind::None;
        }
        let Some(kick) = self.board.last_kick() else {
            return TSpinKind::None;
        };

        let filled = |&(cx, cy): &(i8, i8)| !self.board.is_valid(piece.x + cx, piece.y + cy);
        let corners: [(i8, i8); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];
        if corners.iter().filter(|c| filled(c)).count() < 3 {
            return TSpinKind::None;
        }

        // The two corners beside the pointing mino
        let front: [(i8, i8); 2] = match piece.rotation {
            Rotation::North => [(0, 0), (2, 0)],
            Rotation::East => [(2, 0), (2, 2)],
            Rotation::South => [(0, 2), (2, 2)],
            Rotation::West => [(0, 0), (0, 2)],
        };

        // The last kick of a rotation always upgrades to a full T-spin.
        if front.iter().all(filled) || kick == 4 {
            TSpinKind::Full
        } else {
            TSpinKind::Mini
        }
    }

    fn refill_queue(&mut self) {
        while self.board.queue().len() < self.config.preview_len {
            let kind = self.randomizer.next();
            self.board.push_queue(kind);
        }
    }

    /// Spawn the queue head. Leaves the phase at `Falling` or `GameOver`.
    fn spawn_next(&mut self) {
        let kind = match self.board.pop_queue() {
            Some(kind) => kind,
            None => self.randomizer.next(),
        };
        self.refill_queue();

        match self.board.spawn(kind) {
            Ok(()) => {
                let y = self.board.active().map_or(0, |piece| piece.y);
                self.lock_delay = LockDelay::new(y);
                self.gravity_counter = 0;
                self.phase = Phase::Falling;
                trace!(kind = kind.as_str(), "spawned");
            }
            Err(reason) => self.phase = Phase::GameOver(reason),
        }
    }
}
