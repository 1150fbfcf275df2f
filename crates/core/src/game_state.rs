//! Game state module - manages the complete game state
//!
//! This module ties together the board, the piece catalog, the random source and
//! scoring. It owns the run-state machine (idle, running, paused, over) and
//! applies ticks and player intents. Anything outside its legal state is a
//! silent no-op; each operation reports whether it changed anything.

use std::time::Duration;

use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::rng::{random_kind, RandomSource, SimpleRng};
use crate::scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    active: Option<Tetromino>,
    next: PieceKind,
    rng: R,
    run_state: RunState,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Successful spawns since the last reset.
    pieces_spawned: u32,
    /// Last lock event (consumed by the driver).
    last_event: Option<LockEvent>,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create an idle game drawing pieces from `rng`.
    ///
    /// The first next piece is drawn immediately.
    pub fn with_rng(mut rng: R) -> Self {
        let next = random_kind(&mut rng);
        Self {
            board: Board::new(),
            active: None,
            next,
            rng,
            run_state: RunState::Idle,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: get_drop_interval_ms(1),
            pieces_spawned: 0,
            last_event: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// How long the driver should wait between ticks at the current level.
    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms as u64)
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Whether `shape` anchored at `(x, y)` fits on the current board.
    pub fn is_valid_move(&self, shape: &Shape, x: i8, y: i8) -> bool {
        self.board.is_valid_move(shape, x, y)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = NextSnapshot::from(self.next);
        out.run_state = self.run_state;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Leave the idle state and spawn the first piece.
    pub fn start(&mut self) -> bool {
        if self.run_state != RunState::Idle {
            return false;
        }
        self.run_state = RunState::Running;
        info!(interval_ms = self.drop_interval_ms, "game started");
        self.spawn_piece();
        true
    }

    /// Toggle between running and paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::Idle | RunState::GameOver => return false,
        };
        info!(state = self.run_state.as_str(), "pause toggled");
        true
    }

    /// Discard the board and progress and return to idle.
    ///
    /// The random source carries on from where it was.
    pub fn reset(&mut self) -> bool {
        self.board.clear();
        self.active = None;
        self.next = random_kind(&mut self.rng);
        self.run_state = RunState::Idle;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = get_drop_interval_ms(1);
        self.pieces_spawned = 0;
        self.last_event = None;
        info!("game reset");
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.is_running() && self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.is_running() && self.try_move(1, 0)
    }

    /// Move the piece down one row, locking it if it cannot move.
    pub fn soft_drop(&mut self) -> bool {
        self.is_running() && self.step_down()
    }

    /// Rotate clockwise in place. Rejected rotations change nothing.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated();
        if !self.board.is_valid_move(&rotated.shape, rotated.x, rotated.y) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Gravity step, called once per drop interval by the driver.
    pub fn tick(&mut self) -> bool {
        self.is_running() && self.step_down()
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => self.start(),
            GameAction::Reset => self.reset(),
        }
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if !self.board.is_valid_move(&moved.shape, moved.x, moved.y) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    fn step_down(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Lock the active piece onto the board, clear lines and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .lock_piece(&active.shape, active.x, active.y, active.color());

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len() as u32;
        let (points, level_up) = self.award_lines(lines_cleared);
        debug!(
            kind = active.kind.as_str(),
            x = active.x,
            y = active.y,
            lines_cleared,
            points,
            "piece locked"
        );

        let spawned = self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared,
            points,
            level_up,
            game_over: !spawned,
        });
    }

    /// Update score, lines and level for one clear event.
    ///
    /// Points use the level in effect before the clear.
    fn award_lines(&mut self, lines_cleared: u32) -> (u32, bool) {
        if lines_cleared == 0 {
            return (0, false);
        }

        let points = calculate_line_score(lines_cleared as usize, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared);

        let new_level = calculate_level(self.lines);
        let level_up = new_level > self.level;
        if level_up {
            self.level = new_level;
            self.drop_interval_ms = get_drop_interval_ms(new_level);
            info!(
                level = self.level,
                interval_ms = self.drop_interval_ms,
                "level up"
            );
        }

        (points, level_up)
    }

    /// Promote the next piece to active and draw a new next piece.
    ///
    /// Returns false (and ends the game) if the spawn position is blocked.
    fn spawn_piece(&mut self) -> bool {
        let piece = Tetromino::new(self.next);
        self.next = random_kind(&mut self.rng);

        if !self.board.is_valid_move(&piece.shape, piece.x, piece.y) {
            self.active = None;
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(
            kind = piece.kind.as_str(),
            next = self.next.as_str(),
            "piece spawned"
        );
        true
    }

    fn end_game(&mut self) {
        self.run_state = RunState::GameOver;
        info!(
            score = self.score,
            level = self.level,
            lines = self.lines,
            "game over"
        );
    }
}
