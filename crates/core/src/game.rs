//! Game controller - the spawn → fall → lock → clear state machine
//!
//! [`Game`] owns the grid, the active piece and the counters, and is the only
//! thing that mutates them. It is driven from one thread by two inputs:
//!
//! - discrete [`Command`]s from the input layer ([`Game::apply`])
//! - a clock, either one fall step at a time ([`Game::tick`]) or by elapsed
//!   milliseconds ([`Game::advance`])
//!
//! Every move, rotation and fall is validated by the collision engine before
//! it is committed. Only a *downward* attempt that collides locks the piece;
//! colliding horizontal moves and rotations are simply rejected.

use serde::Serialize;
use tracing::{debug, error, info, trace};

use crate::collision::{collides, drop_distance, first_collision};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::line_clear::{clear_rows, completed_rows};
use crate::piece::{Piece, PieceCells};
use crate::rng::PieceQueue;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score, fall_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Cell, Command, Phase, ShapeId};

/// State transitions, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Spawned { shape: ShapeId, anchor: Cell },
    Locked { shape: ShapeId, cells: PieceCells },
    LinesCleared { rows: Vec<u16> },
    GameOver { score: u32, lines: u32 },
    Reset { episode_id: u32 },
}

/// Result of a single state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to do (game over).
    Idle,
    /// A new piece entered the grid.
    Spawned,
    /// The active piece moved down one row.
    Moved,
    /// The active piece locked; `lines_cleared` rows were removed.
    Locked { lines_cleared: usize },
    /// The spawn position was blocked.
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    active: Option<Piece>,
    queue: PieceQueue,
    phase: Phase,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    fall_timer_ms: u32,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a game on an empty grid. The first piece spawns on the first
    /// step, command or [`Game::start`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let grid = Grid::new(config.width, config.height);
        Self::with_grid(config, grid)
    }

    /// Create a game over a prepared grid. The grid's dimensions win over
    /// the ones in `config`.
    pub fn with_grid(mut config: GameConfig, grid: Grid) -> Result<Self, ConfigError> {
        config.width = grid.width();
        config.height = grid.height();
        config.validate()?;

        let queue = Self::queue_for(&config);
        Ok(Self {
            config,
            grid,
            active: None,
            queue,
            phase: Phase::Spawning,
            episode_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            fall_timer_ms: 0,
            events: Vec::new(),
        })
    }

    fn queue_for(config: &GameConfig) -> PieceQueue {
        if config.script.is_empty() {
            PieceQueue::new(config.randomizer, &config.shapes, config.seed)
        } else {
            PieceQueue::scripted(&config.script)
        }
    }

    /// Spawn the first piece if none has been spawned yet.
    pub fn start(&mut self) {
        if self.phase == Phase::Spawning {
            self.spawn_next();
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
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

    pub fn next_shape(&self) -> ShapeId {
        self.queue.peek()
    }

    /// Current fall interval, derived from the level when speed-up is on.
    pub fn fall_interval_ms(&self) -> u32 {
        if self.config.speed_up {
            fall_interval_ms(self.level, self.config.fall_interval_ms)
        } else {
            self.config.fall_interval_ms
        }
    }

    /// Where the active piece would land on a hard drop.
    pub fn ghost(&self) -> Option<Piece> {
        let active = self.active?;
        Some(active.translated(0, -drop_distance(&self.grid, &active)))
    }

    /// Take the transitions recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// One state-machine step: spawn when spawning, fall one row when
    /// falling, nothing when the game is over.
    pub fn tick(&mut self) -> StepOutcome {
        match self.phase {
            Phase::Spawning => self.spawn_next(),
            Phase::Falling => self.step_down(false),
            // Locking always completes inside the step that entered it.
            Phase::Locking => StepOutcome::Idle,
            Phase::GameOver => StepOutcome::Idle,
        }
    }

    /// Advance the clock by `elapsed_ms` and return the number of fall steps taken.
    ///
    /// A pending spawn happens immediately; after that one fall step is taken
    /// per elapsed fall interval. A lock ends the batch so the next piece
    /// starts with a fresh interval.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        match self.phase {
            Phase::GameOver | Phase::Locking => return 0,
            Phase::Spawning => {
                self.spawn_next();
                self.fall_timer_ms = 0;
            }
            Phase::Falling => {}
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        let mut steps = 0;
        while self.phase == Phase::Falling {
            let interval = self.fall_interval_ms();
            if self.fall_timer_ms < interval {
                break;
            }
            self.fall_timer_ms -= interval;
            self.step_down(false);
            steps += 1;
        }
        if self.phase != Phase::Falling {
            self.fall_timer_ms = 0;
        }
        steps
    }

    /// Apply an input command. Returns whether it changed the game state.
    ///
    /// `Reset` is accepted in every phase; everything else is ignored once the
    /// game is over. A command arriving while spawning resolves the spawn
    /// first; if that spawn is blocked the command is dropped but the switch
    /// to game over still counts as a change.
    pub fn apply(&mut self, command: Command) -> bool {
        if command != Command::Reset {
            if self.phase == Phase::Spawning && self.spawn_next() == StepOutcome::GameOver {
                return true;
            }
            if self.phase != Phase::Falling {
                return false;
            }
        }

        match command {
            Command::MoveLeft => self.try_shift(-1),
            Command::MoveRight => self.try_shift(1),
            Command::RotateCw => self.try_rotate(),
            Command::SoftDrop => self.step_down(true) != StepOutcome::Idle,
            Command::HardDrop => self.hard_drop(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Reinitialize grid, counters and randomizer, then spawn a fresh piece.
    ///
    /// Events not yet taken are kept; `Reset` is recorded after them.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.active = None;
        self.queue = Self::queue_for(&self.config);
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.fall_timer_ms = 0;
        // Undrained events from the previous episode stay queued ahead of Reset.
        self.events.push(GameEvent::Reset {
            episode_id: self.episode_id,
        });
        info!(episode_id = self.episode_id, "game reset");

        self.phase = Phase::Spawning;
        self.spawn_next();
    }

    fn spawn_next(&mut self) -> StepOutcome {
        debug_assert_eq!(self.phase, Phase::Spawning);
        let shape = self.queue.draw();
        let piece = Piece::spawn(shape, self.grid.width(), self.grid.height());

        if let Some(hit) = first_collision(&self.grid, &piece) {
            info!(
                ?shape,
                cell = %hit.cell,
                score = self.score,
                lines = self.lines,
                "spawn blocked, game over"
            );
            self.active = None;
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.score,
                lines: self.lines,
            });
            return StepOutcome::GameOver;
        }

        debug!(?shape, anchor = %piece.anchor, "spawned piece");
        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.events.push(GameEvent::Spawned {
            shape,
            anchor: piece.anchor,
        });
        StepOutcome::Spawned
    }

    /// Commit `candidate` if it fits. Rejections are normal and only traced.
    fn try_commit(&mut self, candidate: Piece, what: &'static str) -> bool {
        match first_collision(&self.grid, &candidate) {
            None => {
                self.active = Some(candidate);
                true
            }
            Some(hit) => {
                trace!(what, cell = %hit.cell, blocker = ?hit.blocker, "rejected");
                false
            }
        }
    }

    fn try_shift(&mut self, dx: i16) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.try_commit(active.translated(dx, 0), "shift")
    }

    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let turned = active.rotated();
        let fit = self
            .config
            .rotation
            .offsets()
            .iter()
            .map(|&(dx, dy)| turned.translated(dx, dy))
            .find(|candidate| !collides(&self.grid, candidate));

        match fit {
            Some(candidate) => {
                self.active = Some(candidate);
                true
            }
            None => {
                // Report why the unkicked rotation failed.
                self.try_commit(turned, "rotate")
            }
        }
    }

    /// One downward attempt. Colliding here is the lock trigger.
    fn step_down(&mut self, soft: bool) -> StepOutcome {
        let Some(active) = self.active else {
            return StepOutcome::Idle;
        };
        let candidate = active.translated(0, -1);
        if collides(&self.grid, &candidate) {
            let lines_cleared = self.lock_active();
            return StepOutcome::Locked { lines_cleared };
        }

        self.active = Some(candidate);
        if soft {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
        }
        StepOutcome::Moved
    }

    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let distance = drop_distance(&self.grid, &active);
        self.active = Some(active.translated(0, -distance));
        self.score = self
            .score
            .saturating_add(calculate_drop_score(distance as u32, true));
        self.lock_active();
        true
    }

    /// Write the active piece into the grid, clear completed rows and leave
    /// the controller in `Spawning`. Returns the number of rows cleared.
    fn lock_active(&mut self) -> usize {
        self.phase = Phase::Locking;
        let Some(piece) = self.active.take() else {
            self.phase = Phase::Spawning;
            return 0;
        };

        let cells = piece.occupied_cells();
        if let Err(err) = self.grid.place(&cells, piece.color_id()) {
            // Unreachable while every commit goes through the collision check.
            error!(%err, ?piece, "lock placement refused");
            debug_assert!(false, "lock placement refused: {err}");
        }
        debug!(shape = ?piece.shape, anchor = %piece.anchor, "locked piece");
        self.events.push(GameEvent::Locked {
            shape: piece.shape,
            cells,
        });

        let rows = completed_rows(&self.grid);
        let cleared = rows.len();
        if cleared > 0 {
            clear_rows(&mut self.grid, &rows);
            self.lines = self.lines.saturating_add(cleared as u32);
            self.level = calculate_level(self.lines);
            self.score = self
                .score
                .saturating_add(calculate_line_score(cleared, self.level));
            debug!(?rows, lines = self.lines, level = self.level, "cleared rows");
            self.events.push(GameEvent::LinesCleared { rows });
        }

        self.phase = Phase::Spawning;
        cleared
    }

    /// Refresh `out` in place; row buffers are reused when dimensions match.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let width = self.grid.width() as usize;
        let height = self.grid.height() as usize;
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.board.resize_with(height, Vec::new);
        for (row, dst) in out.board.iter_mut().enumerate() {
            dst.resize(width, None);
            dst.copy_from_slice(self.grid.row(row as u16));
        }

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.ghost().map(|g| g.anchor.row);
        out.next = self.next_shape();
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval_ms = self.fall_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
