//! DAS/ARR input handler for terminal environments.
//!
//! A held horizontal key fires once, waits the DAS delay, then repeats every
//! ARR interval. Soft drop repeats the same way with its own timings.
//! Terminals that never send key releases are handled with a timeout: a key
//! not re-reported within it counts as released.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::command_for_code;
use crate::types::{
    Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

/// Upper bound on repeats emitted by one [`InputHandler::update`].
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

pub type Repeats = ArrayVec<Command, MAX_REPEATS_PER_UPDATE>;

const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Repeat state of one held command.
#[derive(Debug, Clone, Copy)]
struct Held {
    command: Command,
    das_timer: u32,
    arr_accumulator: u32,
}

impl Held {
    fn new(command: Command) -> Self {
        Self {
            command,
            das_timer: 0,
            arr_accumulator: 0,
        }
    }

    fn advance(&mut self, elapsed_ms: u32, das: u32, arr: u32, out: &mut Repeats) {
        let prev = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das {
            return;
        }
        // Only the time past the DAS threshold counts toward the first repeat.
        let excess = if prev < das {
            self.das_timer - das
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(excess);
        let arr = arr.max(1);
        while self.arr_accumulator >= arr {
            self.arr_accumulator -= arr;
            if out.try_push(self.command).is_err() {
                self.arr_accumulator = 0;
                break;
            }
        }
    }
}

/// Tracks held directional keys and turns them into repeated commands.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Option<Held>,
    soft_drop: Option<Held>,
    last_key_time: Instant,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: None,
            soft_drop: None,
            last_key_time: Instant::now(),
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Register a key press. Returns the command to apply now, if any.
    ///
    /// A repeated press of an already-held directional key only refreshes the
    /// release timeout; the repeats come from [`InputHandler::update`].
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        let command = command_for_code(code)?;
        let slot = match command {
            Command::MoveLeft | Command::MoveRight => &mut self.horizontal,
            Command::SoftDrop => &mut self.soft_drop,
            _ => return Some(command),
        };

        self.last_key_time = Instant::now();
        if slot.is_some_and(|held| held.command == command) {
            return None;
        }
        *slot = Some(Held::new(command));
        Some(command)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let Some(command) = command_for_code(code) else {
            return;
        };
        for slot in [&mut self.horizontal, &mut self.soft_drop] {
            if slot.is_some_and(|held| held.command == command) {
                *slot = None;
            }
        }
    }

    /// Advance repeat timers and return the repeats that came due.
    pub fn update(&mut self, elapsed_ms: u32) -> Repeats {
        let mut repeats = Repeats::new();

        // Auto-release when the terminal does not emit release events.
        if self.last_key_time.elapsed() > Duration::from_millis(self.key_release_timeout_ms as u64) {
            self.horizontal = None;
            self.soft_drop = None;
        }

        if let Some(held) = self.horizontal.as_mut() {
            held.advance(elapsed_ms, self.das_delay, self.arr_rate, &mut repeats);
        }
        if let Some(held) = self.soft_drop.as_mut() {
            held.advance(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS, &mut repeats);
        }

        repeats
    }

    pub fn is_holding(&self, command: Command) -> bool {
        [self.horizontal, self.soft_drop]
            .iter()
            .flatten()
            .any(|held| held.command == command)
    }

    pub fn reset(&mut self) {
        self.horizontal = None;
        self.soft_drop = None;
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
