//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable from the
//! core state machine, the input layer and every render adapter.
//!
//! # Coordinates
//!
//! The playfield is a discrete grid of cells addressed as `(col, row)`:
//!
//! - **col**: `0..width`, left to right
//! - **row**: `0..height`, **row 0 is the floor** and rows increase upward
//!
//! Gravity decreases the row index. Coordinates are signed so that candidate
//! positions outside the grid (e.g. `col = -1` next to the left wall) can be
//! represented and rejected by collision checks.
//!
//! # Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame step used by the terminal runner (~60 FPS) |
//! | `BASE_FALL_MS` | 1000 | Default fall interval at level 0 |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines needed per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, Command, ShapeId};
//!
//! let cell = Cell::new(3, 0).offset(1, 2);
//! assert_eq!(cell, Cell::new(4, 2));
//!
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//! assert_eq!(ShapeId::from_char('t'), Some(ShapeId::T));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells.
pub const DEFAULT_WIDTH: u16 = 10;

/// Default board height in cells.
pub const DEFAULT_HEIGHT: u16 = 20;

/// Smallest accepted board dimension.
pub const MIN_DIMENSION: u16 = 4;

/// Largest accepted board dimension (keeps every coordinate inside `i16`).
pub const MAX_DIMENSION: u16 = 256;

/// Frame step of the interactive runner (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Default fall interval at level 0 (one row per second).
pub const BASE_FALL_MS: u32 = 1000;

/// Cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Fall intervals by level for a 1000ms base, index 0 = level 0.
pub const FALL_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Interval used from level 9 onward (for a 1000ms base).
pub const FALL_INTERVAL_FLOOR_MS: u32 = 120;

/// Absolute minimum fall interval regardless of base.
pub const FALL_INTERVAL_MIN_MS: u32 = 100;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop DAS in milliseconds.
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Soft drop ARR in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Maximum number of cells in any shape.
pub const MAX_SHAPE_CELLS: usize = 4;

/// A discrete grid coordinate. Row 0 is the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i16,
    pub row: i16,
}

impl Cell {
    pub const fn new(col: i16, row: i16) -> Self {
        Self { col, row }
    }

    /// Return this cell shifted by `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i16, dy: i16) -> Self {
        Self {
            col: self.col + dx,
            row: self.row + dy,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Identifier stored in occupied grid cells; one per shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(pub u8);

/// The shape kinds known to the game.
///
/// The seven tetrominoes plus `Dot`, a single-cell piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeId {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    Dot,
}

impl ShapeId {
    /// Every shape, in table order.
    pub const ALL: [ShapeId; 8] = [
        ShapeId::I,
        ShapeId::O,
        ShapeId::T,
        ShapeId::S,
        ShapeId::Z,
        ShapeId::J,
        ShapeId::L,
        ShapeId::Dot,
    ];

    /// The seven standard tetrominoes.
    pub const TETROMINOES: [ShapeId; 7] = [
        ShapeId::I,
        ShapeId::O,
        ShapeId::T,
        ShapeId::S,
        ShapeId::Z,
        ShapeId::J,
        ShapeId::L,
    ];

    /// Index into the shape table.
    pub const fn index(self) -> usize {
        match self {
            ShapeId::I => 0,
            ShapeId::O => 1,
            ShapeId::T => 2,
            ShapeId::S => 3,
            ShapeId::Z => 4,
            ShapeId::J => 5,
            ShapeId::L => 6,
            ShapeId::Dot => 7,
        }
    }

    /// Parse a shape from its letter (case-insensitive, `d` = Dot).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeId;
    ///
    /// assert_eq!(ShapeId::from_char('I'), Some(ShapeId::I));
    /// assert_eq!(ShapeId::from_char('d'), Some(ShapeId::Dot));
    /// assert_eq!(ShapeId::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'i' => Some(ShapeId::I),
            'o' => Some(ShapeId::O),
            't' => Some(ShapeId::T),
            's' => Some(ShapeId::S),
            'z' => Some(ShapeId::Z),
            'j' => Some(ShapeId::J),
            'l' => Some(ShapeId::L),
            'd' => Some(ShapeId::Dot),
            _ => None,
        }
    }

    /// Single uppercase letter used by the side panel.
    pub fn letter(self) -> &'static str {
        match self {
            ShapeId::I => "I",
            ShapeId::O => "O",
            ShapeId::T => "T",
            ShapeId::S => "S",
            ShapeId::Z => "Z",
            ShapeId::J => "J",
            ShapeId::L => "L",
            ShapeId::Dot => "D",
        }
    }
}

/// Orientation as clockwise quarter turns from the canonical shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Orientation(u8);

impl Orientation {
    pub const SPAWN: Orientation = Orientation(0);

    /// Build from any turn count (reduced modulo 4).
    pub const fn new(quarter_turns: u8) -> Self {
        Self(quarter_turns % 4)
    }

    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    /// One clockwise quarter turn.
    ///
    /// ```
    /// use blockfall_types::Orientation;
    ///
    /// let o = Orientation::SPAWN;
    /// assert_eq!(o.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), o);
    /// ```
    pub const fn rotate_cw(self) -> Self {
        Self((self.0 + 1) % 4)
    }
}

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::Locking => "locking",
            Phase::GameOver => "gameOver",
        }
    }
}

/// The closed set of commands accepted from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    SoftDrop,
    HardDrop,
    Reset,
}

impl Command {
    /// Parse from the camelCase command name.
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("rotateCw"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "moveLeft" => Some(Command::MoveLeft),
            "moveRight" => Some(Command::MoveRight),
            "rotateCw" => Some(Command::RotateCw),
            "softDrop" => Some(Command::SoftDrop),
            "hardDrop" => Some(Command::HardDrop),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Reset => "reset",
        }
    }
}
