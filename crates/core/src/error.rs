//! Error types for grid access and configuration.
//!
//! A rejected move is not an error; it is a normal outcome reported as `false`.
//! Game over is not an error either; it is a phase.

use thiserror::Error;

use crate::types::Cell;

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementFault {
    OutOfBounds,
    Occupied,
}

impl std::fmt::Display for PlacementFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementFault::OutOfBounds => f.write_str("out of bounds"),
            PlacementFault::Occupied => f.write_str("already occupied"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A query addressed a cell outside the grid.
    #[error("cell {cell} is outside the grid")]
    OutOfBounds { cell: Cell },

    /// `place` was asked to write a cell that is off-grid or taken.
    #[error("cannot place block at {cell}: {reason}")]
    InvalidPlacement { cell: Cell, reason: PlacementFault },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board {width}x{height} is too small (minimum {min}x{min})")]
    BoardTooSmall { width: u16, height: u16, min: u16 },

    #[error("board {width}x{height} is too large (maximum {max}x{max})")]
    BoardTooLarge { width: u16, height: u16, max: u16 },

    #[error("shape pool is empty")]
    EmptyShapePool,

    #[error("fall interval must be greater than zero")]
    ZeroFallInterval,

    #[error("unknown shape letter {0:?}")]
    UnknownShape(char),
}
