use serde::Serialize;

use crate::piece::{Piece, PieceCells};
use crate::types::{Cell, ColorId, Orientation, Phase, ShapeId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    pub shape: ShapeId,
    pub orientation: Orientation,
    pub anchor: Cell,
    pub cells: PieceCells,
    pub color: ColorId,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape,
            orientation: value.orientation,
            anchor: value.anchor,
            cells: value.occupied_cells(),
            color: value.color_id(),
        }
    }
}

/// Read-only copy of everything a render adapter draws.
///
/// `board[row][col]`, row 0 is the floor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    pub board: Vec<Vec<Option<ColorId>>>,
    pub active: Option<ActiveSnapshot>,
    /// Anchor row the active piece would land on.
    pub ghost_row: Option<i16>,
    pub next: ShapeId,
    pub phase: Phase,
    pub episode_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn occupant(&self, col: i16, row: i16) -> Option<ColorId> {
        if col < 0 || row < 0 {
            return None;
        }
        self.board
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .flatten()
    }

    /// Cells of the active piece dropped to its ghost row.
    pub fn ghost_cells(&self) -> Option<impl Iterator<Item = Cell> + '_> {
        let active = self.active.as_ref()?;
        let dy = self.ghost_row? - active.anchor.row;
        Some(active.cells.iter().map(move |c| c.offset(0, dy)))
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            ghost_row: None,
            next: ShapeId::T,
            phase: Phase::Spawning,
            episode_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            fall_interval_ms: 0,
        }
    }
}
