//! Scene adapter: grid cells to world-space blocks for a 3D view.
//!
//! The mapping is one-way (`Cell` → position) and rebuilt from a snapshot on
//! every call; nothing here is ever read back into the game.

use serde::Serialize;

use crate::core::shapes::shape_for_color;
use crate::core::GameSnapshot;
use crate::types::{Cell, ColorId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// World placement of the grid: cell `(0, 0)` sits at `origin`, each cell
/// is a cube of edge `block_size`, rows grow along +y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayout {
    pub block_size: f32,
    pub origin: Vec3,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            block_size: 0.02,
            origin: Vec3::new(-0.09, 0.01, -0.5),
        }
    }
}

impl SceneLayout {
    pub fn position(&self, cell: Cell) -> Vec3 {
        Vec3 {
            x: self.origin.x + cell.col as f32 * self.block_size,
            y: self.origin.y + cell.row as f32 * self.block_size,
            z: self.origin.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Placed,
    Active,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneBlock {
    pub cell: Cell,
    pub position: Vec3,
    /// RGB, from the shape palette.
    pub color: [u8; 3],
    pub kind: BlockKind,
}

/// Build the block list for `snap`: placed cells bottom-up, then the ghost,
/// then the active piece.
pub fn build_scene(snap: &GameSnapshot, layout: &SceneLayout) -> Vec<SceneBlock> {
    let mut blocks = Vec::new();
    build_scene_into(snap, layout, &mut blocks);
    blocks
}

/// Like [`build_scene`], reusing `out`'s allocation.
pub fn build_scene_into(snap: &GameSnapshot, layout: &SceneLayout, out: &mut Vec<SceneBlock>) {
    out.clear();

    let mut push = |cell: Cell, color: ColorId, kind: BlockKind| {
        out.push(SceneBlock {
            cell,
            position: layout.position(cell),
            color: rgb(color),
            kind,
        });
    };

    for (row, cols) in snap.board.iter().enumerate() {
        for (col, occupant) in cols.iter().enumerate() {
            if let Some(color) = occupant {
                push(Cell::new(col as i16, row as i16), *color, BlockKind::Placed);
            }
        }
    }

    let Some(active) = &snap.active else {
        return;
    };
    if let Some(ghost) = snap.ghost_cells() {
        for cell in ghost.filter(|c| !active.cells.contains(c)) {
            push(cell, active.color, BlockKind::Ghost);
        }
    }
    for &cell in active.cells.iter() {
        push(cell, active.color, BlockKind::Active);
    }
}

fn rgb(color: ColorId) -> [u8; 3] {
    shape_for_color(color)
        .map(|s| [s.color.r, s.color.g, s.color.b])
        .unwrap_or([160, 160, 160])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Game, GameConfig};
    use crate::types::{Command, ShapeId};

    #[test]
    fn test_default_layout_positions() {
        let layout = SceneLayout::default();
        let p = layout.position(Cell::new(0, 0));
        assert_eq!(p, Vec3::new(-0.09, 0.01, -0.5));

        let p = layout.position(Cell::new(3, 2));
        assert!((p.x - (-0.09 + 0.06)).abs() < 1e-6);
        assert!((p.y - (0.01 + 0.04)).abs() < 1e-6);
        assert_eq!(p.z, -0.5);
    }

    #[test]
    fn test_scene_contains_placed_ghost_and_active() {
        let config = GameConfig {
            script: vec![ShapeId::O],
            ..GameConfig::default()
        };
        let mut game = Game::new(config).unwrap();
        game.apply(Command::HardDrop);
        game.start();

        let blocks = build_scene(&game.snapshot(), &SceneLayout::default());
        let count = |kind| blocks.iter().filter(|b| b.kind == kind).count();
        assert_eq!(count(BlockKind::Placed), 4);
        assert_eq!(count(BlockKind::Ghost), 4);
        assert_eq!(count(BlockKind::Active), 4);

        let placed_rows: Vec<i16> = blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Placed)
            .map(|b| b.cell.row)
            .collect();
        assert_eq!(placed_rows, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_rebuild_reuses_buffer() {
        let game = Game::new(GameConfig::default()).unwrap();
        let mut out = Vec::with_capacity(64);
        build_scene_into(&game.snapshot(), &SceneLayout::default(), &mut out);
        assert!(out.is_empty());
        assert!(out.capacity() >= 64);
    }

    #[test]
    fn test_blocks_serialize() {
        let block = SceneBlock {
            cell: Cell::new(1, 2),
            position: Vec3::new(0.0, 0.0, 0.0),
            color: [1, 2, 3],
            kind: BlockKind::Ghost,
        };
        let json = serde_json::to_value(block).unwrap();
        assert_eq!(json["kind"], "ghost");
        assert_eq!(json["cell"]["row"], 2);
    }
}
