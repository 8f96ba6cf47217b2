//! Piece module - the active falling unit
//!
//! A piece is a value: `(shape, orientation, anchor)`. Moving or rotating
//! produces a new piece; the controller decides whether to commit it.

use arrayvec::ArrayVec;

use crate::shapes::{get_shape, oriented_offsets, Shape};
use crate::types::{Cell, ColorId, Orientation, ShapeId, MAX_SHAPE_CELLS};

/// Absolute cells covered by a piece.
pub type PieceCells = ArrayVec<Cell, MAX_SHAPE_CELLS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeId,
    pub orientation: Orientation,
    pub anchor: Cell,
}

impl Piece {
    pub fn new(shape: ShapeId, orientation: Orientation, anchor: Cell) -> Self {
        Self {
            shape,
            orientation,
            anchor,
        }
    }

    /// Create a piece in spawn orientation at the top-center of a grid.
    ///
    /// The canonical bounding box is centered horizontally
    /// (`left = width/2 - box_width/2`) and sits in the top `box_height` rows.
    pub fn spawn(shape: ShapeId, grid_width: u16, grid_height: u16) -> Self {
        let (min_dx, min_dy, box_w, box_h) = get_shape(shape).bounds();
        let left = (grid_width / 2) as i16 - box_w / 2;
        let bottom = grid_height as i16 - box_h;
        Self {
            shape,
            orientation: Orientation::SPAWN,
            anchor: Cell::new(left - min_dx, bottom - min_dy),
        }
    }

    pub fn shape_def(&self) -> &'static Shape {
        get_shape(self.shape)
    }

    pub fn color_id(&self) -> ColorId {
        self.shape_def().color_id()
    }

    /// Absolute cells: `anchor + rotate(offset, orientation)` for every offset.
    pub fn occupied_cells(&self) -> PieceCells {
        oriented_offsets(self.shape_def(), self.orientation)
            .map(|(dx, dy)| self.anchor.offset(dx, dy))
            .collect()
    }

    /// Same piece, one clockwise quarter turn, anchor unchanged.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            orientation: self.orientation.rotate_cw(),
            ..*self
        }
    }

    /// Same piece shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: i16, dy: i16) -> Self {
        Self {
            anchor: self.anchor.offset(dx, dy),
            ..*self
        }
    }

    /// Lowest row covered by the piece.
    pub fn bottom_row(&self) -> i16 {
        self.occupied_cells().iter().map(|c| c.row).min().unwrap_or(self.anchor.row)
    }
}
