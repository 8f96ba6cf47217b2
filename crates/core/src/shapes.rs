//! Shapes module - the immutable shape table
//!
//! Each shape is a set of `(dx, dy)` offsets around a pivot at `(0, 0)` in its
//! canonical orientation, with `dy` pointing up. Shapes are `'static` and
//! shared by every piece; nothing mutates them.

use crate::types::{ColorId, Orientation, ShapeId};

/// Offset of a single block relative to the piece anchor.
pub type Offset = (i16, i16);

/// Display color of a shape (24-bit RGB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub id: ShapeId,
    pub offsets: &'static [Offset],
    pub color: ShapeColor,
    /// Rotation-invariant shapes (O, Dot) ignore orientation entirely.
    pub rotates: bool,
}

impl Shape {
    /// Occupancy color written into the grid when this shape locks.
    pub fn color_id(&self) -> ColorId {
        ColorId(self.id.index() as u8)
    }

    /// Bounding box of the canonical orientation: `(min_dx, min_dy, width, height)`.
    pub fn bounds(&self) -> (i16, i16, i16, i16) {
        let min_dx = self.offsets.iter().map(|o| o.0).min().unwrap_or(0);
        let max_dx = self.offsets.iter().map(|o| o.0).max().unwrap_or(0);
        let min_dy = self.offsets.iter().map(|o| o.1).min().unwrap_or(0);
        let max_dy = self.offsets.iter().map(|o| o.1).max().unwrap_or(0);
        (min_dx, min_dy, max_dx - min_dx + 1, max_dy - min_dy + 1)
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> ShapeColor {
    ShapeColor { r, g, b }
}

static SHAPES: [Shape; 8] = [
    Shape {
        id: ShapeId::I,
        offsets: &[(-2, 0), (-1, 0), (0, 0), (1, 0)],
        color: rgb(80, 220, 220),
        rotates: true,
    },
    Shape {
        id: ShapeId::O,
        offsets: &[(0, 0), (1, 0), (0, 1), (1, 1)],
        color: rgb(240, 220, 80),
        rotates: false,
    },
    Shape {
        id: ShapeId::T,
        offsets: &[(-1, 0), (0, 0), (1, 0), (0, 1)],
        color: rgb(200, 120, 220),
        rotates: true,
    },
    Shape {
        id: ShapeId::S,
        offsets: &[(-1, 0), (0, 0), (0, 1), (1, 1)],
        color: rgb(100, 220, 120),
        rotates: true,
    },
    Shape {
        id: ShapeId::Z,
        offsets: &[(-1, 1), (0, 1), (0, 0), (1, 0)],
        color: rgb(220, 80, 80),
        rotates: true,
    },
    Shape {
        id: ShapeId::J,
        offsets: &[(-1, 1), (-1, 0), (0, 0), (1, 0)],
        color: rgb(80, 120, 220),
        rotates: true,
    },
    Shape {
        id: ShapeId::L,
        offsets: &[(-1, 0), (0, 0), (1, 0), (1, 1)],
        color: rgb(255, 165, 0),
        rotates: true,
    },
    Shape {
        id: ShapeId::Dot,
        offsets: &[(0, 0)],
        color: rgb(230, 230, 230),
        rotates: false,
    },
];

/// Look up the static shape for an id.
pub fn get_shape(id: ShapeId) -> &'static Shape {
    &SHAPES[id.index()]
}

/// Shape whose grid color is `color`, if any.
pub fn shape_for_color(color: ColorId) -> Option<&'static Shape> {
    SHAPES.get(color.0 as usize)
}

/// Rotate an offset clockwise by the given orientation.
///
/// One quarter turn maps `(dx, dy)` to `(dy, -dx)` (y up).
#[inline]
pub fn rotate(offset: Offset, orientation: Orientation) -> Offset {
    let (dx, dy) = offset;
    match orientation.quarter_turns() {
        0 => (dx, dy),
        1 => (dy, -dx),
        2 => (-dx, -dy),
        _ => (-dy, dx),
    }
}

/// Offsets of `shape` in `orientation`, honoring non-rotating shapes.
pub fn oriented_offsets(shape: &Shape, orientation: Orientation) -> impl Iterator<Item = Offset> + '_ {
    let orientation = if shape.rotates {
        orientation
    } else {
        Orientation::SPAWN
    };
    shape.offsets.iter().map(move |&o| rotate(o, orientation))
}
