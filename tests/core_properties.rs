//! Property tests for collision, rotation and line clearing.

use proptest::prelude::*;

use blockfall::core::{clear_completed_rows, collides, completed_rows, Grid, Piece};
use blockfall::types::{Cell, ColorId, Orientation, ShapeId};

fn shape() -> impl Strategy<Value = ShapeId> {
    prop::sample::select(ShapeId::ALL.to_vec())
}

/// Grid of random size with roughly `density` of its cells filled.
fn grid(density: f64) -> impl Strategy<Value = Grid> {
    (4u16..=12, 4u16..=24).prop_flat_map(move |(w, h)| {
        prop::collection::vec(prop::bool::weighted(density), w as usize * h as usize).prop_map(
            move |bits| {
                let mut grid = Grid::new(w, h);
                for (i, filled) in bits.into_iter().enumerate() {
                    if filled {
                        let cell = Cell::new((i % w as usize) as i16, (i / w as usize) as i16);
                        grid.set(cell, Some(ColorId(0)));
                    }
                }
                grid
            },
        )
    })
}

fn naive_collides(grid: &Grid, piece: &Piece) -> bool {
    let (w, h) = (grid.width() as i16, grid.height() as i16);
    piece.occupied_cells().iter().any(|c| {
        c.col < 0
            || c.col >= w
            || c.row < 0
            || c.row >= h
            || grid.cells()[c.row as usize * w as usize + c.col as usize].is_some()
    })
}

proptest! {
    #[test]
    fn collision_matches_naive_reference(
        grid in grid(0.3),
        shape in shape(),
        turns in 0u8..4,
        col in -4i16..16,
        row in -4i16..28,
    ) {
        let piece = Piece::new(shape, Orientation::new(turns), Cell::new(col, row));
        prop_assert_eq!(collides(&grid, &piece), naive_collides(&grid, &piece));
    }

    #[test]
    fn four_rotations_are_identity(
        shape in shape(),
        turns in 0u8..4,
        col in -50i16..50,
        row in -50i16..50,
    ) {
        let piece = Piece::new(shape, Orientation::new(turns), Cell::new(col, row));
        prop_assert_eq!(piece.rotated().rotated().rotated().rotated(), piece);
    }

    #[test]
    fn clearing_preserves_stack_order(grid in grid(0.8)) {
        // Make some rows full so clears actually happen.
        let mut grid = grid;
        for row in (0..grid.height()).step_by(3) {
            for col in 0..grid.width() as i16 {
                grid.set(Cell::new(col, row as i16), Some(ColorId(1)));
            }
        }

        let full = completed_rows(&grid);
        let before = grid.to_ascii();
        let height = before.len();
        // Text rows are top-first; grid row r is text index height-1-r.
        let mut expected: Vec<String> = before
            .iter()
            .enumerate()
            .filter(|(i, _)| !full.contains(&((height - 1 - i) as u16)))
            .map(|(_, r)| r.clone())
            .collect();
        let blank = ".".repeat(grid.width() as usize);
        while expected.len() < height {
            expected.insert(0, blank.clone());
        }

        let cleared = clear_completed_rows(&mut grid);
        prop_assert_eq!(cleared, full.len());
        prop_assert_eq!(grid.to_ascii(), expected);
        prop_assert!(completed_rows(&grid).is_empty());
    }
}
