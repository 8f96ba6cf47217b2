//! Collision engine - the single predicate every move, rotation and fall uses
//!
//! Bounds and occupancy come from one lookup ([`Grid::occupant`]): an
//! out-of-bounds cell is an `Err`, an occupied one is `Ok(Some(_))`.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::Cell;

/// What stopped a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    /// Column left of 0 or right of the last column.
    Wall,
    /// Row below 0.
    Floor,
    /// Row at or above the grid height.
    Ceiling,
    /// An occupied cell of the stack.
    Stack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub cell: Cell,
    pub blocker: Blocker,
}

/// First cell of `piece` that is off-grid or occupied, in shape order.
pub fn first_collision(grid: &Grid, piece: &Piece) -> Option<Collision> {
    piece.occupied_cells().into_iter().find_map(|cell| match grid.occupant(cell) {
        Ok(None) => None,
        Ok(Some(_)) => Some(Collision {
            cell,
            blocker: Blocker::Stack,
        }),
        Err(_) => Some(Collision {
            cell,
            blocker: classify_bounds(grid, cell),
        }),
    })
}

/// True iff any cell of `piece` is out of bounds or occupied.
#[inline]
pub fn collides(grid: &Grid, piece: &Piece) -> bool {
    first_collision(grid, piece).is_some()
}

fn classify_bounds(grid: &Grid, cell: Cell) -> Blocker {
    if cell.row < 0 {
        Blocker::Floor
    } else if cell.row as i32 >= grid.height() as i32 {
        Blocker::Ceiling
    } else {
        Blocker::Wall
    }
}

/// How many rows `piece` can fall before it would collide.
pub fn drop_distance(grid: &Grid, piece: &Piece) -> i16 {
    let mut distance = 0;
    while !collides(grid, &piece.translated(0, -(distance + 1))) {
        distance += 1;
    }
    distance
}
