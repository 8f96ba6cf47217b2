//! Grid module - the playfield occupancy model
//!
//! The grid is a `width x height` field where each cell is either empty or
//! holds the color of a locked block. Storage is a flat row-major vector
//! (`row * width + col`) so occupancy lookups are O(1) and whole rows can be
//! moved with `copy_within`.
//!
//! Coordinates: `col` ranges `0..width` left to right, `row` ranges
//! `0..height` with **row 0 at the floor**. Dimensions are fixed at
//! construction and never change for the life of the grid.

use crate::error::{GridError, PlacementFault};
use crate::types::{Cell, ColorId};

/// Contents of one grid cell.
pub type Occupant = Option<ColorId>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major, row 0 first
    cells: Vec<Occupant>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Dimension limits are enforced by [`crate::GameConfig::validate`];
    /// callers building a grid directly are expected to pass sane sizes.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.is_in_bounds(cell) {
            return None;
        }
        Some(cell.row as usize * self.width as usize + cell.col as usize)
    }

    #[inline]
    fn row_range(&self, row: u16) -> std::ops::Range<usize> {
        let start = row as usize * self.width as usize;
        start..start + self.width as usize
    }

    /// True iff `col ∈ [0, width)` and `row ∈ [0, height)`.
    #[inline]
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0
            && (cell.col as i32) < self.width as i32
            && cell.row >= 0
            && (cell.row as i32) < self.height as i32
    }

    /// Contents of an in-bounds cell.
    pub fn occupant(&self, cell: Cell) -> Result<Occupant, GridError> {
        self.index(cell)
            .map(|idx| self.cells[idx])
            .ok_or(GridError::OutOfBounds { cell })
    }

    /// Whether an in-bounds cell holds a block.
    pub fn is_occupied(&self, cell: Cell) -> Result<bool, GridError> {
        self.occupant(cell).map(|occ| occ.is_some())
    }

    /// Overwrite a single cell. Returns false if out of bounds.
    ///
    /// This bypasses the placement checks and exists for setting up boards
    /// (tests, puzzles). Gameplay writes go through [`Grid::place`].
    pub fn set(&mut self, cell: Cell, occupant: Occupant) -> bool {
        match self.index(cell) {
            Some(idx) => {
                self.cells[idx] = occupant;
                true
            }
            None => false,
        }
    }

    /// Mark every cell in `cells` as occupied by `color`.
    ///
    /// All cells are validated before any is written, so a refused placement
    /// leaves the grid untouched. Duplicate cells in the input count as
    /// already occupied.
    pub fn place(&mut self, cells: &[Cell], color: ColorId) -> Result<(), GridError> {
        for (i, &cell) in cells.iter().enumerate() {
            let occupied = self.is_occupied(cell).map_err(|_| GridError::InvalidPlacement {
                cell,
                reason: PlacementFault::OutOfBounds,
            })?;
            if occupied || cells[..i].contains(&cell) {
                return Err(GridError::InvalidPlacement {
                    cell,
                    reason: PlacementFault::Occupied,
                });
            }
        }

        for &cell in cells {
            self.set(cell, Some(color));
        }
        Ok(())
    }

    /// True iff every cell in `row` is occupied. Out-of-range rows are never full.
    pub fn is_row_full(&self, row: u16) -> bool {
        if row >= self.height {
            return false;
        }
        self.cells[self.row_range(row)].iter().all(|c| c.is_some())
    }

    /// True iff no cell in `row` is occupied.
    pub fn is_row_empty(&self, row: u16) -> bool {
        if row >= self.height {
            return true;
        }
        self.cells[self.row_range(row)].iter().all(|c| c.is_none())
    }

    /// Set every cell in `row` to empty.
    pub fn clear_row(&mut self, row: u16) {
        debug_assert!(row < self.height, "clear_row({row}) outside grid");
        if row >= self.height {
            return;
        }
        let range = self.row_range(row);
        self.cells[range].fill(None);
    }

    /// Move every row above `below_row` down by one; the top row becomes empty.
    ///
    /// Row `below_row` itself is overwritten by the row above it. Rows under
    /// `below_row` are untouched.
    pub fn shift_rows_down(&mut self, below_row: u16) {
        debug_assert!(below_row < self.height, "shift_rows_down({below_row}) outside grid");
        if below_row >= self.height {
            return;
        }

        let width = self.width as usize;
        let src_start = (below_row as usize + 1) * width;
        let src_end = self.cells.len();
        // copy_within handles the overlapping ranges
        self.cells.copy_within(src_start..src_end, below_row as usize * width);

        let top = self.row_range(self.height - 1);
        self.cells[top].fill(None);
    }

    /// A single row as a slice, `col` ascending.
    pub fn row(&self, row: u16) -> &[Occupant] {
        &self.cells[self.row_range(row)]
    }

    /// Raw row-major storage, row 0 first.
    pub fn cells(&self) -> &[Occupant] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Height of the stack: one past the highest non-empty row.
    pub fn stack_height(&self) -> u16 {
        (0..self.height)
            .rev()
            .find(|&row| !self.is_row_empty(row))
            .map_or(0, |row| row + 1)
    }

    /// Empty every cell. Dimensions are kept.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from text rows, **top row first** (as it reads on screen).
    ///
    /// `.` is empty, any other character is a block of color 0. Meant for test
    /// and puzzle fixtures written as literals.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u16;
        let mut grid = Self::new(width, height);
        for (i, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), width as usize, "ragged row {i}");
            let row = (height as usize - 1 - i) as i16;
            for (col, ch) in line.chars().enumerate() {
                if ch != '.' {
                    grid.set(Cell::new(col as i16, row), Some(ColorId(0)));
                }
            }
        }
        grid
    }

    /// Render as text rows, top row first (`#` occupied, `.` empty).
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|row| {
                self.row(row)
                    .iter()
                    .map(|c| if c.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}
