//! Line clearer - removes completed rows and compacts the stack
//!
//! Completed rows are collected first, then cleared from the lowest index up.
//! Each removal shifts everything above it down by one, so a collected index
//! is adjusted by the number of rows already removed beneath it.

use crate::grid::Grid;

/// Indices of all full rows, ascending (floor first).
pub fn completed_rows(grid: &Grid) -> Vec<u16> {
    (0..grid.height()).filter(|&row| grid.is_row_full(row)).collect()
}

/// Clear the given rows (ascending, as returned by [`completed_rows`]) and
/// shift the stack down over each of them.
pub fn clear_rows(grid: &mut Grid, rows: &[u16]) {
    debug_assert!(rows.windows(2).all(|w| w[0] < w[1]), "rows must be ascending");
    for (removed, &row) in rows.iter().enumerate() {
        let row = row - removed as u16;
        grid.clear_row(row);
        grid.shift_rows_down(row);
    }
}

/// Clear every completed row and return how many were removed.
pub fn clear_completed_rows(grid: &mut Grid) -> usize {
    let rows = completed_rows(grid);
    clear_rows(grid, &rows);
    rows.len()
}
