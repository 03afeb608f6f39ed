//! Grid module - the locked-cell matrix
//!
//! The grid is a fixed 10x20 matrix of color tokens. Row 0 is the top (spawn)
//! row. Rows are stored contiguously so row removal and insertion are a single
//! `copy_within` without allocation.
//!
//! Cells above row 0 do not exist: pieces may overhang the top edge while
//! spawning and those cells are treated as always clear.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, Color, GRID_COLS, GRID_ROWS};

/// One grid row
pub type Row = [Cell; GRID_COLS];

/// Empty row constant
pub const EMPTY_ROW: Row = [None; GRID_COLS];

/// Locked-cell matrix, 10 columns x 20 rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; GRID_ROWS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; GRID_ROWS],
        }
    }

    pub fn cols(&self) -> usize {
        GRID_COLS
    }

    pub fn rows(&self) -> usize {
        GRID_ROWS
    }

    #[inline(always)]
    fn in_bounds(col: i32, row: i32) -> bool {
        col >= 0 && (col as usize) < GRID_COLS && row >= 0 && (row as usize) < GRID_ROWS
    }

    /// Get cell at (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        if !Self::in_bounds(col, row) {
            return None;
        }
        Some(self.rows[row as usize][col as usize])
    }

    /// Set cell at (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        if !Self::in_bounds(col, row) {
            return false;
        }
        self.rows[row as usize][col as usize] = cell;
        true
    }

    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Check whether a piece fits.
    ///
    /// Fails if any occupied cell lies outside `[0, COLS)` horizontally, at or
    /// below the bottom edge, or on an occupied on-board cell. Cells above the
    /// top edge (negative rows) never collide.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().all(|(col, row)| {
            if col < 0 || col as usize >= GRID_COLS || row >= GRID_ROWS as i32 {
                return false;
            }
            row < 0 || !self.is_occupied(col, row)
        })
    }

    /// Write the piece's color into every occupied on-board cell.
    ///
    /// Cells above the top edge are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        for (col, row) in piece.cells() {
            if row >= 0 {
                self.set(col, row, Some(piece.color));
            }
        }
    }

    /// A row clears only when every cell is filled with a non-garbage color.
    pub fn is_row_clearable(&self, row: usize) -> bool {
        if row >= GRID_ROWS {
            return false;
        }
        self.rows[row]
            .iter()
            .all(|cell| matches!(cell, Some(color) if !color.is_garbage()))
    }

    /// Remove a row, shift everything above it down, empty the top row.
    pub fn remove_row(&mut self, row: usize) {
        if row >= GRID_ROWS {
            return;
        }
        self.rows.copy_within(0..row, 1);
        self.rows[0] = EMPTY_ROW;
    }

    /// Clear every clearable row, scanning bottom to top.
    ///
    /// After a removal the same index is examined again, since the row above
    /// has shifted into it. Returns the indices at which rows were removed,
    /// in removal order.
    pub fn clear_lines(&mut self) -> ArrayVec<u8, GRID_ROWS> {
        let mut cleared = ArrayVec::new();
        let mut row = GRID_ROWS;
        while row > 0 {
            let y = row - 1;
            if self.is_row_clearable(y) {
                self.remove_row(y);
                cleared.push(y as u8);
            } else {
                row -= 1;
            }
        }
        cleared
    }

    /// Drop the topmost row, shift everything up, append `bottom`.
    pub fn push_bottom(&mut self, bottom: Row) {
        self.rows.copy_within(1.., 0);
        self.rows[GRID_ROWS - 1] = bottom;
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// All rows, top to bottom
    pub fn as_rows(&self) -> &[Row; GRID_ROWS] {
        &self.rows
    }

    /// Number of cells holding the garbage token
    pub fn garbage_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(Color::GARBAGE))
            .count()
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.rows = [EMPTY_ROW; GRID_ROWS];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
