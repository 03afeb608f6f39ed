//! Garbage module - queued attack lines
//!
//! Attacks are only counted when they arrive; the rows are inserted when the
//! receiving board next processes its queue (right after its own lock and
//! line clear, before the next spawn).

use rand::Rng;
use tracing::debug;

use crate::grid::{Grid, Row};
use crate::pieces::Piece;
use crate::types::{Color, GRID_COLS};

/// Pending incoming garbage for one board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GarbageQueue {
    pending: u32,
}

impl GarbageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `lines` more garbage lines. No cap.
    pub fn add(&mut self, lines: u32) {
        self.pending = self.pending.saturating_add(lines);
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Take the whole pending count, leaving zero
    pub fn take(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending = 0;
    }
}

/// A full garbage row with a single empty cell at `hole`
pub fn garbage_row(hole: usize) -> Row {
    let mut row = [Some(Color::GARBAGE); GRID_COLS];
    if let Some(cell) = row.get_mut(hole) {
        *cell = None;
    }
    row
}

/// Insert `lines` identical garbage rows at the bottom of the grid.
///
/// Each insertion discards the grid's topmost row. The hole column is drawn
/// once per batch. If `active` now collides it is nudged up by one row (once).
/// Returns the hole column, or `None` when nothing was inserted.
pub fn apply_garbage<R: Rng + ?Sized>(
    grid: &mut Grid,
    active: Option<&mut Piece>,
    lines: u32,
    rng: &mut R,
) -> Option<usize> {
    if lines == 0 {
        return None;
    }

    let hole = rng.gen_range(0..GRID_COLS);
    let row = garbage_row(hole);
    for _ in 0..lines {
        grid.push_bottom(row);
    }
    debug!(lines, hole, "garbage inserted");

    if let Some(piece) = active {
        if !grid.is_valid_position(piece) {
            *piece = piece.shifted(0, -1);
        }
    }

    Some(hole)
}
