//! Pieces module - tetromino catalog and matrix rotation
//!
//! Every piece is a small square occupancy matrix (side 2 for O, 4 for I,
//! 3 otherwise) anchored at a board-relative (x, y). Rotation is a plain
//! matrix transform; wall kicks are horizontal only.

use crate::types::{Color, PieceKind, KICK_OFFSETS, SPAWN_COL, SPAWN_ROW};

/// Largest matrix side used by the catalog (the I piece).
pub const MAX_SHAPE_SIDE: usize = 4;

/// Square occupancy matrix. Only the top-left `side x side` block is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    side: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from rows of 0/1 occupancy.
    ///
    /// Rows must be square; the side is taken from the number of rows.
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            side: N as u8,
            cells,
        }
    }

    pub fn side(&self) -> usize {
        self.side as usize
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.side() && col < self.side() && self.cells[row][col]
    }

    /// Occupied cells as (col, row) offsets from the anchor.
    pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let side = self.side();
        (0..side).flat_map(move |r| {
            (0..side).filter_map(move |c| self.cells[r][c].then_some((c as i32, r as i32)))
        })
    }

    /// 90° clockwise: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let n = self.side();
        let mut transposed = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (y, row) in self.cells.iter().enumerate().take(n) {
            for (x, &filled) in row.iter().enumerate().take(n) {
                transposed[x][y] = filled;
            }
        }
        for row in transposed.iter_mut().take(n) {
            row[..n].reverse();
        }
        Self {
            side: self.side,
            cells: transposed,
        }
    }
}

/// Spawn-orientation shape for a piece kind.
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

const I_SHAPE: Shape = Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: Shape = Shape::from_rows([[1, 1], [1, 1]]);
const T_SHAPE: Shape = Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
const S_SHAPE: Shape = Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]);
const Z_SHAPE: Shape = Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]);
const J_SHAPE: Shape = Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]);
const L_SHAPE: Shape = Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]);

/// A piece value: shape, color, kind and anchor.
///
/// Pieces are immutable; moves and rotations produce candidates that the
/// caller validates before replacing the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    /// Anchor column of the shape's top-left corner.
    pub x: i32,
    /// Anchor row of the shape's top-left corner (may be negative).
    pub y: i32,
}

impl Piece {
    /// Create a piece at the spawn anchor in its catalog orientation
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            color: kind.color(),
            x: SPAWN_COL,
            y: SPAWN_ROW,
        }
    }

    /// Absolute (col, row) of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .offsets()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

/// Try to rotate a piece clockwise with horizontal kicks
///
/// The square piece never rotates. Otherwise the rotated shape is tried at
/// each offset of [`KICK_OFFSETS`] in order; the first valid candidate wins.
/// Returns `None` when every kick collides.
pub fn try_rotate(piece: &Piece, is_valid: impl Fn(&Piece) -> bool) -> Option<Piece> {
    if piece.kind == PieceKind::O {
        return None;
    }

    let rotated = piece.rotated();
    KICK_OFFSETS
        .iter()
        .map(|&dx| rotated.shifted(dx, 0))
        .find(|candidate| is_valid(candidate))
}
