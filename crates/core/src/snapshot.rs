//! Read-only views of boards and matches for renderers and observers

use arrayvec::ArrayVec;

use crate::board::BoardId;
use crate::controller::MatchMode;
use crate::grid::{Row, EMPTY_ROW};
use crate::pieces::Piece;
use crate::types::{BoardStatus, Cell, PieceKind, BASE_DROP_MS, GRID_COLS, GRID_ROWS};

/// Copy of one board's visible state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub id: BoardId,
    pub grid: [Row; GRID_ROWS],
    pub active: Option<Piece>,
    pub next: Option<PieceKind>,
    pub status: BoardStatus,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub pending_garbage: u32,
    pub has_opponent: bool,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.id = BoardId(0);
        self.grid = [EMPTY_ROW; GRID_ROWS];
        self.active = None;
        self.next = None;
        self.status = BoardStatus::Idle;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.pending_garbage = 0;
        self.has_opponent = false;
    }

    /// Cell as displayed: the active piece drawn over the locked grid
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        if col >= GRID_COLS || row >= GRID_ROWS {
            return None;
        }
        if let Some(piece) = &self.active {
            if piece
                .cells()
                .any(|(c, r)| c == col as i32 && r == row as i32)
            {
                return Some(piece.color);
            }
        }
        self.grid[row][col]
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        let mut s = Self {
            id: BoardId(0),
            grid: [EMPTY_ROW; GRID_ROWS],
            active: None,
            next: None,
            status: BoardStatus::Idle,
            score: 0,
            lines: 0,
            level: 0,
            drop_interval_ms: BASE_DROP_MS,
            pending_garbage: 0,
            has_opponent: false,
        };
        s.clear();
        s
    }
}

/// Copy of every board in a match plus the shared pause flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub mode: MatchMode,
    pub paused: bool,
    pub boards: ArrayVec<BoardSnapshot, 2>,
}

impl MatchSnapshot {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            paused: false,
            boards: ArrayVec::new(),
        }
    }

    pub fn board(&self, id: BoardId) -> Option<&BoardSnapshot> {
        self.boards.get(id.0)
    }

    pub fn is_over(&self) -> bool {
        self.boards.iter().any(BoardSnapshot::is_over)
    }

    /// Neither paused nor finished
    pub fn playable(&self) -> bool {
        !self.paused && !self.is_over()
    }
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        Self::new(MatchMode::Solo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_cell_overlays_active_piece() {
        let mut s = BoardSnapshot::default();
        s.grid[19][0] = Some(Color::RED);
        s.active = Some(Piece::spawn(PieceKind::O));

        assert_eq!(s.cell(0, 19), Some(Color::RED));
        assert_eq!(s.cell(4, 0), Some(Color::YELLOW));
        assert_eq!(s.cell(5, 1), Some(Color::YELLOW));
        assert_eq!(s.cell(6, 0), None);
        assert_eq!(s.cell(10, 0), None);
    }

    #[test]
    fn test_match_snapshot_is_over() {
        let mut m = MatchSnapshot::new(MatchMode::Versus);
        m.boards.push(BoardSnapshot::default());
        m.boards.push(BoardSnapshot::default());
        assert!(m.playable());

        m.boards[1].status = BoardStatus::Lost;
        assert!(m.is_over());
        assert!(!m.playable());
    }
}
