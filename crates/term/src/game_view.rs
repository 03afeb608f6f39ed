//! GameView: maps a `MatchSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Boards are laid out left to right in registry order, each followed by its
//! panel (score, lines, level, next piece, incoming garbage) when the
//! viewport is wide enough.

use crate::core::{BoardSnapshot, MatchMode, MatchSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BoardStatus, PieceKind, GRID_COLS, GRID_ROWS};

/// Panel width in terminal columns, including its left margin.
const PANEL_W: u16 = 14;
/// Gap between two board blocks.
const BLOCK_GAP: u16 = 2;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for one or two boards.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            GRID_COLS as u16 * self.cell_w + 2,
            GRID_ROWS as u16 * self.cell_h + 2,
        )
    }

    /// Render the match into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &MatchSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let count = snap.boards.len().max(1) as u16;
        let gaps = BLOCK_GAP * (count - 1);

        let with_panel = count * (frame_w + PANEL_W) + gaps <= viewport.width;
        let block_w = if with_panel { frame_w + PANEL_W } else { frame_w };
        let total_w = count * block_w + gaps;

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        for (i, board) in snap.boards.iter().enumerate() {
            let x = start_x + i as u16 * (block_w + BLOCK_GAP);
            self.draw_board(fb, board, x, start_y);
            if with_panel {
                self.draw_panel(fb, snap.mode, board, viewport, x + frame_w + 2, start_y);
            }

            let overlay = if snap.paused {
                Some("PAUSED")
            } else {
                match board.status {
                    BoardStatus::Won => Some("YOU WIN"),
                    BoardStatus::Lost => Some("GAME OVER"),
                    _ => None,
                }
            };
            if let Some(text) = overlay {
                self.draw_overlay_text(fb, x, start_y, frame_w, frame_h, text);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &MatchSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, board: &BoardSnapshot, start_x: u16, start_y: u16) {
        let (frame_w, frame_h) = self.frame_size();
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..GRID_ROWS {
            for x in 0..GRID_COLS {
                let (cx, cy) = (x as u16, y as u16);
                match board.cell(x, y) {
                    Some(color) if color.is_garbage() => {
                        let style = CellStyle::new(color.into(), PLAY_BG);
                        self.fill_cell_rect(fb, start_x, start_y, cx, cy, '▓', style);
                    }
                    Some(color) => {
                        let style = CellStyle::new(color.into(), PLAY_BG).bold();
                        self.fill_cell_rect(fb, start_x, start_y, cx, cy, '█', style);
                    }
                    None => {
                        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
                        self.fill_cell_rect(fb, start_x, start_y, cx, cy, '·', style);
                    }
                }
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        mode: MatchMode,
        board: &BoardSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        let mut y = start_y;

        if mode == MatchMode::Versus {
            let title = if board.id.0 == 0 { "PLAYER 1" } else { "PLAYER 2" };
            fb.put_str(panel_x, y, title, label);
            y = y.saturating_add(2);
        }

        for (name, n) in [
            ("SCORE", board.score),
            ("LINES", board.lines),
            ("LEVEL", board.level),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, n, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, board.next.map(piece_letter).unwrap_or("-"), value);
        y = y.saturating_add(2);

        if board.has_opponent {
            fb.put_str(panel_x, y, "INCOMING", label);
            y = y.saturating_add(1);
            let style = if board.pending_garbage > 0 {
                CellStyle::new(Rgb::new(230, 90, 90), BLACK).bold()
            } else {
                value.dim()
            };
            fb.put_u32(panel_x, y, board.pending_garbage, style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        fb.put_str_centered(start_x, mid_y, frame_w, text, style);
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}
