//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, score reporting).
//!
//! # Grid Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, row 0 is the topmost spawn row)
//! - **Spawn anchor**: column 4, row 0 for every piece
//!
//! # Timing and Difficulty
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame cadence (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Automatic descent interval at level 0 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `MIN_DROP_MS` | 100 | Interval floor |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines per level |
//!
//! # Examples
//!
//! ```
//! use tetris_duel_types::{GameAction, PieceKind, GRID_COLS, GRID_ROWS};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! assert_eq!(GRID_COLS, 10);
//! assert_eq!(GRID_ROWS, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_COLS: usize = 10;

/// Grid height in cells (20 rows)
pub const GRID_ROWS: usize = 20;

/// Spawn anchor column for new pieces
pub const SPAWN_COL: i32 = 4;

/// Spawn anchor row for new pieces
pub const SPAWN_ROW: i32 = 0;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Automatic descent interval at level 0 (1000ms = 1 row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Descent interval reduction per level
pub const DROP_STEP_MS: u32 = 100;

/// Fastest automatic descent interval
pub const MIN_DROP_MS: u32 = 100;

/// Number of cleared lines per difficulty level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared line, before the quadratic multi-line factor
pub const LINE_SCORE_UNIT: u32 = 10;

/// Line goal for the solo "clear N lines" mode
pub const DEFAULT_LINE_GOAL: u32 = 100;

/// Horizontal offsets tried, in order, after a rotation
pub const KICK_OFFSETS: [i32; 5] = [0, 1, -1, 2, -2];

/// Maximum number of entries returned by the leaderboard
pub const LEADERBOARD_SIZE: usize = 10;


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Canonical catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_duel_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Color token locked into the grid by this piece.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::CYAN,
            PieceKind::O => Color::YELLOW,
            PieceKind::T => Color::PURPLE,
            PieceKind::S => Color::GREEN,
            PieceKind::Z => Color::RED,
            PieceKind::J => Color::BLUE,
            PieceKind::L => Color::ORANGE,
        }
    }
}

/// Opaque color token stored in grid cells (0xRRGGBB).
///
/// The engine only compares tokens; [`Color::GARBAGE`] is the one token with
/// gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const CYAN: Color = Color(0x00FFFF);
    pub const YELLOW: Color = Color(0xFFFF00);
    pub const PURPLE: Color = Color(0x800080);
    pub const GREEN: Color = Color(0x00FF00);
    pub const RED: Color = Color(0xFF0000);
    pub const BLUE: Color = Color(0x0000FF);
    pub const ORANGE: Color = Color(0xFFA500);
    /// Marks rows inserted by an opponent attack.
    pub const GARBAGE: Color = Color(0x808080);

    /// Split into (r, g, b) channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }

    pub fn is_garbage(&self) -> bool {
        *self == Color::GARBAGE
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Locked block of the given color
pub type Cell = Option<Color>;

/// Game actions that can be applied to a match
///
/// Input layers map keys to these; the engine never sees raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise (with horizontal kicks)
    Rotate,
    /// Move piece one cell down, locking it if it cannot descend
    Drop,
    /// Toggle the match-wide pause flag
    Pause,
    /// Restart every board of the match
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_duel_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("DROP"), Some(GameAction::Drop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "drop" => Some(GameAction::Drop),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::Drop => "drop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Lifecycle state of one board.
///
/// `Won` and `Lost` are terminal: the board stays frozen until restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoardStatus {
    /// Created but not started yet.
    #[default]
    Idle,
    /// A piece is falling (spawn/lock cycles happen inside this state).
    Playing,
    /// Line goal reached, or the opponent topped out.
    Won,
    /// Spawn collided, or the opponent reached the line goal.
    Lost,
}

impl BoardStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BoardStatus::Won | BoardStatus::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardStatus::Idle => "idle",
            BoardStatus::Playing => "playing",
            BoardStatus::Won => "won",
            BoardStatus::Lost => "lost",
        }
    }
}

/// Seat of a player in a match. Solo matches only use `One`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn index(&self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}
