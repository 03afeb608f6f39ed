//! Board module - one player's session
//!
//! Ties together the grid, active piece, bag, garbage queue, scoring and drop
//! clock. Everything here is synchronous: a call either changes state and
//! returns what happened, or is a no-op.
//!
//! Lock cycle (inside [`Board::drop`] when the piece cannot descend):
//! lock → clear lines and score → process own pending garbage → spawn.
//! A spawn that collides immediately loses the board.
//!
//! Boards never reference each other. A versus opponent is recorded as a
//! [`BoardId`] and garbage is routed by the owning
//! [`Match`](crate::controller::Match).

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::bag::Bag;
use crate::drop_clock::DropClock;
use crate::garbage::{apply_garbage, GarbageQueue};
use crate::grid::Grid;
use crate::pieces::{try_rotate, Piece};
use crate::scoring::{calculate_level, calculate_score, get_drop_interval_ms};
use crate::snapshot::BoardSnapshot;
use crate::types::{BoardStatus, PieceKind, PlayerSlot, BASE_DROP_MS};

/// Seed offset separating a board's garbage-hole stream from its bag stream.
const HOLE_SEED_SALT: u64 = 0x5DEE_CE66_D1CE_4E5B;

/// Index of a board inside its match registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardId(pub usize);

impl From<PlayerSlot> for BoardId {
    fn from(slot: PlayerSlot) -> Self {
        BoardId(slot.index())
    }
}

/// Per-board settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardConfig {
    /// Seed for the bag and garbage holes. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Total lines that win the game. `None` plays until topping out.
    pub line_goal: Option<u32>,
}

/// What a single lock produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    /// Garbage lines to deliver to the linked opponent.
    pub garbage_sent: u32,
    /// Pending garbage lines inserted into this board during the cycle.
    pub garbage_received: u32,
    /// Board status once the cycle finished.
    pub status: BoardStatus,
}

/// Outcome of a successful drop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResult {
    /// The piece moved down one row.
    Moved,
    /// The piece could not descend and was locked.
    Locked(LockEvent),
}

/// One player's game session
#[derive(Debug, Clone)]
pub struct Board {
    id: BoardId,
    config: BoardConfig,
    grid: Grid,
    active: Option<Piece>,
    bag: Bag,
    hole_rng: StdRng,
    garbage: GarbageQueue,
    clock: DropClock,
    opponent: Option<BoardId>,
    status: BoardStatus,
    score: u32,
    lines: u32,
    drop_interval_ms: u32,
    pieces_spawned: u32,
}

impl Board {
    /// Create an idle board; call [`Board::start`] to play
    pub fn new(id: BoardId, config: BoardConfig) -> Self {
        let (bag, hole_rng) = match config.seed {
            Some(seed) => (
                Bag::from_seed(seed),
                StdRng::seed_from_u64(seed ^ HOLE_SEED_SALT),
            ),
            None => (Bag::from_entropy(), StdRng::from_entropy()),
        };

        Self {
            id,
            config,
            grid: Grid::new(),
            active: None,
            bag,
            hole_rng,
            garbage: GarbageQueue::new(),
            clock: DropClock::new(),
            opponent: None,
            status: BoardStatus::Idle,
            score: 0,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
            pieces_spawned: 0,
        }
    }

    /// Reset grid, counters, bag and clock, then spawn the first piece
    pub fn start(&mut self) {
        self.grid.clear();
        self.active = None;
        self.bag.reset();
        self.garbage.clear();
        self.clock.reset();
        self.score = 0;
        self.lines = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.pieces_spawned = 0;
        self.status = BoardStatus::Playing;
        self.spawn_piece();
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn pending_garbage(&self) -> u32 {
        self.garbage.pending()
    }

    pub fn opponent(&self) -> Option<BoardId> {
        self.opponent
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn last_drop_ms(&self) -> Option<u64> {
        self.clock.last_drop_ms()
    }

    /// Upcoming piece, when the current bag still holds one
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.bag.peek()
    }

    pub fn is_playing(&self) -> bool {
        self.status == BoardStatus::Playing && self.active.is_some()
    }

    /// Record (or clear) the opponent that receives this board's garbage
    pub fn set_opponent(&mut self, opponent: Option<BoardId>) {
        self.opponent = opponent;
    }

    /// Spawn the next piece from the bag
    ///
    /// Returns false (and loses the board) if the spawn position collides.
    fn spawn_piece(&mut self) -> bool {
        let piece = Piece::spawn(self.bag.next());
        if !self.grid.is_valid_position(&piece) {
            self.active = None;
            self.status = BoardStatus::Lost;
            info!(board = self.id.0, score = self.score, "spawn blocked, board lost");
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.status != BoardStatus::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.shifted(dx, dy);
        if self.grid.is_valid_position(&candidate) {
            self.active = Some(candidate);
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Rotate clockwise with horizontal kicks; the O piece never rotates
    pub fn rotate(&mut self) -> bool {
        if self.status != BoardStatus::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&active, |p| self.grid.is_valid_position(p)) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Move the active piece down one row, locking it if it cannot descend
    ///
    /// Returns `None` when there is nothing to drop (idle, terminal, or no
    /// active piece).
    pub fn drop(&mut self) -> Option<DropResult> {
        if self.status != BoardStatus::Playing {
            return None;
        }
        let active = self.active?;

        let candidate = active.shifted(0, 1);
        if self.grid.is_valid_position(&candidate) {
            self.active = Some(candidate);
            return Some(DropResult::Moved);
        }

        Some(DropResult::Locked(self.lock_piece(active)))
    }

    /// Lock `piece`, clear and score, take pending garbage, spawn the next piece
    fn lock_piece(&mut self, piece: Piece) -> LockEvent {
        self.grid.lock(&piece);
        self.active = None;

        let cleared = self.grid.clear_lines().len() as u32;
        let result = calculate_score(cleared);
        let mut garbage_sent = 0;

        if cleared > 0 {
            self.score = self.score.saturating_add(result.points);
            self.lines = self.lines.saturating_add(cleared);
            if self.opponent.is_some() {
                garbage_sent = result.garbage;
            }
            self.drop_interval_ms = get_drop_interval_ms(self.lines);
            debug!(
                board = self.id.0,
                cleared,
                score = self.score,
                lines = self.lines,
                interval_ms = self.drop_interval_ms,
                "lines cleared"
            );

            if let Some(goal) = self.config.line_goal {
                if self.lines >= goal {
                    self.status = BoardStatus::Won;
                    self.clock.reset();
                    info!(board = self.id.0, lines = self.lines, goal, "line goal reached");
                }
            }
        }

        let mut garbage_received = 0;
        if self.status == BoardStatus::Playing {
            garbage_received = self.process_garbage();
            self.spawn_piece();
        }

        LockEvent {
            lines_cleared: cleared,
            points: result.points,
            garbage_sent,
            garbage_received,
            status: self.status,
        }
    }

    /// Queue incoming garbage; nothing changes on the grid until processed
    pub fn add_garbage(&mut self, lines: u32) {
        if lines == 0 {
            return;
        }
        self.garbage.add(lines);
        debug!(board = self.id.0, lines, pending = self.garbage.pending(), "garbage queued");
    }

    /// Insert all pending garbage rows and reset the counter
    ///
    /// Returns the number of rows inserted.
    pub fn process_garbage(&mut self) -> u32 {
        let lines = self.garbage.take();
        apply_garbage(&mut self.grid, self.active.as_mut(), lines, &mut self.hole_rng);
        lines
    }

    /// Advance the drop clock
    ///
    /// A paused tick clears the clock so that resuming re-arms it instead of
    /// firing for the time spent paused.
    pub fn tick(&mut self, now_ms: u64, paused: bool) -> Option<DropResult> {
        if paused || !self.is_playing() {
            self.clock.reset();
            return None;
        }

        self.clock.tick(now_ms, self.drop_interval_ms)?;
        self.drop()
    }

    /// Clear the drop clock so the next tick only re-arms it
    pub fn resume(&mut self) {
        self.clock.reset();
    }

    /// Force a terminal state (used when the opponent's game ends)
    ///
    /// Returns false if the board is not currently playing.
    pub fn finish(&mut self, status: BoardStatus) -> bool {
        if self.status != BoardStatus::Playing || !status.is_terminal() {
            return false;
        }
        self.status = status;
        self.active = None;
        self.clock.reset();
        info!(board = self.id.0, status = status.as_str(), score = self.score, "board finished");
        true
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.id = self.id;
        out.grid = *self.grid.as_rows();
        out.active = self.active;
        out.next = self.next_piece();
        out.status = self.status;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level();
        out.drop_interval_ms = self.drop_interval_ms;
        out.pending_garbage = self.garbage.pending();
        out.has_opponent = self.opponent.is_some();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Option<Piece>) {
        self.active = piece;
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}
