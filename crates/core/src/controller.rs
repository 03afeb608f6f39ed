//! Match controller - solo and versus sessions
//!
//! A [`Match`] owns its boards in a small registry indexed by [`BoardId`].
//! Boards only know their opponent's id; the controller routes garbage,
//! propagates terminal states and reports final scores.
//!
//! ```
//! use tetris_duel_core::{Match, MatchConfig};
//! use tetris_duel_core::types::{GameAction, PlayerSlot};
//!
//! let mut game = Match::versus(MatchConfig::versus().with_seed(7));
//! game.start();
//! game.apply_action(PlayerSlot::Two, GameAction::MoveLeft);
//! game.tick(0);
//! assert!(!game.is_over());
//! ```

use std::env;

use tracing::{debug, info};

use crate::board::{Board, BoardConfig, BoardId, DropResult, LockEvent};
use crate::report::ScoreSink;
use crate::snapshot::MatchSnapshot;
use crate::types::{BoardStatus, GameAction, PlayerSlot, DEFAULT_LINE_GOAL};

/// Spreads per-board seeds so both versus boards get different bags.
const BOARD_SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    #[default]
    Solo,
    Versus,
}

impl MatchMode {
    pub fn board_count(&self) -> usize {
        match self {
            MatchMode::Solo => 1,
            MatchMode::Versus => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Solo => "solo",
            MatchMode::Versus => "versus",
        }
    }
}

/// Match settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub mode: MatchMode,
    /// Base seed; each board derives its own from it.
    pub seed: Option<u64>,
    pub line_goal: Option<u32>,
    /// Names submitted to the score sink, by player slot.
    pub player_names: [String; 2],
}

impl MatchConfig {
    /// Solo defaults: clear 100 lines to win
    pub fn solo() -> Self {
        Self {
            mode: MatchMode::Solo,
            seed: None,
            line_goal: Some(DEFAULT_LINE_GOAL),
            player_names: ["Player".to_string(), "Player 2".to_string()],
        }
    }

    /// Versus defaults: last board standing
    pub fn versus() -> Self {
        Self {
            mode: MatchMode::Versus,
            seed: None,
            line_goal: None,
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
        }
    }

    pub fn for_mode(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Solo => Self::solo(),
            MatchMode::Versus => Self::versus(),
        }
    }

    /// Mode defaults overridden by `TETRIS_DUEL_SEED` and `TETRIS_DUEL_LINE_GOAL`
    ///
    /// A line goal of `0` disables the goal.
    pub fn from_env(mode: MatchMode) -> Self {
        let mut config = Self::for_mode(mode);

        if let Some(seed) = env::var("TETRIS_DUEL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            config.seed = Some(seed);
        }

        if let Some(goal) = env::var("TETRIS_DUEL_LINE_GOAL")
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
        {
            config.line_goal = (goal > 0).then_some(goal);
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_line_goal(mut self, goal: Option<u32>) -> Self {
        self.line_goal = goal.filter(|&g| g > 0);
        self
    }

    pub fn with_player_name(mut self, slot: PlayerSlot, name: impl Into<String>) -> Self {
        self.player_names[slot.index()] = name.into();
        self
    }

    fn board_config(&self, index: usize) -> BoardConfig {
        BoardConfig {
            seed: self
                .seed
                .map(|s| s.wrapping_add(BOARD_SEED_STEP.wrapping_mul(index as u64))),
            line_goal: self.line_goal,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::solo()
    }
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// A piece locked on `board`.
    Locked { board: BoardId, event: LockEvent },
    /// Garbage was queued on `to`.
    GarbageSent { from: BoardId, to: BoardId, lines: u32 },
    /// `board` reached a terminal state.
    Finished {
        board: BoardId,
        status: BoardStatus,
        score: u32,
    },
}

/// One solo or versus session
pub struct Match {
    config: MatchConfig,
    boards: Vec<Board>,
    paused: bool,
    events: Vec<MatchEvent>,
    sink: Option<Box<dyn ScoreSink>>,
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("config", &self.config)
            .field("boards", &self.boards)
            .field("paused", &self.paused)
            .field("events", &self.events)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Match {
    /// Create the boards for `config.mode`; versus boards are linked
    pub fn new(config: MatchConfig) -> Self {
        let boards = (0..config.mode.board_count())
            .map(|i| Board::new(BoardId(i), config.board_config(i)))
            .collect();

        let mut game = Self {
            config,
            boards,
            paused: false,
            events: Vec::new(),
            sink: None,
        };
        if game.boards.len() == 2 {
            game.link(BoardId(0), BoardId(1));
        }
        game
    }

    /// Single-board match; the mode in `config` is ignored
    pub fn solo(config: MatchConfig) -> Self {
        Self::new(MatchConfig {
            mode: MatchMode::Solo,
            ..config
        })
    }

    /// Two linked boards; the mode in `config` is ignored
    pub fn versus(config: MatchConfig) -> Self {
        Self::new(MatchConfig {
            mode: MatchMode::Versus,
            ..config
        })
    }

    pub fn with_score_sink(mut self, sink: impl ScoreSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_score_sink(&mut self, sink: Option<Box<dyn ScoreSink>>) {
        self.sink = sink;
    }

    /// Make `a` and `b` each other's garbage target
    pub fn link(&mut self, a: BoardId, b: BoardId) -> bool {
        if a == b || a.0 >= self.boards.len() || b.0 >= self.boards.len() {
            return false;
        }
        self.boards[a.0].set_opponent(Some(b));
        self.boards[b.0].set_opponent(Some(a));
        true
    }

    /// Start (or restart) every board and clear the pause flag
    pub fn start(&mut self) {
        self.paused = false;
        for board in &mut self.boards {
            board.start();
        }
        info!(mode = self.config.mode.as_str(), boards = self.boards.len(), "match started");
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn mode(&self) -> MatchMode {
        self.config.mode
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.get(id.0)
    }

    pub fn board_for(&self, slot: PlayerSlot) -> Option<&Board> {
        self.board(slot.into())
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause flag; returns the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if !paused {
            for board in &mut self.boards {
                board.resume();
            }
        }
        debug!(paused, "pause toggled");
    }

    /// True once any board reached a terminal state
    pub fn is_over(&self) -> bool {
        self.boards.iter().any(|b| b.status().is_terminal())
    }

    /// The board that won, if the match is decided in someone's favour
    pub fn winner(&self) -> Option<BoardId> {
        self.boards
            .iter()
            .find(|b| b.status() == BoardStatus::Won)
            .map(Board::id)
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    fn accepts_input(&self) -> bool {
        !self.paused && !self.is_over()
    }

    fn board_mut(&mut self, slot: PlayerSlot) -> Option<&mut Board> {
        self.boards.get_mut(slot.index())
    }

    pub fn move_left(&mut self, slot: PlayerSlot) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.board_mut(slot).is_some_and(Board::move_left)
    }

    pub fn move_right(&mut self, slot: PlayerSlot) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.board_mut(slot).is_some_and(Board::move_right)
    }

    pub fn rotate(&mut self, slot: PlayerSlot) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.board_mut(slot).is_some_and(Board::rotate)
    }

    /// Soft drop one row; a blocked piece locks immediately
    pub fn drop(&mut self, slot: PlayerSlot) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let id = BoardId::from(slot);
        let Some(result) = self.boards.get_mut(id.0).and_then(Board::drop) else {
            return false;
        };
        self.after_drop(id, result);
        true
    }

    /// Apply a player's action
    ///
    /// `Pause` and `Restart` affect the whole match regardless of slot.
    pub fn apply_action(&mut self, slot: PlayerSlot, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(slot),
            GameAction::MoveRight => self.move_right(slot),
            GameAction::Rotate => self.rotate(slot),
            GameAction::Drop => self.drop(slot),
            GameAction::Pause => {
                self.toggle_pause();
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Queue garbage on a board directly
    pub fn add_garbage(&mut self, id: BoardId, lines: u32) -> bool {
        match self.boards.get_mut(id.0) {
            Some(board) if !board.status().is_terminal() => {
                board.add_garbage(lines);
                true
            }
            _ => false,
        }
    }

    /// Advance every board's drop clock, in registry order
    pub fn tick(&mut self, now_ms: u64) {
        for index in 0..self.boards.len() {
            if let Some(result) = self.boards[index].tick(now_ms, self.paused) {
                self.after_drop(BoardId(index), result);
            }
        }
    }

    fn after_drop(&mut self, id: BoardId, result: DropResult) {
        let DropResult::Locked(event) = result else {
            return;
        };
        self.events.push(MatchEvent::Locked { board: id, event });

        let opponent = self.boards[id.0].opponent();
        if let Some(to) = opponent {
            if event.garbage_sent > 0 && self.add_garbage(to, event.garbage_sent) {
                debug!(from = id.0, to = to.0, lines = event.garbage_sent, "garbage sent");
                self.events.push(MatchEvent::GarbageSent {
                    from: id,
                    to,
                    lines: event.garbage_sent,
                });
            }
        }

        if !event.status.is_terminal() {
            return;
        }
        self.report_finished(id);

        if let Some(other) = opponent {
            let outcome = match event.status {
                BoardStatus::Lost => BoardStatus::Won,
                _ => BoardStatus::Lost,
            };
            if self.boards[other.0].finish(outcome) {
                self.report_finished(other);
            }
        }
    }

    fn report_finished(&mut self, id: BoardId) {
        let board = &self.boards[id.0];
        let (status, score) = (board.status(), board.score());
        info!(board = id.0, status = status.as_str(), score, "board finished");
        self.events.push(MatchEvent::Finished {
            board: id,
            status,
            score,
        });

        if score == 0 {
            return;
        }
        if let (Some(sink), Some(name)) = (self.sink.as_mut(), self.config.player_names.get(id.0)) {
            sink.submit(name, score);
        }
    }

    pub fn snapshot_into(&self, out: &mut MatchSnapshot) {
        out.mode = self.config.mode;
        out.paused = self.paused;
        out.boards.clear();
        for board in &self.boards {
            if out.boards.try_push(board.snapshot()).is_err() {
                break;
            }
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut s = MatchSnapshot::new(self.config.mode);
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn board_at_mut(&mut self, id: BoardId) -> &mut Board {
        &mut self.boards[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;
    use crate::report::RecordingSink;
    use crate::types::{Color, PieceKind, GRID_COLS, GRID_ROWS};

    const A: BoardId = BoardId(0);
    const B: BoardId = BoardId(1);

    fn versus() -> Match {
        let mut game = Match::versus(MatchConfig::versus().with_seed(99));
        game.start();
        game
    }

    fn fill_rows_except_col0(board: &mut Board, count: i32) {
        for i in 0..count {
            let row = GRID_ROWS as i32 - 1 - i;
            for col in 1..GRID_COLS as i32 {
                board.grid_mut().set(col, row, Some(Color::RED));
            }
        }
        let vertical = Piece::spawn(PieceKind::I).rotated().shifted(-6, 0);
        board.set_active(Some(vertical));
    }

    /// Fill the spawn area so the next spawn collides.
    fn block_spawn(board: &mut Board) {
        for row in 0..3 {
            for col in 1..GRID_COLS as i32 {
                board.grid_mut().set(col, row, Some(Color::RED));
            }
        }
    }

    fn drop_until_lock(game: &mut Match, slot: PlayerSlot) {
        let id = BoardId::from(slot);
        let pieces = game.board(id).map(Board::pieces_spawned);
        while game.board(id).map(Board::pieces_spawned) == pieces
            && game.board(id).is_some_and(Board::is_playing)
        {
            assert!(game.drop(slot));
        }
    }

    #[test]
    fn test_solo_has_one_unlinked_board() {
        let game = Match::solo(MatchConfig::solo());
        assert_eq!(game.boards().len(), 1);
        assert_eq!(game.boards()[0].opponent(), None);
        assert_eq!(game.boards()[0].config().line_goal, Some(100));
    }

    #[test]
    fn test_versus_boards_are_linked() {
        let game = versus();
        assert_eq!(game.board(A).unwrap().opponent(), Some(B));
        assert_eq!(game.board(B).unwrap().opponent(), Some(A));
        assert_eq!(game.board(A).unwrap().config().line_goal, None);
    }

    #[test]
    fn test_link_rejects_self_and_unknown() {
        let mut game = versus();
        assert!(!game.link(A, A));
        assert!(!game.link(A, BoardId(5)));
    }

    #[test]
    fn test_triple_clear_sends_two_garbage() {
        let mut game = versus();
        fill_rows_except_col0(game.board_at_mut(A), 3);

        drop_until_lock(&mut game, PlayerSlot::One);

        assert_eq!(game.board(A).unwrap().score(), 90);
        assert_eq!(game.board(B).unwrap().pending_garbage(), 2);
        assert_eq!(game.board(B).unwrap().grid().garbage_cells(), 0);

        let events = game.take_events();
        assert!(events.contains(&MatchEvent::GarbageSent {
            from: A,
            to: B,
            lines: 2
        }));
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_single_clear_sends_nothing() {
        let mut game = versus();
        fill_rows_except_col0(game.board_at_mut(A), 1);
        drop_until_lock(&mut game, PlayerSlot::One);
        assert_eq!(game.board(B).unwrap().pending_garbage(), 0);
    }

    #[test]
    fn test_received_garbage_lands_on_next_lock() {
        let mut game = versus();
        fill_rows_except_col0(game.board_at_mut(A), 4);
        drop_until_lock(&mut game, PlayerSlot::One);
        assert_eq!(game.board(B).unwrap().pending_garbage(), 3);

        drop_until_lock(&mut game, PlayerSlot::Two);
        let b = game.board(B).unwrap();
        assert_eq!(b.pending_garbage(), 0);
        assert_eq!(b.grid().garbage_cells(), 3 * (GRID_COLS - 1));
    }

    #[test]
    fn test_loss_makes_opponent_win_and_reports() {
        let sink = RecordingSink::new();
        let mut game = Match::versus(MatchConfig::versus().with_seed(5)).with_score_sink(sink.clone());
        game.start();
        game.board_at_mut(A).set_score(0);
        game.board_at_mut(B).set_score(40);
        block_spawn(game.board_at_mut(A));

        drop_until_lock(&mut game, PlayerSlot::One);

        assert_eq!(game.board(A).unwrap().status(), BoardStatus::Lost);
        assert_eq!(game.board(B).unwrap().status(), BoardStatus::Won);
        assert_eq!(game.winner(), Some(B));
        assert!(game.is_over());
        // Zero scores are never submitted.
        assert_eq!(sink.submitted(), vec![("Player 2".to_string(), 40)]);
    }

    #[test]
    fn test_goal_win_makes_opponent_lose() {
        let mut game = Match::versus(MatchConfig::versus().with_seed(3).with_line_goal(Some(1)));
        game.start();
        fill_rows_except_col0(game.board_at_mut(B), 1);

        drop_until_lock(&mut game, PlayerSlot::Two);

        assert_eq!(game.board(B).unwrap().status(), BoardStatus::Won);
        assert_eq!(game.board(A).unwrap().status(), BoardStatus::Lost);
        let finished: Vec<_> = game
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, MatchEvent::Finished { .. }))
            .collect();
        assert_eq!(finished.len(), 2);
    }

    #[test]
    fn test_input_ignored_when_over() {
        let mut game = versus();
        block_spawn(game.board_at_mut(A));
        drop_until_lock(&mut game, PlayerSlot::One);
        assert!(game.is_over());

        assert!(!game.move_left(PlayerSlot::Two));
        assert!(!game.drop(PlayerSlot::Two));
        assert!(!game.apply_action(PlayerSlot::One, GameAction::Rotate));
    }

    #[test]
    fn test_pause_blocks_input_and_ticks() {
        let mut game = versus();
        game.tick(0);
        assert!(game.apply_action(PlayerSlot::One, GameAction::Pause));
        assert!(game.paused());

        let before = game.snapshot();
        assert!(!game.move_left(PlayerSlot::One));
        game.tick(10_000);
        assert_eq!(game.snapshot(), MatchSnapshot { paused: true, ..before.clone() });

        game.toggle_pause();
        // First tick after resuming only re-arms the clocks.
        game.tick(20_000);
        assert_eq!(game.board(A).unwrap().active(), before.boards[0].active);
    }

    #[test]
    fn test_tick_advances_both_boards() {
        let mut game = versus();
        let ya = game.board(A).unwrap().active().unwrap().y;
        let yb = game.board(B).unwrap().active().unwrap().y;
        game.tick(0);
        game.tick(1001);
        assert_eq!(game.board(A).unwrap().active().unwrap().y, ya + 1);
        assert_eq!(game.board(B).unwrap().active().unwrap().y, yb + 1);
    }

    #[test]
    fn test_restart_clears_terminal_state() {
        let mut game = versus();
        block_spawn(game.board_at_mut(A));
        drop_until_lock(&mut game, PlayerSlot::One);
        assert!(game.is_over());

        assert!(game.apply_action(PlayerSlot::Two, GameAction::Restart));
        assert!(!game.is_over());
        assert_eq!(game.winner(), None);
        assert!(game.boards().iter().all(Board::is_playing));
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Match::solo(MatchConfig::solo().with_seed(42));
        let mut b = Match::solo(MatchConfig::solo().with_seed(42));
        a.start();
        b.start();
        for t in (0..20_000).step_by(16) {
            a.tick(t);
            b.tick(t);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_line_goal_zero_disables() {
        let config = MatchConfig::solo().with_line_goal(Some(0));
        assert_eq!(config.line_goal, None);
    }
}
