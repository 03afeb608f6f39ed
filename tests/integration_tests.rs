//! Match-level tests through the public API

use tetris_duel::core::{
    BoardId, Match, MatchConfig, MatchEvent, MatchMode, RecordingSink,
};
use tetris_duel::types::{BoardStatus, GameAction, PlayerSlot};

/// Hard-drop pieces on `slot` until its board stops playing (or `max` pieces).
fn stack_until_over(game: &mut Match, slot: PlayerSlot, max: usize) {
    for _ in 0..max {
        if game.is_over() {
            return;
        }
        while game.apply_action(slot, GameAction::Drop) {
            if game
                .take_events()
                .iter()
                .any(|e| matches!(e, MatchEvent::Locked { .. }))
            {
                break;
            }
        }
    }
}

#[test]
fn solo_match_starts_playing() {
    let mut game = Match::solo(MatchConfig::solo().with_seed(1));
    assert_eq!(game.mode(), MatchMode::Solo);
    assert_eq!(game.boards()[0].status(), BoardStatus::Idle);

    game.start();
    let board = game.board_for(PlayerSlot::One).unwrap();
    assert_eq!(board.status(), BoardStatus::Playing);
    assert!(board.active().is_some());
    assert!(game.board_for(PlayerSlot::Two).is_none());
}

#[test]
fn solo_stacking_in_the_middle_tops_out() {
    let sink = RecordingSink::new();
    let mut game = Match::solo(MatchConfig::solo().with_seed(2)).with_score_sink(sink.clone());
    game.start();

    stack_until_over(&mut game, PlayerSlot::One, 200);

    assert!(game.is_over());
    assert_eq!(game.boards()[0].status(), BoardStatus::Lost);
    assert_eq!(game.winner(), None);
    // Nothing cleared, so nothing is reported.
    assert_eq!(game.boards()[0].score(), 0);
    assert!(sink.submitted().is_empty());
}

#[test]
fn versus_topping_out_hands_the_win_to_the_opponent() {
    let mut game = Match::versus(MatchConfig::versus().with_seed(3));
    game.start();

    stack_until_over(&mut game, PlayerSlot::Two, 200);

    assert_eq!(game.board(BoardId(1)).unwrap().status(), BoardStatus::Lost);
    assert_eq!(game.board(BoardId(0)).unwrap().status(), BoardStatus::Won);
    assert_eq!(game.winner(), Some(BoardId(0)));

    // Terminal states are frozen until restart.
    assert!(!game.apply_action(PlayerSlot::One, GameAction::MoveLeft));
    game.tick(0);
    game.tick(5_000);
    assert_eq!(game.board(BoardId(0)).unwrap().status(), BoardStatus::Won);

    game.apply_action(PlayerSlot::One, GameAction::Restart);
    assert!(!game.is_over());
}

#[test]
fn garbage_can_be_queued_directly() {
    let mut game = Match::versus(MatchConfig::versus().with_seed(4));
    game.start();

    assert!(game.add_garbage(BoardId(0), 2));
    assert!(game.add_garbage(BoardId(0), 1));
    assert!(!game.add_garbage(BoardId(7), 1));
    assert_eq!(game.board(BoardId(0)).unwrap().pending_garbage(), 3);

    // Lands on the next lock of that board.
    stack_until_over(&mut game, PlayerSlot::One, 1);
    let board = game.board(BoardId(0)).unwrap();
    assert_eq!(board.pending_garbage(), 0);
    assert_eq!(board.grid().garbage_cells(), 27);
}

#[test]
fn pause_freezes_everything() {
    let mut game = Match::versus(MatchConfig::versus().with_seed(5));
    game.start();
    game.tick(0);

    assert!(game.apply_action(PlayerSlot::Two, GameAction::Pause));
    let frozen = game.snapshot();
    assert!(frozen.paused);

    for action in [GameAction::MoveLeft, GameAction::Rotate, GameAction::Drop] {
        assert!(!game.apply_action(PlayerSlot::One, action));
    }
    for t in (16..30_000).step_by(16) {
        game.tick(t);
    }
    assert_eq!(game.snapshot(), frozen);

    game.apply_action(PlayerSlot::One, GameAction::Pause);
    assert!(!game.paused());
    assert!(game.apply_action(PlayerSlot::One, GameAction::Drop));
}

#[test]
fn automatic_descent_follows_the_clock() {
    let mut game = Match::solo(MatchConfig::solo().with_seed(6));
    game.start();
    let y0 = game.boards()[0].active().unwrap().y;

    // 16ms frames for 3.5 seconds: three drops at level 0.
    for t in (0..=3_500).step_by(16) {
        game.tick(t);
    }
    assert_eq!(game.boards()[0].active().unwrap().y, y0 + 3);
}

#[test]
fn equal_seeds_replay_identically() {
    let run = || {
        let mut game = Match::versus(MatchConfig::versus().with_seed(77));
        game.start();
        for step in 0..400u64 {
            let slot = if step % 2 == 0 { PlayerSlot::One } else { PlayerSlot::Two };
            let action = match step % 5 {
                0 => GameAction::MoveLeft,
                1 => GameAction::Rotate,
                2 => GameAction::MoveRight,
                _ => GameAction::Drop,
            };
            game.apply_action(slot, action);
            game.tick(step * 40);
        }
        game.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn env_config_defaults_per_mode() {
    // Only checks that defaults survive when the variables are absent or unset.
    let solo = MatchConfig::from_env(MatchMode::Solo);
    let versus = MatchConfig::from_env(MatchMode::Versus);
    assert_eq!(solo.mode, MatchMode::Solo);
    assert_eq!(versus.mode, MatchMode::Versus);
    if std::env::var_os("TETRIS_DUEL_LINE_GOAL").is_none() {
        assert_eq!(solo.line_goal, Some(100));
        assert_eq!(versus.line_goal, None);
    }
}
