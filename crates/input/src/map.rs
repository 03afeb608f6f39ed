//! Key mapping from terminal events to player actions.
//!
//! | Action | Solo | Versus P1 | Versus P2 |
//! |--------|------|-----------|-----------|
//! | Move left | ← / A / H | A | ← |
//! | Move right | → / D / L | D | → |
//! | Drop | ↓ / S / J | S | ↓ |
//! | Rotate | ↑ / W / K | W / F | ↑ |
//!
//! `P` pauses and `R` restarts the whole match in either layout.

use crate::types::{GameAction, PlayerSlot};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which keyboard layout is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyLayout {
    #[default]
    Solo,
    Versus,
}

/// Map keyboard input to a player action.
pub fn handle_key_event(layout: KeyLayout, key: KeyEvent) -> Option<(PlayerSlot, GameAction)> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    // Match-wide keys.
    match code {
        KeyCode::Char('p') => return Some((PlayerSlot::One, GameAction::Pause)),
        KeyCode::Char('r') => return Some((PlayerSlot::One, GameAction::Restart)),
        _ => {}
    }

    match layout {
        KeyLayout::Solo => solo_action(code).map(|a| (PlayerSlot::One, a)),
        KeyLayout::Versus => versus_action(code),
    }
}

fn solo_action(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(GameAction::Drop),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(GameAction::Rotate),
        _ => None,
    }
}

fn versus_action(code: KeyCode) -> Option<(PlayerSlot, GameAction)> {
    let p1 = PlayerSlot::One;
    let p2 = PlayerSlot::Two;
    match code {
        KeyCode::Char('a') => Some((p1, GameAction::MoveLeft)),
        KeyCode::Char('d') => Some((p1, GameAction::MoveRight)),
        KeyCode::Char('s') => Some((p1, GameAction::Drop)),
        KeyCode::Char('w') | KeyCode::Char('f') => Some((p1, GameAction::Rotate)),

        KeyCode::Left => Some((p2, GameAction::MoveLeft)),
        KeyCode::Right => Some((p2, GameAction::MoveRight)),
        KeyCode::Down => Some((p2, GameAction::Drop)),
        KeyCode::Up => Some((p2, GameAction::Rotate)),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
