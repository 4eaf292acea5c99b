//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controls::Controls;
use crate::engine::Game;
use crate::types::GameAction;

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::Hold),
        KeyCode::Char('c') | KeyCode::Char('C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameAction::Hold)
        }

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Feed one terminal key event through `controls`.
///
/// Press and repeat events count as key-down, release events as key-up.
/// Returns whether the game changed.
pub fn dispatch_key_event(
    controls: &mut Controls,
    key: KeyEvent,
    now_ms: u64,
    game: &mut Game,
) -> bool {
    let Some(action) = handle_key_event(key) else {
        return false;
    };
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => controls.key_down(action, now_ms, game),
        KeyEventKind::Release => {
            controls.key_up(action);
            false
        }
    }
}
