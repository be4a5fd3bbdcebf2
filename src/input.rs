//! Key handling for the game screen.
//!
//! Priority chain: quit keys always win, then a pending game-over notice
//! swallows the next key, then Start (only when the control is shown), then
//! movement (ignored by the session unless a round is running).

use crate::core::player::Direction;
use crate::core::ports::Surface;
use crate::core::session::Session;
use crate::ui::hud::Hud;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key means, independent of game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Start,
    Quit,
    Other,
}

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Map a key to an action. W/A/S/D and the arrow keys move.
pub fn map_key(key: &KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            KeyAction::Move(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            KeyAction::Move(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            KeyAction::Move(Direction::Right)
        }
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Start,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::Other,
    }
}

/// Handle one key event against the session.
pub fn handle_key<S>(key: KeyEvent, session: &mut Session, hud: &mut Hud, surface: &S) -> InputResult
where
    S: Surface + ?Sized,
{
    // Key releases are reported on some platforms; held keys repeat like keydown
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    let action = map_key(&key);
    if action == KeyAction::Quit {
        return InputResult::Quit;
    }

    if hud.awaiting_ack() {
        hud.acknowledge();
        return InputResult::Continue;
    }

    match action {
        KeyAction::Start if hud.start_visible => {
            if let Err(e) = session.start(surface, hud) {
                log::error!("cannot start round: {}", e);
            }
        }
        KeyAction::Move(direction) => {
            session.handle_input(direction, surface);
        }
        _ => {}
    }
    InputResult::Continue
}
