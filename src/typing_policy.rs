use std::time::SystemTime;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::{
    session::{Session, WordStatus},
    word_generator::{TokenSource, EXTEND_BATCH},
};

/// A keystroke as the reducer understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Char(char),
    Backspace,
    Space,
    /// scroll hint for the view; never touches the session
    Enter,
    Ignored,
}

impl KeyAction {
    /// Whether this key counts as the start of typing
    pub fn starts_typing(&self) -> bool {
        matches!(
            self,
            KeyAction::Char(_) | KeyAction::Backspace | KeyAction::Space
        )
    }
}

pub fn classify(key: &KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignored;
    }
    let combo = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META;
    if key.modifiers.intersects(combo) {
        return KeyAction::Ignored;
    }

    match key.code {
        KeyCode::Char(' ') => KeyAction::Space,
        KeyCode::Char(c) => KeyAction::Char(c),
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Enter => KeyAction::Enter,
        _ => KeyAction::Ignored,
    }
}

/// Applies one keystroke and returns the next session.
///
/// The word list is extended before the active index would run past it, so
/// the active index always points at an existing word afterwards.
pub fn reduce<S: TokenSource + ?Sized>(
    mut session: Session,
    action: KeyAction,
    now: SystemTime,
    tokens: &mut S,
) -> Session {
    if !action.starts_typing() {
        return session;
    }
    if session.is_empty() {
        session.extend(tokens, EXTEND_BATCH);
    }
    if session.start(now) {
        trace!("typing started");
    }

    let idx = session.active_index();
    match action {
        KeyAction::Char(c) => {
            if let Some(slot) = session.slot_mut(idx) {
                slot.typed.push(c);
                slot.status = WordStatus::InProgress;
            }
        }
        KeyAction::Backspace => backspace(&mut session, idx),
        KeyAction::Space => {
            if let Some(slot) = session.slot_mut(idx) {
                slot.status = WordStatus::Submitted;
            }
            if session.is_last() {
                session.extend(tokens, EXTEND_BATCH);
            }
            session.set_active(idx + 1);
        }
        KeyAction::Enter | KeyAction::Ignored => {}
    }

    session
}

fn backspace(session: &mut Session, idx: usize) {
    if let Some(slot) = session.slot_mut(idx) {
        if slot.typed.pop().is_some() {
            slot.status = slot.editing_status();
            return;
        }
    }
    if idx == 0 {
        return;
    }

    // Re-entering a word reopens it; it is scored again on the next space.
    let prev = idx - 1;
    if let Some(slot) = session.slot_mut(prev) {
        slot.status = slot.editing_status();
    }
    session.set_active(prev);
}
