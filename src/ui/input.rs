use crate::ui::message::AppMessage;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    layout::{Position, Rect},
};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(AppMessage::Quit),
            (KeyCode::Char(' '), _) => Some(AppMessage::TogglePlayPause),
            (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(AppMessage::SeekBackward),
            (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(AppMessage::SeekForward),
            (KeyCode::Char('p'), _) | (KeyCode::Char('['), _) => Some(AppMessage::PreviousKeyPoint),
            (KeyCode::Char('n'), _) | (KeyCode::Char(']'), _) => Some(AppMessage::NextKeyPoint),
            (KeyCode::Char('s'), _) => Some(AppMessage::ToggleSpeed),
            (KeyCode::Char('t'), _) => Some(AppMessage::ToggleViewMode),
            _ => None,
        }
    }

    /// A left click or drag on the scrub bar jumps to that fraction of the book.
    pub fn handle_mouse(mouse: MouseEvent, scrub_area: Rect, duration: f64) -> Option<AppMessage> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {}
            _ => return None,
        }

        let inside_row = scrub_area.contains(Position::new(scrub_area.x, mouse.row));
        if scrub_area.is_empty() || !inside_row {
            return None;
        }

        let offset = mouse.column.clamp(scrub_area.left(), scrub_area.right() - 1) - scrub_area.left();
        let span = scrub_area.width.saturating_sub(1).max(1);
        let ratio = f64::from(offset) / f64::from(span);
        Some(AppMessage::Scrub(ratio.min(1.0) * duration))
    }
}
