use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{audio::state::ViewMode, util::colors};

/// Audio / text pill. Highlights whichever side is active.
pub struct ViewToggle {
    mode: ViewMode,
}

impl ViewToggle {
    pub fn new(mode: ViewMode) -> Self {
        Self { mode }
    }

    fn side(label: &'static str, active: bool) -> Span<'static> {
        if active {
            Span::styled(label, Style::new().fg(colors::BACKGROUND).bg(colors::PRIMARY).bold())
        } else {
            Span::styled(label, Style::new().fg(colors::NEUTRAL))
        }
    }
}

impl Widget for ViewToggle {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Self::side(" ♫ audio ", self.mode == ViewMode::Audio),
            Span::raw(" "),
            Self::side(" ≡ text ", self.mode == ViewMode::Text),
        ]);

        let width = (line.width() as u16 + 2).min(area.width);
        let x = area.x + (area.width - width) / 2;

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::new().fg(colors::SECONDARY)),
            )
            .alignment(Alignment::Center)
            .render(Rect { x, width, ..area }, buf);
    }
}
