use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{audio::state::Speed, util::colors};

pub struct TransportControls {
    is_playing: bool,
    enabled: bool,
}

impl TransportControls {
    pub fn new(is_playing: bool, enabled: bool) -> Self {
        Self {
            is_playing,
            enabled,
        }
    }
}

impl Widget for TransportControls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let button = |glyph: &'static str, key: &'static str| {
            vec![
                Span::styled(glyph, Style::new().fg(colors::PRIMARY).bold()),
                Span::styled(format!(" {key}"), Style::new().fg(colors::SECONDARY)),
                Span::raw("   "),
            ]
        };

        let play_glyph = if self.is_playing { "⏸" } else { "▶" };
        let play_style = if self.enabled {
            Style::new().fg(colors::BACKGROUND).bg(colors::PRIMARY).bold()
        } else {
            Style::new().fg(colors::NEUTRAL)
        };

        let mut spans = Vec::with_capacity(16);
        spans.extend(button("⏮", "p"));
        spans.extend(button("↺5", "h"));
        spans.push(Span::styled(format!(" {play_glyph} "), play_style));
        spans.push(Span::styled(" ␣", Style::new().fg(colors::SECONDARY)));
        spans.push(Span::raw("   "));
        spans.extend(button("10↻", "l"));
        spans.extend(button("⏭", "n"));
        spans.pop();

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

pub struct SpeedButton {
    speed: Speed,
}

impl SpeedButton {
    pub fn new(speed: Speed) -> Self {
        Self { speed }
    }

    pub fn label(&self) -> String {
        format!("Speed x{}", self.speed.multiplier())
    }
}

impl Widget for SpeedButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = self.label();
        let width = (label.chars().count() as u16 + 4).min(area.width);
        let x = area.x + (area.width - width) / 2;

        Paragraph::new(Span::styled(label, Style::new().fg(colors::PRIMARY).bold()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::new().fg(colors::SECONDARY))
                    .title_bottom(Line::from(" s ".fg(colors::SECONDARY)).centered()),
            )
            .alignment(Alignment::Center)
            .render(Rect { x, width, ..area }, buf);
    }
}
