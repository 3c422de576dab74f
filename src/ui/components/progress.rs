use std::cell::Cell;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::{
    audio::state::PlaybackState,
    ui::{components::gauge::SeekGauge, util::format_time},
    util::colors,
};

/// `MM:SS ━━━━──── MM:SS`. Records the bar's area so clicks can be mapped back.
pub struct ProgressWidget<'a> {
    state: &'a PlaybackState,
    bar_area: &'a Cell<Rect>,
}

impl<'a> ProgressWidget<'a> {
    pub fn new(state: &'a PlaybackState, bar_area: &'a Cell<Rect>) -> Self {
        Self { state, bar_area }
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let current = format_time(self.state.current_time);
        let total = format_time(self.state.duration);
        let time_width = current.len().max(total.len()) as u16;

        let [current_area, bar_area, total_area] = Layout::horizontal([
            Constraint::Length(time_width + 1),
            Constraint::Min(1),
            Constraint::Length(time_width + 1),
        ])
        .areas(area);

        let time_style = Style::new().fg(colors::NEUTRAL);
        Paragraph::new(Line::styled(current, time_style).left_aligned()).render(current_area, buf);
        Paragraph::new(Line::styled(total, time_style).right_aligned()).render(total_area, buf);

        let bar_row = Rect {
            y: bar_area.y + bar_area.height / 2,
            height: bar_area.height.min(1),
            ..bar_area
        };
        self.bar_area.set(bar_row);

        SeekGauge::default()
            .ratio(self.state.progress_ratio())
            .played_style(Style::new().fg(colors::PRIMARY))
            .remaining_style(Style::new().fg(colors::SECONDARY))
            .render(bar_row, buf);
    }
}
