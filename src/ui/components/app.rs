use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::Style,
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    audio::state::Phase,
    ui::{
        app::App,
        components::{
            controls::{SpeedButton, TransportControls},
            cover::{CoverState, CoverWidget},
            key_points::{KeyPointCounter, KeyPointLabel},
            progress::ProgressWidget,
            toggle::ViewToggle,
        },
        util::truncate_to_width,
    },
    util::colors,
};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let frame = Block::new()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(colors::SECONDARY))
            .title_top("Audiobook")
            .title_alignment(Alignment::Center);
        let inner = frame.inner(area);
        frame.render(area, buf);

        let [
            cover_area,
            counter_area,
            label_area,
            _,
            progress_area,
            _,
            controls_area,
            speed_area,
            toggle_area,
            error_area,
        ] = Layout::vertical([
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner.inner(Margin::new(2, 0)));

        let controller = &self.controller;
        let state = controller.state();
        let book = controller.book();
        let phase = controller.phase();

        CoverWidget::new(CoverState::new(phase, book.map(|b| b.cover_url.as_str())))
            .render(cover_area, buf);

        KeyPointCounter::new(state.key_point, controller.key_point_count()).render(counter_area, buf);
        KeyPointLabel::new(book, state.key_point).render(label_area, buf);
        ProgressWidget::new(state, &self.scrub_area).render(progress_area, buf);
        TransportControls::new(state.is_playing, matches!(phase, Phase::Playing | Phase::Paused))
            .render(controls_area, buf);
        SpeedButton::new(state.speed).render(speed_area, buf);
        ViewToggle::new(state.view_mode).render(toggle_area, buf);

        if let Some(error) = &state.last_error {
            let text = truncate_to_width(error, error_area.width as usize);
            Paragraph::new(Line::styled(text, Style::new().fg(colors::ERROR)))
                .alignment(Alignment::Center)
                .render(error_area, buf);
        }
    }
}
