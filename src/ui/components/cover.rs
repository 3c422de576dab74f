use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    audio::state::Phase,
    book::PLACEHOLDER_COVER_URL,
    ui::components::spinner::Spinner,
    util::colors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverState<'a> {
    /// Spinner with a caption for the stage in progress.
    Loading(&'static str),
    Loaded(&'a str),
    Failed,
    Placeholder,
}

impl<'a> CoverState<'a> {
    pub fn new(phase: Phase, cover_url: Option<&'a str>) -> Self {
        match (phase, cover_url) {
            (Phase::Loading, None) => CoverState::Loading("Fetching book"),
            (Phase::Loading, Some(_)) => CoverState::Loading("Preparing audio"),
            (_, Some(url)) => CoverState::Loaded(url),
            (Phase::Error, None) => CoverState::Failed,
            (_, None) => CoverState::Placeholder,
        }
    }
}

pub struct CoverWidget<'a> {
    state: CoverState<'a>,
}

impl<'a> CoverWidget<'a> {
    pub fn new(state: CoverState<'a>) -> Self {
        Self { state }
    }
}

impl Widget for CoverWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(colors::SECONDARY));
        let inner = block.inner(area);
        block.render(area, buf);

        let [glyph_area, caption_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(inner);

        let (glyph, caption) = match self.state {
            CoverState::Loading(label) => {
                Spinner::default()
                    .with_style(Style::new().fg(colors::ACCENT))
                    .with_label(label)
                    .render(glyph_area, buf);
                return;
            }
            CoverState::Loaded(url) => ("♪".fg(colors::PRIMARY), url.fg(colors::NEUTRAL)),
            CoverState::Failed => ("?".fg(colors::ERROR), "cover unavailable".fg(colors::ERROR)),
            CoverState::Placeholder => ("✦".fg(colors::SECONDARY), PLACEHOLDER_COVER_URL.fg(colors::NEUTRAL)),
        };

        let y = glyph_area.y + glyph_area.height / 2;
        Paragraph::new(Line::from(glyph.bold()))
            .alignment(Alignment::Center)
            .render(Rect { y, height: 1, ..glyph_area }, buf);

        Paragraph::new(Line::from(caption))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(caption_area, buf);
    }
}
