use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::{
    book::Book,
    ui::util::{format_time, truncate_to_width},
    util::colors,
};

pub struct KeyPointCounter {
    current: usize,
    total: usize,
}

impl KeyPointCounter {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    pub fn text(&self) -> String {
        format!("Key Point {} of {}", self.current, self.total).to_uppercase()
    }
}

impl Widget for KeyPointCounter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::styled(self.text(), Style::new().fg(colors::NEUTRAL)))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Title of the key point the listener is on, or a hint about the next one.
pub struct KeyPointLabel<'a> {
    book: Option<&'a Book>,
    index: usize,
}

impl<'a> KeyPointLabel<'a> {
    pub fn new(book: Option<&'a Book>, index: usize) -> Self {
        Self { book, index }
    }

    pub fn text(&self) -> Option<String> {
        match (self.book, self.index) {
            (Some(book), i) if i > 0 && i <= book.key_points.len() => {
                Some(book.key_points[i - 1].title.clone())
            }
            (book, 0) => book
                .and_then(|b| b.key_point_seconds(0))
                .map(|secs| format!("Next key point at {}", format_time(secs))),
            _ => Some("No Key Point".to_string()),
        }
    }
}

impl Widget for KeyPointLabel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(text) = self.text() else {
            return;
        };
        let text = truncate_to_width(&text, area.width as usize);
        Paragraph::new(Line::styled(text, Style::new().fg(colors::PRIMARY)))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
