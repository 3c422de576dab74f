use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::time::{SystemTime, UNIX_EPOCH};
use unicode_width::UnicodeWidthStr;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_STEP_MS: u128 = 100;

#[derive(Default)]
pub struct Spinner {
    style: Style,
    label: Option<String>,
}

impl Spinner {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn frame() -> &'static str {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        FRAMES[(now / FRAME_STEP_MS) as usize % FRAMES.len()]
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let text = match self.label {
            Some(label) => format!("{} {}", Self::frame(), label),
            None => Self::frame().to_string(),
        };

        let x = area.x + area.width.saturating_sub(text.width() as u16) / 2;
        let y = area.y + area.height / 2;
        buf.set_stringn(x, y, text, area.width as usize, self.style);
    }
}
