use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    widgets::{Block, Widget},
};

/// Single-row seek bar with eighth-block resolution at the play head.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeekGauge<'a> {
    block: Option<Block<'a>>,
    ratio: f64,
    played_style: Style,
    remaining_style: Style,
}

impl<'a> SeekGauge<'a> {
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Out-of-range ratios are clamped.
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        self
    }

    pub fn played_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.played_style = style.into();
        self
    }

    pub fn remaining_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.remaining_style = style.into();
        self
    }
}

fn get_unicode_block(frac: f64) -> &'static str {
    match (frac * 8.0).round() as u16 {
        0 => " ",
        1 => symbols::block::ONE_EIGHTH,
        2 => symbols::block::ONE_QUARTER,
        3 => symbols::block::THREE_EIGHTHS,
        4 => symbols::block::HALF,
        5 => symbols::block::FIVE_EIGHTHS,
        6 => symbols::block::THREE_QUARTERS,
        7 => symbols::block::SEVEN_EIGHTHS,
        _ => symbols::block::FULL,
    }
}

impl Widget for SeekGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(ref block) = self.block {
            block.render(area, buf);
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        if inner.is_empty() {
            return;
        }

        let head = f64::from(inner.width) * self.ratio;
        let row = inner.top() + inner.height / 2;

        for x in inner.left()..inner.right() {
            let pos = f64::from(x - inner.left());
            let (symbol, style) = if pos + 1.0 <= head {
                (symbols::block::FULL, self.played_style)
            } else if pos < head {
                (get_unicode_block(head - pos), self.played_style)
            } else {
                (symbols::line::HORIZONTAL, self.remaining_style)
            };

            buf[(x, row)]
                .set_symbol(symbol)
                .set_fg(style.fg.unwrap_or_default())
                .set_bg(style.bg.unwrap_or_default());
        }
    }
}
