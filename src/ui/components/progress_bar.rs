use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::engine::compare::SessionMetrics;
use crate::ui::theme::Theme;

/// Horizontal bar for phrase progress, labelled with the typed/total count.
pub struct ProgressBar<'a> {
    ratio: f64,
    label: String,
    theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn from_metrics(metrics: &SessionMetrics, phrase_len: usize, theme: &'a Theme) -> Self {
        Self {
            ratio: metrics.progress_ratio().clamp(0.0, 1.0),
            label: format!(
                "{}/{} \u{00b7} {}%",
                metrics.typed_chars.min(phrase_len),
                phrase_len,
                metrics.progress
            ),
            theme,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio * inner.width as f64).round() as u16;
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_width = self.label.chars().count() as u16;
        let label_x = inner.x + inner.width.saturating_sub(label_width) / 2;
        buf.set_string(label_x, inner.y, &self.label, Style::default().fg(colors.fg()));
    }
}
