use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::compare::SessionMetrics;
use crate::ui::theme::Theme;

pub struct StatsSidebar<'a> {
    metrics: &'a SessionMetrics,
    started: bool,
    best_wpm: u32,
    new_best: bool,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(
        metrics: &'a SessionMetrics,
        started: bool,
        best_wpm: u32,
        new_best: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            metrics,
            started,
            best_wpm,
            new_best,
            theme,
        }
    }
}

/// Zero means "no run recorded yet".
pub fn format_best(best_wpm: u32, new_best: bool) -> String {
    match (best_wpm, new_best) {
        (0, _) => "\u{2014}".to_string(), // —
        (wpm, true) => format!("{wpm} \u{2728}"), // ✨
        (wpm, false) => wpm.to_string(),
    }
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let m = self.metrics;

        let elapsed = if self.started { m.elapsed_secs } else { 0.0 };
        let label = |text: &'static str| Span::styled(text, Style::default().fg(colors.fg()));

        let lines = vec![
            Line::from(vec![
                label("WPM:      "),
                Span::styled(m.wpm.to_string(), Style::default().fg(colors.accent())),
            ]),
            Line::from(vec![
                label("Accuracy: "),
                Span::styled(
                    format!("{}%", m.accuracy),
                    Style::default().fg(if m.accuracy >= 95 {
                        colors.success()
                    } else if m.accuracy >= 85 {
                        colors.warning()
                    } else {
                        colors.error()
                    }),
                ),
            ]),
            Line::from(vec![
                label("Mistakes: "),
                Span::styled(m.mistakes.to_string(), Style::default().fg(colors.error())),
            ]),
            Line::from(vec![
                label("Progress: "),
                Span::styled(format!("{}%", m.progress), Style::default().fg(colors.accent())),
            ]),
            Line::from(vec![
                label("Time:     "),
                Span::styled(format!("{elapsed:.1}s"), Style::default().fg(colors.fg())),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Best:     "),
                Span::styled(
                    format_best(self.best_wpm, self.new_best),
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        let block = Block::bordered()
            .title(" Stats ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_best() {
        assert_eq!(format_best(0, false), "\u{2014}");
        assert_eq!(format_best(0, true), "\u{2014}");
        assert_eq!(format_best(72, false), "72");
        assert_eq!(format_best(72, true), "72 \u{2728}");
    }
}
