use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::LastRun;
use crate::ui::theme::Theme;

/// Summary of the run that just completed.
pub struct ResultPanel<'a> {
    run: &'a LastRun,
    theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(run: &'a LastRun, theme: &'a Theme) -> Self {
        Self { run, theme }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let m = &self.run.event.metrics;

        let (headline, headline_color) = if self.run.event.is_perfect {
            ("\u{2728} Perfect run! \u{2728}", colors.success())
        } else {
            ("\u{2705} Completed!", colors.accent())
        };

        let mut lines = vec![
            Line::from(Span::styled(
                headline,
                Style::default()
                    .fg(headline_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Time: {:.1}s   Speed: {} WPM   Accuracy: {}%   Mistakes: {}",
                m.elapsed_secs, m.wpm, m.accuracy, m.mistakes
            )),
        ];
        if self.run.new_best {
            lines.push(Line::from(Span::styled(
                "New best score!",
                Style::default().fg(colors.warning()),
            )));
        }
        lines.push(Line::from(Span::styled(
            "[Enter] next phrase",
            Style::default().fg(colors.text_pending()),
        )));

        let border = if self.run.event.is_perfect {
            colors.success()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(" Result ")
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
