use chrono::Local;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::ResultEntry;
use crate::ui::theme::Theme;

pub struct Leaderboard<'a> {
    entries: &'a [ResultEntry],
    confirm_clear: bool,
    theme: &'a Theme,
}

impl<'a> Leaderboard<'a> {
    pub fn new(entries: &'a [ResultEntry], confirm_clear: bool, theme: &'a Theme) -> Self {
        Self {
            entries,
            confirm_clear,
            theme,
        }
    }
}

pub fn format_entry(rank: usize, entry: &ResultEntry) -> String {
    let when = entry.date.with_timezone(&Local).format("%Y-%m-%d %H:%M");
    format!(
        "{rank:>2}. {:>3} WPM \u{2014} {:>3}% \u{2014} {when}",
        entry.wpm, entry.accuracy
    )
}

impl Widget for Leaderboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut lines: Vec<Line> = Vec::new();
        if self.confirm_clear {
            lines.push(Line::from(Span::styled(
                "Clear local leaderboard? This cannot be undone. [y/n]",
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        if self.entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "No runs yet. Complete a phrase to add your score.",
                Style::default().fg(colors.text_pending()),
            )));
        } else {
            for (i, entry) in self.entries.iter().enumerate() {
                let style = if i == 0 {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                lines.push(Line::from(Span::styled(format_entry(i + 1, entry), style)));
            }
        }

        let block = Block::bordered()
            .title(" Leaderboard ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
