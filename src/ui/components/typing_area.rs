use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::compare::CharState;
use crate::session::state::Session;
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

/// Display form of a phrase character. A mistyped space is drawn as a dot so
/// the error stays visible.
fn display_char(ch: char, state: CharState) -> String {
    match (ch, state) {
        (' ', CharState::Incorrect) => "\u{00b7}".to_string(), // ·
        _ => ch.to_string(),
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let metrics = self.session.metrics();
        let show_caret = !self.session.is_completed();
        let states = self.session.char_states();

        let mut spans: Vec<Span> = self
            .session
            .phrase()
            .chars()
            .iter()
            .zip(states)
            .enumerate()
            .map(|(idx, (&ch, &state))| {
                let style = match state {
                    CharState::Correct => Style::default().fg(colors.text_correct()),
                    CharState::Incorrect => Style::default()
                        .fg(colors.text_incorrect())
                        .bg(colors.text_incorrect_bg())
                        .add_modifier(Modifier::UNDERLINED),
                    CharState::Pending if show_caret && idx == metrics.caret => Style::default()
                        .fg(colors.text_cursor_fg())
                        .bg(colors.text_cursor_bg()),
                    CharState::Pending => Style::default().fg(colors.text_pending()),
                };
                Span::styled(display_char(ch, state), style)
            })
            .collect();

        let overflow = metrics
            .typed_chars
            .saturating_sub(self.session.phrase().len());
        if overflow > 0 {
            spans.push(Span::styled(
                format!(" +{overflow}"),
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let block = Block::bordered()
            .title(format!(
                " {} phrase \u{00b7} {} chars ",
                self.session.phrase().difficulty().as_str(),
                self.session.phrase().len()
            ))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::generator::phrase::{Difficulty, Phrase};

    fn rendered_text(session: &Session, width: u16) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        TypingArea::new(session, &theme).render(area, &mut buf);
        (0..width).map(|x| buf[(x, 1)].symbol().to_string()).collect()
    }

    #[test]
    fn test_display_char_marks_wrong_space() {
        assert_eq!(display_char(' ', CharState::Incorrect), "\u{00b7}");
        assert_eq!(display_char(' ', CharState::Correct), " ");
        assert_eq!(display_char('x', CharState::Incorrect), "x");
    }

    #[test]
    fn test_renders_phrase_and_overflow_marker() {
        let mut session = Session::new(Phrase::new("hi", Difficulty::Short).unwrap());
        session.on_input("hillo", Instant::now());
        let row = rendered_text(&session, 20);
        assert!(row.contains("hi +3"), "row was {row:?}");
    }
}
