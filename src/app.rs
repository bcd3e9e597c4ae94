use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::generator::phrase::{Difficulty, PhraseBank};
use crate::session::result::ResultEntry;
use crate::session::state::{CompletionEvent, Session};
use crate::session::ticker::TickToken;
use crate::store::ranking::RankingStore;
use crate::ui::theme::Theme;

/// Number of leaderboard rows shown on screen.
pub const LEADERBOARD_ROWS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMessage {
    Type(char),
    Backspace,
    Restart,
    Next,
    CycleDifficulty,
    CycleTheme,
    RequestClear,
    ConfirmClear,
    CancelClear,
    Export,
    Tick(Instant),
    Quit,
}

/// The most recent completed run, kept for the result panel.
#[derive(Clone, Debug)]
pub struct LastRun {
    pub event: CompletionEvent,
    pub new_best: bool,
}

pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub session: Session,
    pub ranking: RankingStore,
    pub difficulty: Difficulty,
    pub last_run: Option<LastRun>,
    pub confirm_clear: bool,
    pub status: String,
    pub export_path: PathBuf,
    pub should_quit: bool,
    typed: String,
    phrases: PhraseBank,
    tick: Option<TickToken>,
    celebrate: bool,
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config, ranking: RankingStore, mut phrases: PhraseBank) -> Self {
        let difficulty = config.difficulty();
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        });
        let session = Session::new(phrases.sample(difficulty));

        Self {
            config,
            theme,
            session,
            ranking,
            difficulty,
            last_run: None,
            confirm_clear: false,
            status: "Not started yet.".to_string(),
            export_path: PathBuf::from("leaderboard.json"),
            should_quit: false,
            typed: String::new(),
            phrases,
            tick: None,
            celebrate: false,
            config_path: None,
        }
    }

    /// Write difficulty and theme changes back to `path`. `None` keeps them
    /// in memory only.
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// True once after a perfect run; the caller plays the celebration.
    pub fn take_celebration(&mut self) -> bool {
        std::mem::take(&mut self.celebrate)
    }

    /// Apply one message. Returns false when nothing on screen changed, which
    /// is the case for ticks outside a running session.
    pub fn dispatch(&mut self, message: AppMessage, now: Instant) -> bool {
        match message {
            AppMessage::Type(ch) => {
                if self.session.is_completed() {
                    return true;
                }
                self.typed.push(ch);
                self.submit_input(now);
            }
            AppMessage::Backspace => {
                if self.session.is_completed() {
                    return true;
                }
                if self.typed.pop().is_some() {
                    self.submit_input(now);
                }
            }
            AppMessage::Restart => self.load_phrase("Not started yet."),
            AppMessage::Next => self.load_phrase("New phrase loaded. Start typing!"),
            AppMessage::CycleDifficulty => {
                self.difficulty = self.difficulty.next();
                self.config.set_difficulty(self.difficulty);
                self.save_config();
                self.load_phrase("Not started yet.");
            }
            AppMessage::CycleTheme => {
                let next = Theme::next_name(&self.config.theme);
                if let Some(theme) = Theme::load(next) {
                    self.theme = theme;
                }
                self.config.theme = next.to_string();
                self.save_config();
            }
            AppMessage::RequestClear => self.confirm_clear = true,
            AppMessage::ConfirmClear => {
                self.ranking.clear();
                self.confirm_clear = false;
                self.status = "Leaderboard cleared.".to_string();
            }
            AppMessage::CancelClear => self.confirm_clear = false,
            AppMessage::Export => {
                self.status = match self.ranking.export_to(&self.export_path) {
                    Ok(()) => format!(
                        "Exported {} runs to {}",
                        self.ranking.entries().len(),
                        self.export_path.display()
                    ),
                    Err(e) => format!("Export failed: {e}"),
                };
            }
            AppMessage::Tick(at) => {
                let Some(token) = self.tick else {
                    return false;
                };
                if self.session.on_tick(token, at).is_none() {
                    self.tick = None;
                    return false;
                }
            }
            AppMessage::Quit => self.should_quit = true,
        }
        true
    }

    fn submit_input(&mut self, now: Instant) {
        let outcome = self.session.on_input(&self.typed, now);
        if let Some(token) = outcome.started {
            self.tick = Some(token);
            self.status = "Typing...".to_string();
        }
        if let Some(event) = outcome.completion {
            self.tick = None;
            self.complete(event);
        }
    }

    fn complete(&mut self, event: CompletionEvent) {
        let best_before = self.ranking.best_wpm();
        self.ranking
            .record_result(ResultEntry::from_completion(&event, Utc::now()));
        let new_best = self.ranking.best_wpm() > best_before;

        self.status = format!(
            "Completed! Time: {:.1}s  Speed: {} WPM  Accuracy: {}%  Mistakes: {}",
            event.metrics.elapsed_secs,
            event.metrics.wpm,
            event.metrics.accuracy,
            event.metrics.mistakes
        );
        self.celebrate = event.is_perfect;
        self.last_run = Some(LastRun { event, new_best });
    }

    fn load_phrase(&mut self, status: &str) {
        let phrase = self.phrases.sample(self.difficulty);
        self.session.load(phrase);
        self.typed.clear();
        self.tick = None;
        self.confirm_clear = false;
        self.status = status.to_string();
    }

    fn save_config(&self) {
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            tracing::warn!(error = %e, "failed to save config");
        }
    }
}

/// Translate a raw key press into an app message.
pub fn message_for_key(key: KeyEvent, confirm_clear: bool) -> Option<AppMessage> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // AltGr arrives as Control+Alt on Windows; those keys are text, not commands.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);

    if ctrl && key.code == KeyCode::Char('c') {
        return Some(AppMessage::Quit);
    }
    if confirm_clear {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(AppMessage::ConfirmClear),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(AppMessage::CancelClear)
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(AppMessage::Quit),
        KeyCode::Char('r') if ctrl => Some(AppMessage::Restart),
        KeyCode::Char('t') if ctrl => Some(AppMessage::CycleTheme),
        KeyCode::Char('l') if ctrl => Some(AppMessage::RequestClear),
        KeyCode::Char('e') if ctrl => Some(AppMessage::Export),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(ch) => Some(AppMessage::Type(ch)),
        KeyCode::Backspace => Some(AppMessage::Backspace),
        KeyCode::Enter => Some(AppMessage::Next),
        KeyCode::Tab => Some(AppMessage::CycleDifficulty),
        _ => None,
    }
}
