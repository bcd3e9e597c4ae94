use std::time::Instant;

use crate::engine::compare::{self, CharState, SessionMetrics};
use crate::generator::phrase::Phrase;
use crate::session::ticker::{TickToken, Ticker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Phrase loaded, nothing typed yet.
    Idle,
    Running,
    /// Terminal until the next `load`.
    Completed,
}

/// Emitted once per session, on the input that reaches the phrase length.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionEvent {
    pub metrics: SessionMetrics,
    pub is_perfect: bool,
}

#[derive(Clone, Debug)]
pub struct InputOutcome {
    pub metrics: SessionMetrics,
    /// Set on the Idle -> Running transition; the display tick for this run.
    pub started: Option<TickToken>,
    pub completion: Option<CompletionEvent>,
}

pub struct Session {
    phrase: Phrase,
    typed: String,
    started_at: Option<Instant>,
    state: SessionState,
    char_states: Vec<CharState>,
    metrics: SessionMetrics,
    ticker: Ticker,
}

impl Session {
    pub fn new(phrase: Phrase) -> Self {
        let char_states = vec![CharState::Pending; phrase.len()];
        let metrics = compare::metrics_from_states(&phrase, &char_states, 0, None, Instant::now());
        Self {
            phrase,
            typed: String::new(),
            started_at: None,
            state: SessionState::Idle,
            char_states,
            metrics,
            ticker: Ticker::default(),
        }
    }

    /// Replace the phrase and discard all progress, whatever the current state.
    pub fn load(&mut self, phrase: Phrase) {
        self.ticker.cancel();
        self.char_states = vec![CharState::Pending; phrase.len()];
        self.metrics =
            compare::metrics_from_states(&phrase, &self.char_states, 0, None, Instant::now());
        self.phrase = phrase;
        self.typed.clear();
        self.started_at = None;
        self.state = SessionState::Idle;
        tracing::debug!(
            tier = self.phrase.difficulty().as_str(),
            len = self.phrase.len(),
            "session loaded"
        );
    }

    /// Feed the full text typed so far. Input after completion is ignored.
    pub fn on_input(&mut self, typed: &str, now: Instant) -> InputOutcome {
        if self.state == SessionState::Completed {
            return InputOutcome {
                metrics: self.metrics.clone(),
                started: None,
                completion: None,
            };
        }

        let mut started = None;
        if self.state == SessionState::Idle && !typed.is_empty() {
            self.started_at = Some(now);
            self.state = SessionState::Running;
            started = Some(self.ticker.arm());
            tracing::debug!("session started");
        }

        self.typed.clear();
        self.typed.push_str(typed);
        self.char_states = compare::classify(&self.phrase, typed);
        self.metrics = compare::metrics_from_states(
            &self.phrase,
            &self.char_states,
            typed.chars().count(),
            self.started_at,
            now,
        );

        let mut completion = None;
        if self.state == SessionState::Running && self.metrics.typed_chars >= self.phrase.len() {
            self.state = SessionState::Completed;
            self.ticker.cancel();
            let event = CompletionEvent {
                metrics: self.metrics.clone(),
                is_perfect: self.metrics.correct_chars == self.phrase.len(),
            };
            tracing::info!(
                wpm = event.metrics.wpm,
                accuracy = event.metrics.accuracy,
                mistakes = event.metrics.mistakes,
                perfect = event.is_perfect,
                "session completed"
            );
            completion = Some(event);
        }

        InputOutcome {
            metrics: self.metrics.clone(),
            started,
            completion,
        }
    }

    /// Refresh the live snapshot for a display tick. Returns `None` for a
    /// token from a cancelled run or once the session left `Running`.
    pub fn on_tick(&mut self, token: TickToken, now: Instant) -> Option<&SessionMetrics> {
        if self.state != SessionState::Running || !self.ticker.accepts(token) {
            return None;
        }
        self.metrics = compare::metrics_from_states(
            &self.phrase,
            &self.char_states,
            self.metrics.typed_chars,
            self.started_at,
            now,
        );
        Some(&self.metrics)
    }

    pub fn phrase(&self) -> &Phrase {
        &self.phrase
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn char_states(&self) -> &[CharState] {
        &self.char_states
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn tick_armed(&self) -> bool {
        self.ticker.is_armed()
    }
}
