use std::time::Instant;

use crate::generator::phrase::Phrase;

/// Stand-in for elapsed time before the first keystroke, and the floor for
/// elapsed time afterwards, so rates never divide by zero.
pub const ELAPSED_EPSILON: f64 = 0.0001;

/// Characters per "word" in the WPM convention.
const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Pending,
    Correct,
    Incorrect,
}

/// Snapshot of a session at one instant. Derived, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionMetrics {
    pub typed_chars: usize,
    pub correct_chars: usize,
    /// Incorrect positions plus characters typed past the end of the phrase.
    pub mistakes: usize,
    pub elapsed_secs: f64,
    pub wpm: u32,
    pub accuracy: u32,
    pub progress: u32,
    /// Phrase index the caret sits on, clamped to the last character.
    pub caret: usize,
}

impl SessionMetrics {
    pub fn progress_ratio(&self) -> f64 {
        self.progress as f64 / 100.0
    }
}

/// Classify every phrase position against the typed text.
pub fn classify(phrase: &Phrase, typed: &str) -> Vec<CharState> {
    let mut typed_chars = typed.chars();
    phrase
        .chars()
        .iter()
        .map(|&expected| match typed_chars.next() {
            None => CharState::Pending,
            Some(actual) if actual == expected => CharState::Correct,
            Some(_) => CharState::Incorrect,
        })
        .collect()
}

/// Compute metrics for `typed` against `phrase` as of `now`.
///
/// Pure: the same inputs always produce the same snapshot, so callers may
/// re-evaluate freely (e.g. on every render tick).
pub fn evaluate(
    phrase: &Phrase,
    typed: &str,
    started_at: Option<Instant>,
    now: Instant,
) -> SessionMetrics {
    let states = classify(phrase, typed);
    metrics_from_states(phrase, &states, typed.chars().count(), started_at, now)
}

/// Same as [`evaluate`] but reuses an existing classification.
pub fn metrics_from_states(
    phrase: &Phrase,
    states: &[CharState],
    typed_chars: usize,
    started_at: Option<Instant>,
    now: Instant,
) -> SessionMetrics {
    let phrase_len = phrase.len();
    let correct_chars = count(states, CharState::Correct);
    let overflow = typed_chars.saturating_sub(phrase_len);
    let mistakes = count(states, CharState::Incorrect) + overflow;

    let elapsed_secs = match started_at {
        Some(start) => now
            .saturating_duration_since(start)
            .as_secs_f64()
            .max(ELAPSED_EPSILON),
        None => ELAPSED_EPSILON,
    };

    SessionMetrics {
        typed_chars,
        correct_chars,
        mistakes,
        elapsed_secs,
        wpm: words_per_minute(correct_chars, elapsed_secs),
        accuracy: accuracy_percent(correct_chars, typed_chars),
        progress: progress_percent(typed_chars, phrase_len),
        caret: typed_chars.min(phrase_len.saturating_sub(1)),
    }
}

fn count(states: &[CharState], wanted: CharState) -> usize {
    states.iter().filter(|&&s| s == wanted).count()
}

pub fn words_per_minute(correct_chars: usize, elapsed_secs: f64) -> u32 {
    let wpm = (correct_chars as f64 / CHARS_PER_WORD) * (60.0 / elapsed_secs);
    // `as` saturates and maps NaN to 0.
    wpm.round().max(0.0) as u32
}

pub fn accuracy_percent(correct_chars: usize, typed_chars: usize) -> u32 {
    if typed_chars == 0 {
        return 100;
    }
    (correct_chars as f64 / typed_chars as f64 * 100.0).round() as u32
}

pub fn progress_percent(typed_chars: usize, phrase_len: usize) -> u32 {
    if phrase_len == 0 {
        return 100;
    }
    ((typed_chars as f64 / phrase_len as f64 * 100.0).round() as u32).min(100)
}
