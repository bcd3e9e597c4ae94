use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::state::CompletionEvent;

/// One finished run as stored on the leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub wpm: u32,
    pub accuracy: u32,
    /// Elapsed seconds.
    pub time: f64,
    pub date: DateTime<Utc>,
}

impl ResultEntry {
    pub fn from_completion(event: &CompletionEvent, date: DateTime<Utc>) -> Self {
        Self {
            wpm: event.metrics.wpm,
            accuracy: event.metrics.accuracy.min(100),
            time: event.metrics.elapsed_secs,
            date,
        }
    }
}
