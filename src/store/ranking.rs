use std::path::Path;

use crate::session::result::ResultEntry;
use crate::store::json_store::{self, KeyValueStore, MemoryStore, StoreResult};
use crate::store::schema::{self, BEST_WPM_KEY, LEADERBOARD_KEY};

/// Best score and leaderboard, cached in memory and written through to the
/// backing storage on every change.
///
/// Storage faults never reach the caller: unreadable or malformed values load
/// as zero/empty, and failed writes are logged while the in-memory state keeps
/// going.
pub struct RankingStore {
    storage: Box<dyn KeyValueStore>,
    best_wpm: u32,
    history: Vec<ResultEntry>,
}

impl RankingStore {
    pub fn open(storage: Box<dyn KeyValueStore>) -> Self {
        let best_wpm = load_best_wpm(storage.as_ref());
        let history = load_history(storage.as_ref());
        tracing::info!(best_wpm, entries = history.len(), "ranking store loaded");
        Self {
            storage,
            best_wpm,
            history,
        }
    }

    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStore::default()))
    }

    pub fn best_wpm(&self) -> u32 {
        self.best_wpm
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.history
    }

    /// Add a finished run. Entries with zero WPM still join the leaderboard
    /// but never count toward the best score.
    pub fn record_result(&mut self, entry: ResultEntry) {
        let new_best = entry.wpm > 0 && entry.wpm > self.best_wpm;
        if new_best {
            self.best_wpm = entry.wpm;
        }
        self.history.push(entry);
        schema::sort_leaderboard(&mut self.history);

        self.persist_history();
        if new_best {
            tracing::info!(best_wpm = self.best_wpm, "new best score");
            let best = self.best_wpm.to_string();
            if let Err(e) = self.storage.write(BEST_WPM_KEY, &best) {
                tracing::warn!(error = %e, "failed to persist best score");
            }
        }
    }

    pub fn top_entries(&self, n: usize) -> &[ResultEntry] {
        &self.history[..n.min(self.history.len())]
    }

    /// Wipe the leaderboard. The best score is kept.
    pub fn clear(&mut self) {
        self.history.clear();
        if let Err(e) = self.storage.remove(LEADERBOARD_KEY) {
            tracing::warn!(error = %e, "failed to remove stored leaderboard");
        }
        tracing::info!("leaderboard cleared");
    }

    pub fn export_snapshot(&self) -> Vec<ResultEntry> {
        self.history.clone()
    }

    /// Pretty-printed JSON array of the whole leaderboard.
    pub fn export_json(&self) -> StoreResult<String> {
        Ok(schema::leaderboard_to_json(&self.history)?)
    }

    pub fn export_to(&self, path: &Path) -> StoreResult<()> {
        let json = self.export_json()?;
        json_store::write_atomically(path, &json)?;
        tracing::info!(path = %path.display(), entries = self.history.len(), "leaderboard exported");
        Ok(())
    }

    fn persist_history(&mut self) {
        let result = schema::leaderboard_to_json(&self.history)
            .map_err(Into::into)
            .and_then(|json| self.storage.write(LEADERBOARD_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist leaderboard");
        }
    }
}

fn load_best_wpm(storage: &dyn KeyValueStore) -> u32 {
    match storage.read(BEST_WPM_KEY) {
        Ok(Some(raw)) => schema::parse_best_wpm(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored best score is malformed, using 0");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            tracing::warn!(error = %e, "could not read best score, using 0");
            0
        }
    }
}

fn load_history(storage: &dyn KeyValueStore) -> Vec<ResultEntry> {
    let mut history = match storage.read(LEADERBOARD_KEY) {
        Ok(Some(raw)) => schema::parse_leaderboard(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored leaderboard is malformed, starting empty");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read leaderboard, starting empty");
            Vec::new()
        }
    };
    schema::sort_leaderboard(&mut history);
    history
}
