use crate::session::result::ResultEntry;

/// Storage key for the best WPM ever recorded (a bare JSON integer).
pub const BEST_WPM_KEY: &str = "best_wpm";

/// Storage key for the leaderboard (a JSON array of [`ResultEntry`]).
pub const LEADERBOARD_KEY: &str = "leaderboard";

/// Maximum number of leaderboard entries kept.
pub const LEADERBOARD_CAP: usize = 50;

pub fn parse_best_wpm(raw: &str) -> serde_json::Result<u32> {
    serde_json::from_str(raw)
}

/// Parse the stored leaderboard. The document must be a JSON array; entries
/// inside it that do not parse are skipped so one bad row cannot wipe the rest.
pub fn parse_leaderboard(raw: &str) -> serde_json::Result<Vec<ResultEntry>> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let total = rows.len();
    let entries: Vec<ResultEntry> = rows
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();
    if entries.len() < total {
        tracing::warn!(
            skipped = total - entries.len(),
            kept = entries.len(),
            "dropped malformed leaderboard entries"
        );
    }
    Ok(entries)
}

pub fn leaderboard_to_json(entries: &[ResultEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// Best WPM first; among equal WPM the most recent run wins.
pub fn sort_leaderboard(entries: &mut Vec<ResultEntry>) {
    entries.sort_by(|a, b| b.wpm.cmp(&a.wpm).then_with(|| b.date.cmp(&a.date)));
    entries.truncate(LEADERBOARD_CAP);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(wpm: u32, date: &str) -> ResultEntry {
        ResultEntry {
            wpm,
            accuracy: 100,
            time: 1.0,
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn test_best_wpm_accepts_bare_integer() {
        assert_eq!(parse_best_wpm("73").unwrap(), 73);
        assert_eq!(parse_best_wpm(" 73\n").unwrap(), 73);
        assert!(parse_best_wpm("-4").is_err());
        assert!(parse_best_wpm("fast").is_err());
    }

    #[test]
    fn test_leaderboard_rejects_garbage() {
        assert!(parse_leaderboard("{not json").is_err());
        assert!(parse_leaderboard(r#"{"wpm": 3}"#).is_err());
        assert!(parse_leaderboard("[]").unwrap().is_empty());
    }

    #[test]
    fn test_leaderboard_skips_only_bad_rows() {
        let raw = r#"[
            {"wpm": 61, "accuracy": 97, "time": 4.1, "date": "2024-03-02T08:00:00Z"},
            {"wpm": 55, "accuracy": 90, "time": 5.0, "date": "last tuesday"},
            {"wpm": "fast"},
            {"wpm": 48, "accuracy": 88, "time": 6.3, "date": "2024-03-01T08:00:00.250Z"}
        ]"#;
        let entries = parse_leaderboard(raw).unwrap();
        let wpms: Vec<u32> = entries.iter().map(|e| e.wpm).collect();
        assert_eq!(wpms, vec![61, 48]);
    }

    #[test]
    fn test_sort_orders_by_wpm_then_newest() {
        let mut entries = vec![
            entry(40, "2024-01-01T00:00:00Z"),
            entry(60, "2024-01-01T00:00:00Z"),
            entry(40, "2024-02-01T00:00:00Z"),
        ];
        sort_leaderboard(&mut entries);
        let order: Vec<(u32, u32)> = entries
            .iter()
            .map(|e| (e.wpm, chrono::Datelike::month(&e.date)))
            .collect();
        assert_eq!(order, vec![(60, 1), (40, 2), (40, 1)]);
    }

    #[test]
    fn test_sort_truncates_to_cap() {
        let mut entries: Vec<ResultEntry> = (0..70)
            .map(|i| entry(i, "2024-01-01T00:00:00Z"))
            .collect();
        sort_leaderboard(&mut entries);
        assert_eq!(entries.len(), LEADERBOARD_CAP);
        assert_eq!(entries[0].wpm, 69);
        assert_eq!(entries[LEADERBOARD_CAP - 1].wpm, 20);
    }
}
