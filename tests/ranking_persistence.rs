use std::fs;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use phrasedash::generator::phrase::{Difficulty, Phrase};
use phrasedash::session::result::ResultEntry;
use phrasedash::session::state::Session;
use phrasedash::store::json_store::JsonStore;
use phrasedash::store::ranking::RankingStore;
use phrasedash::store::schema::LEADERBOARD_CAP;
use tempfile::TempDir;

fn open(dir: &TempDir) -> RankingStore {
    let storage = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    RankingStore::open(Box::new(storage))
}

fn entry(wpm: u32, day: u32) -> ResultEntry {
    ResultEntry {
        wpm,
        accuracy: 90,
        time: 4.5,
        date: Utc.with_ymd_and_hms(2024, 1, day, 9, 30, 0).unwrap(),
    }
}

#[test]
fn results_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        store.record_result(entry(48, 1));
        store.record_result(entry(61, 2));
    }
    let store = open(&dir);
    assert_eq!(store.best_wpm(), 61);
    let wpms: Vec<u32> = store.entries().iter().map(|e| e.wpm).collect();
    assert_eq!(wpms, vec![61, 48]);
}

#[test]
fn files_use_documented_format() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.record_result(entry(52, 3));

    let best = fs::read_to_string(dir.path().join("best_wpm.json")).unwrap();
    assert_eq!(best.trim(), "52");

    let raw = fs::read_to_string(dir.path().join("leaderboard.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["wpm"], 52);
    assert_eq!(first["accuracy"], 90);
    assert_eq!(first["time"], 4.5);
    assert_eq!(first["date"], "2024-01-03T09:30:00Z");
}

#[test]
fn reads_leaderboard_written_by_the_browser_widget() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("best_wpm.json"), "77").unwrap();
    fs::write(
        dir.path().join("leaderboard.json"),
        r#"[{"wpm":77,"accuracy":98,"time":5.2,"date":"2024-02-10T18:22:41.512Z"}]"#,
    )
    .unwrap();
    let store = open(&dir);
    assert_eq!(store.best_wpm(), 77);
    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.entries()[0].accuracy, 98);
}

#[test]
fn corrupt_files_reset_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("best_wpm.json"), "\u{0}\u{1}garbage").unwrap();
    fs::write(dir.path().join("leaderboard.json"), "[{\"wpm\":").unwrap();
    let mut store = open(&dir);
    assert_eq!(store.best_wpm(), 0);
    assert!(store.entries().is_empty());

    // The store keeps working and overwrites the bad data.
    store.record_result(entry(30, 4));
    let reopened = open(&dir);
    assert_eq!(reopened.best_wpm(), 30);
    assert_eq!(reopened.entries().len(), 1);
}

#[test]
fn leaderboard_never_exceeds_cap_and_stays_sorted() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    for i in 0..(LEADERBOARD_CAP as u32 * 2) {
        store.record_result(entry((i * 37) % 120, 1 + i % 28));
        let top = store.top_entries(LEADERBOARD_CAP);
        assert!(top.len() <= LEADERBOARD_CAP);
        assert!(top.windows(2).all(|w| w[0].wpm >= w[1].wpm));
    }
    let reopened = open(&dir);
    assert_eq!(reopened.entries().len(), LEADERBOARD_CAP);
}

#[test]
fn clear_wipes_history_but_keeps_best() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.record_result(entry(66, 5));
    store.clear();
    assert!(store.entries().is_empty());
    assert_eq!(store.best_wpm(), 66);
    assert!(!dir.path().join("leaderboard.json").exists());

    let reopened = open(&dir);
    assert!(reopened.entries().is_empty());
    assert_eq!(reopened.best_wpm(), 66);
}

#[test]
fn zero_wpm_run_is_listed_but_not_best() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.record_result(ResultEntry {
        wpm: 0,
        accuracy: 100,
        time: 1.0,
        date: Utc::now(),
    });
    assert_eq!(store.entries().len(), 1);
    assert_eq!(store.best_wpm(), 0);
    assert!(!dir.path().join("best_wpm.json").exists());
}

#[test]
fn completed_session_flows_into_store() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let mut session = Session::new(Phrase::new("Practice daily.", Difficulty::Short).unwrap());
    let t0 = Instant::now();
    session.on_input("P", t0);
    let event = session
        .on_input("Practice daily.", t0 + Duration::from_secs(3))
        .completion
        .unwrap();
    store.record_result(ResultEntry::from_completion(&event, Utc::now()));

    // 15 correct chars = 3 words in 3 seconds -> 60 wpm
    assert_eq!(store.best_wpm(), 60);
    let exported = store.export_json().unwrap();
    let parsed: Vec<ResultEntry> = serde_json::from_str(&exported).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].wpm, 60);
}

#[test]
fn export_to_file_matches_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.record_result(entry(40, 6));
    store.record_result(entry(45, 7));
    let path = dir.path().join("export.json");
    store.export_to(&path).unwrap();
    let parsed: Vec<ResultEntry> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, store.export_snapshot());
}

#[test]
fn one_bad_row_does_not_cost_the_others() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("leaderboard.json"),
        r#"[{"wpm":70,"accuracy":99,"time":3.0,"date":"2024-05-01T10:00:00Z"},
            {"wpm":65,"accuracy":95,"time":3.4,"date":"01/05/2024"},
            {"wpm":50,"accuracy":91,"time":4.0,"date":"2024-04-30T10:00:00Z"}]"#,
    )
    .unwrap();
    let mut store = open(&dir);
    assert_eq!(store.entries().len(), 2);

    store.record_result(entry(58, 8));
    let reopened = open(&dir);
    let wpms: Vec<u32> = reopened.entries().iter().map(|e| e.wpm).collect();
    assert_eq!(wpms, vec![70, 58, 50]);
}
