//! Integration test: scoring and the persistent top-10 table

use beyond::core::Difficulty;
use beyond::ranking::{calculate_score, format_elapsed, Ranking, RankingEntry, RankingStore};
use std::fs;
use tempfile::TempDir;

fn entry(name: &str, kills: u32, secs: f64) -> RankingEntry {
    RankingEntry::new(name, secs, kills, Difficulty::Normal)
}

#[test]
fn test_score_examples() {
    assert_eq!(calculate_score(5, 120.0, Difficulty::Normal), 488);
    assert_eq!(calculate_score(0, 0.0, Difficulty::Hard), 0);
    assert!(calculate_score(5, 120.0, Difficulty::Hard) < calculate_score(5, 120.0, Difficulty::Easy));
    assert_eq!(format_elapsed(125.9), "02:05");
}

#[test]
fn test_table_keeps_the_best_ten_in_order() {
    let mut ranking = Ranking::default();
    for kills in 0..15u32 {
        ranking.add(entry(&format!("p{}", kills), kills, 60.0));
    }

    assert_eq!(ranking.len(), 10);
    let scores: Vec<u64> = ranking.top().iter().map(|e| e.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{:?}", scores);
    assert_eq!(ranking.top()[0].player_name, "p14");

    // Worse than everything on a full table.
    assert_eq!(ranking.add(entry("late", 0, 999.0)), None);
    assert_eq!(ranking.len(), 10);
}

#[test]
fn test_ties_keep_the_earlier_run_first() {
    let mut ranking = Ranking::default();
    ranking.add(entry("first", 3, 30.0));
    let rank = ranking.add(entry("second", 3, 30.0));
    assert_eq!(rank, Some(1));
    assert_eq!(ranking.top()[0].player_name, "first");
}

#[test]
fn test_store_round_trip_and_clear() {
    let dir = TempDir::new().unwrap();
    let store = RankingStore::at(dir.path().join("ranking.dat"));
    assert!(!store.exists());

    let mut ranking = Ranking::default();
    ranking.add(entry("Ana", 7, 200.0));
    ranking.add(entry("Bo", 2, 50.0));
    store.save(&ranking).unwrap();
    assert!(store.exists());
    assert_eq!(store.load().unwrap(), ranking);

    ranking.clear();
    store.save(&ranking).unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_damaged_file_falls_back_to_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ranking.dat");
    let store = RankingStore::at(path.clone());

    let mut ranking = Ranking::default();
    ranking.add(entry("Ana", 7, 200.0));
    store.save(&ranking).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    assert!(store.load().is_err());
    assert!(store.load_or_default().is_empty());
}

#[test]
fn test_missing_file_is_an_empty_table() {
    let dir = TempDir::new().unwrap();
    let store = RankingStore::at(dir.path().join("nothing.dat"));
    assert!(store.load_or_default().is_empty());
}
