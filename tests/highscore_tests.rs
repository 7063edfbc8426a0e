//! Highscore table invariants and the store's load/persist/reset flow.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use greenwave::config::GameConfig;
use greenwave::highscore::remote::parse_fetch_body;
use greenwave::highscore::store::HighscoreStore;
use greenwave::highscore::{HighscoreEntry, HighscoreTable};

fn temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("greenwave-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn config_in(dir: &PathBuf) -> GameConfig {
    let mut config = GameConfig::default();
    config.base_dir = dir.clone();
    config.upload_enabled = false;
    config
}

fn entry(name: &str, score: i64) -> HighscoreEntry {
    HighscoreEntry::new(name, Vec::new(), score)
}

fn assert_row_invariant(row: &[HighscoreEntry], size: usize) {
    assert_eq!(row.len(), size, "row always holds exactly {size} slots");
    for pair in row.windows(2) {
        assert!(pair[0].score >= pair[1].score, "row sorted descending");
    }
    if let Some(idx) = row.iter().position(HighscoreEntry::is_sentinel) {
        assert!(
            row[idx..].iter().all(HighscoreEntry::is_sentinel),
            "sentinels only after all real entries"
        );
    }
}

#[test]
fn invariant_holds_across_a_burst_of_inserts() {
    let mut table = HighscoreTable::new(5);
    for score in [300, 100, 500, 200, 400, 250, 50, 600, 350] {
        table.insert("cross", entry(&format!("p{score}"), score));
        assert_row_invariant(table.entries("cross").unwrap(), 5);
    }
    let scores: Vec<i64> = table
        .entries("cross")
        .unwrap()
        .iter()
        .map(|e| e.score)
        .collect();
    assert_eq!(scores, vec![600, 500, 400, 350, 300]);
}

#[test]
fn beating_one_slot_drops_the_previous_last_entry() {
    let mut table = HighscoreTable::new(3);
    table.insert("cross", entry("high", 300));
    table.insert("cross", entry("mid", 200));
    table.insert("cross", entry("low", 100));

    let rank = table.insert("cross", entry("new", 150));
    assert_eq!(rank, Some(2));
    let names: Vec<&str> = table
        .entries("cross")
        .unwrap()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["high", "mid", "new"], "previous last entry dropped");
}

#[test]
fn tied_score_keeps_earlier_holder_ahead() {
    let mut table = HighscoreTable::new(30);
    table.insert("cross", entry("first", 9900));
    table.insert("cross", entry("second", 9900));
    let row = table.entries("cross").unwrap();
    assert_eq!(row[0].name, "first");
    assert_eq!(row[1].name, "second");
    assert_row_invariant(row, 30);
}

#[test]
fn categories_rank_independently() {
    let mut table = HighscoreTable::new(30);
    table.insert("cross", entry("ada", 9900));
    table.insert("square", entry("bob", 900));
    assert_eq!(table.entries("cross").unwrap()[0].name, "ada");
    assert_eq!(table.entries("square").unwrap()[0].name, "bob");
    assert!(table.entries("DRT").is_none());
}

#[test]
fn server_body_loads_into_a_normalized_table() {
    let body = "cross ada,junction0_30.00,9900:bob,,9500\nsquare carol,,900\n";
    let rows = parse_fetch_body(body, 30).expect("parse server body");
    let table = HighscoreTable::from_rows(30, rows);
    let cross = table.entries("cross").unwrap();
    assert_row_invariant(cross, 30);
    assert_eq!(cross[0].switch_trace, vec!["junction0", "30.00"]);
    assert_row_invariant(table.entries("square").unwrap(), 30);
}

#[test]
fn store_full_cycle_persist_reload_reset() {
    let dir = temp_dir("cycle");
    let config = config_in(&dir);
    let store = HighscoreStore::new(&config);

    // Seed a reference file the reset can fall back to.
    let mut ref_rows = BTreeMap::new();
    ref_rows.insert("cross".to_string(), vec![entry("reference", 100)]);
    let ref_table = HighscoreTable::from_rows(config.table_size, ref_rows);
    let ref_payload = serde_json::json!({ "categories": ref_table.categories() });
    fs::write(
        config.ref_score_file(),
        serde_json::to_string_pretty(&ref_payload).unwrap(),
    )
    .expect("write reference file");

    let mut table = store.load();
    assert_eq!(
        table.entries("cross").unwrap()[0].name,
        "reference",
        "no local file yet, reference seeds the load"
    );

    table.insert("cross", entry("player", 9900));
    store.persist(&table).expect("persist");

    let reloaded = store.load();
    let row = reloaded.entries("cross").unwrap();
    assert_eq!(row[0].name, "player");
    assert_eq!(row[1].name, "reference");
    assert_row_invariant(row, config.table_size);

    let mut reloaded = reloaded;
    store.reset(&mut reloaded);
    assert_eq!(
        reloaded.entries("cross").unwrap()[0].name,
        "reference",
        "reset reseeds from the reference file"
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn persist_failure_reports_a_typed_reason() {
    let mut config = GameConfig::default();
    config.base_dir = PathBuf::from("/nonexistent-greenwave-dir");
    config.upload_enabled = false;
    let store = HighscoreStore::new(&config);
    let table = HighscoreTable::new(config.table_size);
    let err = store.persist(&table).expect_err("write must fail");
    assert!(err.to_string().contains("cannot write"));
}
