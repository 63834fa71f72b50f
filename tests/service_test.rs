//! End-to-end tests for the history service over real stores.

use std::fs;
use std::path::PathBuf;

use tempfile::{TempDir, tempdir};

use matchbook::{
    Board, FileStore, GameRecord, GameResult, GameStore, HistoryConfig, HistoryError,
    HistoryService, MemoryStore, Players, RenameError,
};

fn record(x: &str, o: &str, result: GameResult, timestamp: i64) -> GameRecord {
    GameRecord::new(Board::new(), result, Players::new(x, o), timestamp)
}

fn win(name: &str) -> GameResult {
    GameResult::Winner(name.to_string())
}

/// Builds a file-backed service inside the given temp dir.
fn service_in(dir: &TempDir) -> HistoryService<FileStore> {
    HistoryService::new(FileStore::new(dir.path().join("history.json")))
}

#[test]
fn test_fresh_store_loads_empty() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);
    assert!(service.load().expect("Load failed").is_empty());
    assert!(service.grouped().expect("Group failed").is_empty());
}

#[test]
fn test_recorded_game_survives_reload() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);
    service
        .record_game(record("Ann", "Bo", win("Ann"), 100))
        .expect("Record failed");

    // A second service over the same path sees the same document.
    let reloaded = service_in(&dir).load().expect("Load failed");
    assert_eq!(reloaded.len(), 1);
    assert_eq!(*reloaded[0].timestamp(), 100);
    assert_eq!(*reloaded[0].result(), win("Ann"));
}

#[test]
fn test_records_kept_newest_first() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);
    service
        .record_game(record("Ann", "Bo", win("Ann"), 100))
        .expect("Record failed");
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 200))
        .expect("Record failed");

    let records = service.load().expect("Load failed");
    assert_eq!(*records[0].timestamp(), 200);
    assert_eq!(*records[1].timestamp(), 100);
}

#[test]
fn test_colliding_timestamps_bumped_past_newest() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);

    let first = service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");
    assert_eq!(*first.timestamp(), 100);

    // Same timestamp again: stored one past the newest.
    let second = service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");
    assert_eq!(*second.timestamp(), 101);

    // Even an older timestamp cannot slip under the newest.
    let third = service
        .record_game(record("Ann", "Bo", GameResult::Draw, 50))
        .expect("Record failed");
    assert_eq!(*third.timestamp(), 102);

    let timestamps: Vec<i64> = service
        .load()
        .expect("Load failed")
        .iter()
        .map(|r| *r.timestamp())
        .collect();
    assert_eq!(timestamps, [102, 101, 100]);
}

#[test]
fn test_grouped_reflects_stored_games() {
    let service = HistoryService::new(MemoryStore::new());
    // Recorded oldest first so the newest-first document lists the
    // Ann-vs-Bo games before the swapped pairing.
    service
        .record_game(record("Bo", "Ann", win("Bo"), 1))
        .expect("Record failed");
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 2))
        .expect("Record failed");
    service
        .record_game(record("Ann", "Bo", win("Ann"), 3))
        .expect("Record failed");

    let groups = service.grouped().expect("Group failed");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].title(), "Ann vs Bo");
    assert_eq!(groups[0].stats().get("Ann"), Some(&1));
    assert_eq!(groups[0].stats().get("Draws"), Some(&1));
    assert_eq!(groups[1].title(), "Bo vs Ann");
    assert_eq!(groups[1].stats().get("Bo"), Some(&1));
}

#[test]
fn test_delete_game_persists() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 200))
        .expect("Record failed");

    let remaining = service.delete_game(100).expect("Delete failed");
    assert_eq!(remaining.len(), 1);

    let reloaded = service_in(&dir).load().expect("Load failed");
    assert_eq!(reloaded.len(), 1);
    assert_eq!(*reloaded[0].timestamp(), 200);
}

#[test]
fn test_delete_all_clears_the_store() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");

    service.delete_all().expect("Delete all failed");
    assert_eq!(service.store().read_store().expect("Read failed"), None);
    assert!(service.grouped().expect("Group failed").is_empty());
    // Clearing an already-empty store succeeds.
    service.delete_all().expect("Second delete all failed");
}

#[test]
fn test_unparseable_store_reads_empty_and_recovers() {
    let dir = tempdir().expect("Temp dir failed");
    let path = dir.path().join("history.json");
    fs::write(&path, "{{{ not json").expect("Write failed");

    let service = HistoryService::new(FileStore::new(&path));
    assert!(service.load().expect("Load failed").is_empty());

    // The next write replaces the corrupt document.
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");
    assert_eq!(service.load().expect("Load failed").len(), 1);
}

#[test]
fn test_rename_persists_across_reload() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);
    service
        .record_game(record("Ann", "Bo", win("Ann"), 100))
        .expect("Record failed");

    service
        .rename_pairing("Ann vs Bo", "Anna vs Bob")
        .expect("Rename failed");

    let reloaded = service_in(&dir).load().expect("Load failed");
    assert_eq!(reloaded[0].players().x(), "Anna");
    assert_eq!(reloaded[0].players().o(), "Bob");
}

#[test]
fn test_failed_rename_leaves_store_untouched() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");
    let before = service.store().read_store().expect("Read failed");

    let err = service
        .rename_pairing("Ann vs Bo", "  ")
        .expect_err("Rename should fail");
    assert!(matches!(
        err,
        HistoryError::Rename(RenameError::EmptyTitle)
    ));

    let after = service.store().read_store().expect("Read failed");
    assert_eq!(before, after);
}

#[test]
fn test_rename_validation_order_at_service_level() {
    let service = HistoryService::new(MemoryStore::new());
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 1))
        .expect("Record failed");
    service
        .record_game(record("Cy", "Dee", GameResult::Draw, 2))
        .expect("Record failed");

    let err = service
        .rename_pairing("Ann vs Bo", "Cy vs Dee")
        .expect_err("Rename should fail");
    assert!(matches!(
        err,
        HistoryError::Rename(RenameError::DuplicateTitle { .. })
    ));

    let err = service
        .rename_pairing("Ann vs Bo", "CyDee")
        .expect_err("Rename should fail");
    assert!(matches!(
        err,
        HistoryError::Rename(RenameError::MalformedTitle { .. })
    ));
}

#[test]
fn test_compact_service_writes_single_line_documents() {
    let dir = tempdir().expect("Temp dir failed");
    let service = HistoryService::new(FileStore::new(dir.path().join("history.json")))
        .with_pretty(false);
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");

    let document = service
        .store()
        .read_store()
        .expect("Read failed")
        .expect("Document missing");
    assert!(!document.contains('\n'));
}

#[test]
fn test_pretty_is_the_default() {
    let dir = tempdir().expect("Temp dir failed");
    let service = service_in(&dir);
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");

    let document = service
        .store()
        .read_store()
        .expect("Read failed")
        .expect("Document missing");
    assert!(document.contains('\n'));
}

#[test]
fn test_from_config_uses_configured_path() {
    let dir = tempdir().expect("Temp dir failed");
    let path = dir.path().join("scores/ledger.json");
    let config = HistoryConfig::new(&path);

    let service = HistoryService::from_config(&config);
    service
        .record_game(record("Ann", "Bo", GameResult::Draw, 100))
        .expect("Record failed");

    assert_eq!(service.store().path(), path.as_path());
    assert!(path.exists());
}

#[test]
fn test_config_loaded_from_file() {
    let dir = tempdir().expect("Temp dir failed");
    let config_path = dir.path().join("matchbook.toml");
    fs::write(&config_path, "store_path = \"ledger.json\"\npretty = false\n")
        .expect("Write failed");

    let config = HistoryConfig::from_file(&config_path).expect("Config load failed");
    assert_eq!(config.store_path(), &PathBuf::from("ledger.json"));
    assert!(!*config.pretty());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempdir().expect("Temp dir failed");
    assert!(HistoryConfig::from_file(dir.path().join("absent.toml")).is_err());
}
