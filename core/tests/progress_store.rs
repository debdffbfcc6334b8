//! Progress store tests — currency, settings reconciliation, legacy
//! migration, durable round-trips.

use garden_core::{
    builder,
    sim::SimulationState,
    store::{ProgressDocument, ProgressStore},
};
use std::fs;
use std::path::PathBuf;

/// A unique throwaway progress path per test.
fn temp_progress_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "garden-progress-{tag}-{}.json",
        std::process::id()
    ))
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_file(path);
}

/// spend succeeds iff the balance covers it; failure leaves the
/// balance untouched.
#[test]
fn spend_succeeds_iff_balance_covers_it() {
    let path = temp_progress_path("spend");
    cleanup(&path);
    let mut store = ProgressStore::load(&path);

    store.set_coins(100);
    assert!(store.spend_coins(60), "60 <= 100 should succeed");
    assert_eq!(store.coins(), 40);

    assert!(!store.spend_coins(50), "50 > 40 should fail");
    assert_eq!(store.coins(), 40, "failed spend must not mutate");

    assert!(store.spend_coins(40));
    assert_eq!(store.coins(), 0);
    cleanup(&path);
}

/// Negative assignment clamps to zero.
#[test]
fn set_coins_clamps_negative_to_zero() {
    let path = temp_progress_path("clamp");
    cleanup(&path);
    let mut store = ProgressStore::load(&path);

    store.set_coins(-5);
    assert_eq!(store.coins(), 0);

    store.set_coins(7);
    assert_eq!(store.coins(), 7);
    cleanup(&path);
}

/// A missing file yields a default document without failing.
#[test]
fn missing_file_defaults() {
    let path = temp_progress_path("missing");
    cleanup(&path);
    let store = ProgressStore::load(&path);
    assert_eq!(store.coins(), 0);
    assert!(store.document().completed_levels.is_empty());
    assert!(store.document().saved_games.is_empty());
}

/// A corrupt file yields a default document without failing.
#[test]
fn corrupt_file_defaults() {
    let path = temp_progress_path("corrupt");
    fs::write(&path, "{ not json at all").unwrap();
    let store = ProgressStore::load(&path);
    assert_eq!(store.coins(), 0);
    assert!(store.document().saved_games.is_empty());
    cleanup(&path);
}

/// Mutations flush synchronously; a second store opened on the same
/// path sees them.
#[test]
fn mutations_survive_reload() {
    let path = temp_progress_path("reload");
    cleanup(&path);

    let mut store = ProgressStore::load(&path);
    store.set_coins(250);
    store.complete_level(1);
    store.complete_level(2);
    store.set_level_setting("music_enabled", false);
    drop(store);

    let mut reopened = ProgressStore::load(&path);
    assert_eq!(reopened.coins(), 250);
    assert!(reopened.is_completed(1));
    assert!(reopened.is_completed(2));
    assert!(!reopened.is_completed(3));
    assert_eq!(reopened.level_setting("music_enabled"), Some(false));
    cleanup(&path);
}

/// A legacy single-slot save moves into saved_games keyed by its own
/// recorded level, and the legacy field is cleared. Re-running the
/// migration is a no-op.
#[test]
fn legacy_single_slot_migrates_once() {
    let path = temp_progress_path("legacy");
    cleanup(&path);

    let mut sim = SimulationState::new(3);
    sim.sun = 275;
    let snapshot = builder::build(&sim).unwrap();

    let legacy_doc = ProgressDocument {
        coins: 30,
        saved_game: Some(snapshot),
        ..ProgressDocument::default()
    };
    fs::write(&path, serde_json::to_string(&legacy_doc).unwrap()).unwrap();

    let store = ProgressStore::load(&path);
    assert!(store.document().saved_game.is_none(), "legacy field cleared");
    let migrated = store
        .document()
        .saved_games
        .get("3")
        .expect("slot 3 populated by migration");
    assert_eq!(migrated.current_level, 3);
    assert_eq!(migrated.sun, 275);
    assert_eq!(store.coins(), 30);
    drop(store);

    // Second load runs the migration path again over the flushed
    // document: nothing changes.
    let store = ProgressStore::load(&path);
    assert!(store.document().saved_game.is_none());
    assert_eq!(store.document().saved_games.len(), 1);
    assert_eq!(store.document().saved_games.get("3").unwrap().sun, 275);
    cleanup(&path);
}

/// Settings reads purge deprecated keys and backfill missing
/// recognized keys with defaults.
#[test]
fn settings_reconciled_on_read() {
    let path = temp_progress_path("settings");
    cleanup(&path);

    let mut doc = ProgressDocument::default();
    doc.level_settings.insert("hardcore_mode".into(), true);
    doc.level_settings.insert("music_enabled".into(), false);
    fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let mut store = ProgressStore::load(&path);
    let settings = store.level_settings();
    assert!(
        !settings.contains_key("hardcore_mode"),
        "deprecated key purged"
    );
    assert_eq!(
        settings.get("all_card_cooldown"),
        Some(&false),
        "missing recognized key backfilled with its default"
    );
    assert_eq!(
        settings.get("music_enabled"),
        Some(&false),
        "recognized keys keep their stored value"
    );
    assert_eq!(settings.len(), 4, "exactly the recognized keys remain");
    cleanup(&path);
}

/// Writes to non-whitelisted keys are rejected no-ops.
#[test]
fn unrecognized_setting_write_rejected() {
    let path = temp_progress_path("badkey");
    cleanup(&path);
    let mut store = ProgressStore::load(&path);

    assert!(!store.set_level_setting("hardcore_mode", true));
    assert_eq!(store.level_setting("hardcore_mode"), None);

    assert!(store.set_level_setting("fullscreen", true));
    assert_eq!(store.level_setting("fullscreen"), Some(true));
    cleanup(&path);
}

/// Completing a level clears its save slot.
#[test]
fn completing_level_clears_slot() {
    let path = temp_progress_path("complete");
    cleanup(&path);
    let mut store = ProgressStore::load(&path);

    let snapshot = builder::build(&SimulationState::new(5)).unwrap();
    store.save_level(snapshot);
    assert!(store.has_saved_level(5));

    store.complete_level(5);
    assert!(store.is_completed(5));
    assert!(!store.has_saved_level(5), "slot deleted on completion");
    cleanup(&path);
}

/// Saving a level replaces any prior snapshot for the same slot.
#[test]
fn save_replaces_prior_slot() {
    let path = temp_progress_path("replace");
    cleanup(&path);
    let mut store = ProgressStore::load(&path);

    let mut sim = SimulationState::new(4);
    sim.sun = 100;
    store.save_level(builder::build(&sim).unwrap());
    sim.sun = 999;
    store.save_level(builder::build(&sim).unwrap());

    assert_eq!(store.load_level(4).unwrap().sun, 999);
    assert_eq!(store.document().saved_games.len(), 1);
    cleanup(&path);
}

/// "Continue" offers the most recent slot by timestamp, not the
/// lowest level number.
#[test]
fn latest_saved_level_is_most_recent_by_timestamp() {
    let path = temp_progress_path("latest");
    cleanup(&path);
    let mut store = ProgressStore::load(&path);

    let mut older = builder::build(&SimulationState::new(9)).unwrap();
    older.created_at = chrono::Utc::now() - chrono::Duration::hours(2);
    let newer = builder::build(&SimulationState::new(2)).unwrap();

    store.save_level(older);
    store.save_level(newer);

    assert_eq!(
        store.latest_saved_level(),
        Some(2),
        "level 2 was saved most recently"
    );
    cleanup(&path);
}
