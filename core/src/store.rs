//! Durable progress persistence.
//!
//! RULES:
//!   - Only store.rs touches the filesystem. Everything else mutates
//!     the in-memory document through store methods.
//!   - The in-memory document is the single source of truth for the
//!     whole session; disk is never re-read mid-session.
//!   - Every mutating operation flushes synchronously. A flush writes
//!     to a temp file and renames over the target, so no reader ever
//!     observes a half-written document.
//!   - Durable I/O failures never propagate into the simulation: load
//!     degrades to a fresh default document, flush failures are
//!     logged and the session carries on from memory.

use crate::{
    error::GameResult,
    snapshot::LevelSnapshot,
    types::LevelId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// The recognized per-level settings and their defaults. After every
/// settings read the map contains exactly these keys.
pub const RECOGNIZED_SETTINGS: [(&str, bool); 4] = [
    ("music_enabled", true),
    ("sound_enabled", true),
    ("fullscreen", false),
    ("all_card_cooldown", false),
];

/// The durable document, exactly as serialized to the progress file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressDocument {
    #[serde(default)]
    pub completed_levels: BTreeSet<LevelId>,
    #[serde(default)]
    pub level_settings: BTreeMap<String, bool>,
    #[serde(default)]
    pub coins: u64,
    /// Legacy single-slot save. Populated only by pre-multi-slot
    /// documents; migrated into `saved_games` on load and cleared.
    #[serde(default)]
    pub saved_game: Option<LevelSnapshot>,
    /// Multi-slot saves, keyed by stringified level id.
    #[serde(default)]
    pub saved_games: BTreeMap<String, LevelSnapshot>,
}

pub struct ProgressStore {
    path: PathBuf,
    doc: ProgressDocument,
}

impl ProgressStore {
    /// Load the progress file at `path`. Never fails the caller: a
    /// missing or corrupt file yields a fresh default document, with
    /// a warning for the corrupt case. Legacy migration runs here,
    /// once.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<ProgressDocument>(&text) {
                Ok(doc) => doc,
                Err(err) => {
                    log::warn!(
                        "progress file {} is corrupt ({err}); starting from defaults",
                        path.display()
                    );
                    ProgressDocument::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("no progress file at {}; starting fresh", path.display());
                ProgressDocument::default()
            }
            Err(err) => {
                log::warn!(
                    "progress file {} unreadable ({err}); starting from defaults",
                    path.display()
                );
                ProgressDocument::default()
            }
        };

        let mut store = Self { path, doc };
        if store.migrate_legacy() {
            store.flush_logged();
        }
        store
    }

    /// Direct access for read-only callers (the runner's summary).
    pub fn document(&self) -> &ProgressDocument {
        &self.doc
    }

    // ── Durable write ──────────────────────────────────────────

    /// Write the document synchronously: temp file in the target
    /// directory, then an atomic rename over the real path.
    pub fn flush(&self) -> GameResult<()> {
        let text = serde_json::to_string_pretty(&self.doc)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Flush after a mutation. Failures are logged and swallowed; the
    /// in-memory document stays authoritative.
    fn flush_logged(&self) {
        if let Err(err) = self.flush() {
            log::warn!(
                "progress flush to {} failed ({err}); continuing from memory",
                self.path.display()
            );
        }
    }

    // ── Legacy migration ───────────────────────────────────────

    /// Move a populated legacy single-slot save into the multi-slot
    /// map, keyed by its own recorded level, then clear the legacy
    /// field. Idempotent: after the first run the legacy field is
    /// empty and this is a no-op. Returns whether anything moved.
    fn migrate_legacy(&mut self) -> bool {
        let Some(snapshot) = self.doc.saved_game.take() else {
            return false;
        };
        let key = snapshot.current_level.to_string();
        log::warn!("migrating legacy single-slot save into slot {key}");
        self.doc.saved_games.insert(key, snapshot);
        true
    }

    // ── Settings ───────────────────────────────────────────────

    /// The settings map, reconciled: deprecated keys purged and
    /// missing recognized keys backfilled, on every read.
    pub fn level_settings(&mut self) -> &BTreeMap<String, bool> {
        self.reconcile_settings();
        &self.doc.level_settings
    }

    pub fn level_setting(&mut self, key: &str) -> Option<bool> {
        self.reconcile_settings();
        self.doc.level_settings.get(key).copied()
    }

    /// Set a recognized setting. Writes to non-whitelisted keys are
    /// rejected no-ops. Returns whether the write was accepted.
    pub fn set_level_setting(&mut self, key: &str, value: bool) -> bool {
        if !RECOGNIZED_SETTINGS.iter().any(|(k, _)| *k == key) {
            log::warn!("rejecting write to unrecognized setting '{key}'");
            return false;
        }
        self.reconcile_settings();
        self.doc.level_settings.insert(key.to_string(), value);
        self.flush_logged();
        true
    }

    fn reconcile_settings(&mut self) {
        self.doc
            .level_settings
            .retain(|key, _| RECOGNIZED_SETTINGS.iter().any(|(k, _)| *k == key.as_str()));
        for (key, default) in RECOGNIZED_SETTINGS {
            self.doc
                .level_settings
                .entry(key.to_string())
                .or_insert(default);
        }
    }

    // ── Currency ───────────────────────────────────────────────

    pub fn coins(&self) -> u64 {
        self.doc.coins
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.doc.coins = self.doc.coins.saturating_add(amount);
        self.flush_logged();
    }

    /// Assign the balance outright. Negative values clamp to zero.
    pub fn set_coins(&mut self, amount: i64) {
        self.doc.coins = amount.max(0) as u64;
        self.flush_logged();
    }

    /// Spend from the balance. Fails without mutation or write when
    /// the balance is insufficient.
    pub fn spend_coins(&mut self, amount: u64) -> bool {
        if amount > self.doc.coins {
            log::debug!(
                "spend of {amount} rejected, balance is {}",
                self.doc.coins
            );
            return false;
        }
        self.doc.coins -= amount;
        self.flush_logged();
        true
    }

    // ── Level progress ─────────────────────────────────────────

    pub fn complete_level(&mut self, level: LevelId) {
        self.doc.completed_levels.insert(level);
        self.doc.saved_games.remove(&level.to_string());
        self.flush_logged();
    }

    pub fn is_completed(&self, level: LevelId) -> bool {
        self.doc.completed_levels.contains(&level)
    }

    // ── Save slots ─────────────────────────────────────────────

    /// Store `snapshot` under its own level key, replacing any prior
    /// snapshot for that level.
    pub fn save_level(&mut self, snapshot: LevelSnapshot) {
        let key = snapshot.current_level.to_string();
        self.doc.saved_games.insert(key, snapshot);
        self.flush_logged();
    }

    /// The snapshot saved for `level`, if any. An embedded level id
    /// that disagrees with the slot key is logged as an integrity
    /// warning; the slot key is trusted.
    pub fn load_level(&self, level: LevelId) -> Option<&LevelSnapshot> {
        let snapshot = self.doc.saved_games.get(&level.to_string())?;
        if snapshot.current_level != level {
            log::warn!(
                "slot {} holds a snapshot claiming level {}; trusting the slot key",
                level,
                snapshot.current_level
            );
        }
        Some(snapshot)
    }

    pub fn has_saved_level(&self, level: LevelId) -> bool {
        self.doc.saved_games.contains_key(&level.to_string())
    }

    /// Delete the slot for `level` on reset/clear.
    pub fn clear_level(&mut self, level: LevelId) {
        if self.doc.saved_games.remove(&level.to_string()).is_some() {
            self.flush_logged();
        }
    }

    /// The slot to offer for "continue": most recent by snapshot
    /// timestamp, not map order. The slot key is returned, not the
    /// embedded level id.
    pub fn latest_saved_level(&self) -> Option<LevelId> {
        self.doc
            .saved_games
            .iter()
            .filter_map(|(key, snapshot)| {
                Some((key.parse::<LevelId>().ok()?, snapshot.created_at))
            })
            .max_by_key(|&(_, created_at)| created_at)
            .map(|(level, _)| level)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "progress".into());
    name.push(".tmp");
    path.with_file_name(name)
}
