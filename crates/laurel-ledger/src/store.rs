//! File-backed persistence for the ledger.
//!
//! One JSON document per deployment. Loading never fails: a missing or
//! unreadable file yields an empty ledger so the service starts over rather
//! than crashing. Saves rewrite the whole document; last full write wins,
//! concurrent writers are not supported.

use crate::record::{ActivityRecord, Ledger, MemberId};
use crate::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Suffix the original deployment used to co-mingle cooldown stamps with
/// counts in one map. Only the legacy importer knows about it.
const LEGACY_TIME_SUFFIX: &str = "_time";

/// JSON file store for the ledger.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger, degrading to empty on any problem.
    ///
    /// Files written by the original deployment (the `{"daily": {...}}`
    /// layout with `_time` suffix keys) are imported transparently.
    pub fn load(&self) -> Ledger {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No ledger at {:?}, starting empty", self.path);
                return Ledger::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read ledger {:?}: {}, starting empty", self.path, e);
                return Ledger::new();
            }
        };

        match serde_json::from_str::<Ledger>(&raw) {
            Ok(ledger) => ledger,
            Err(_) => match import_legacy(&raw) {
                Some(ledger) => {
                    tracing::info!("Imported legacy ledger layout from {:?}", self.path);
                    ledger
                }
                None => {
                    tracing::warn!("Corrupt ledger at {:?}, starting empty", self.path);
                    Ledger::new()
                }
            },
        }
    }

    /// Persist the whole ledger.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(ledger)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Parse the original bot's data file: counts and `<id>_time` cooldown
/// stamps interleaved in one per-day map under a top-level `"daily"` key.
fn import_legacy(raw: &str) -> Option<Ledger> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let daily = value.get("daily")?.as_object()?;

    let mut ledger = Ledger::new();
    for (day_key, members) in daily {
        let day: NaiveDate = day_key.parse().ok()?;
        let members = members.as_object()?;
        for (key, count) in members {
            if key.ends_with(LEGACY_TIME_SUFFIX) {
                continue;
            }
            let count = count.as_u64()?;
            let stamp = members
                .get(&format!("{key}{LEGACY_TIME_SUFFIX}"))
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as i64;
            ledger.insert(
                day,
                MemberId::new(key.clone()),
                ActivityRecord {
                    count,
                    last_counted_at: stamp,
                },
            );
        }
    }
    Some(ledger)
}
