//! Ledger data model: per-day, per-member activity records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque member handle supplied by the platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Activity for one (member, day) pair.
///
/// `count` and the cooldown stamp live in one record; the old layout that
/// spread them across suffixed map keys is gone (the store still imports it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Qualifying messages counted so far today.
    pub count: u64,
    /// Unix seconds of the last counted message, checked by the rate gate.
    pub last_counted_at: i64,
}

/// Per-day, per-member activity counters.
///
/// At most one [`ActivityRecord`] per (day, member). Serializes as
/// `{ "YYYY-MM-DD": { "<member>": { "count": n, "last_counted_at": ts } } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    days: BTreeMap<NaiveDate, BTreeMap<MemberId, ActivityRecord>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a qualifying message: create-or-increment the record and stamp
    /// the cooldown time. Returns the new count.
    ///
    /// The caller must have consulted the rate gate first; this method
    /// unconditionally counts.
    pub fn record(&mut self, day: NaiveDate, member: MemberId, now: i64) -> u64 {
        let entry = self
            .days
            .entry(day)
            .or_default()
            .entry(member)
            .or_insert(ActivityRecord {
                count: 0,
                last_counted_at: now,
            });
        entry.count += 1;
        entry.last_counted_at = now;
        entry.count
    }

    /// The record for a (day, member), if any.
    pub fn get(&self, day: NaiveDate, member: &MemberId) -> Option<&ActivityRecord> {
        self.days.get(&day)?.get(member)
    }

    /// Insert a record wholesale (used by the store's legacy importer).
    pub fn insert(&mut self, day: NaiveDate, member: MemberId, record: ActivityRecord) {
        self.days.entry(day).or_default().insert(member, record);
    }

    /// Today's count for a member, 0 when absent.
    pub fn count_for(&self, day: NaiveDate, member: &MemberId) -> u64 {
        self.get(day, member).map_or(0, |r| r.count)
    }

    /// All records for one day.
    pub fn day(&self, day: NaiveDate) -> Option<&BTreeMap<MemberId, ActivityRecord>> {
        self.days.get(&day)
    }

    /// Drop whole days strictly older than `cutoff`. Returns days dropped.
    pub fn prune_before(&mut self, cutoff: NaiveDate) -> usize {
        let keep = self.days.split_off(&cutoff);
        let dropped = self.days.len();
        self.days = keep;
        dropped
    }

    /// Iterate days, ascending.
    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &BTreeMap<MemberId, ActivityRecord>)> {
        self.days.iter()
    }

    /// Number of days tracked.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
