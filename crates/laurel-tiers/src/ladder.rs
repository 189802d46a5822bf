//! Tier ladder: ordered threshold table and tier resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque platform role handle.
///
/// The engine never interprets the contents; it only compares handles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One rung of the activity ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Platform role granted at this rung.
    pub role: RoleId,
    /// Minimum qualifying message count for the day.
    pub threshold: u64,
    /// Human-readable name, used in notices.
    pub label: String,
}

/// Errors from ladder construction.
#[derive(Debug, Error)]
pub enum LadderError {
    /// Thresholds must be strictly ascending (which also forbids duplicates).
    #[error("tier thresholds must be strictly ascending: {prev} then {next}")]
    NotAscending { prev: u64, next: u64 },

    /// Two rungs may not grant the same role.
    #[error("duplicate role in ladder: {0}")]
    DuplicateRole(RoleId),
}

/// Ordered table of tiers, strictly ascending by threshold.
///
/// Fixed at construction; the engine never mutates a ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierLadder {
    tiers: Vec<Tier>,
}

impl TierLadder {
    /// Build a ladder, validating the ascending-threshold invariant.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, LadderError> {
        for pair in tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(LadderError::NotAscending {
                    prev: pair[0].threshold,
                    next: pair[1].threshold,
                });
            }
        }
        for (i, tier) in tiers.iter().enumerate() {
            if tiers[..i].iter().any(|t| t.role == tier.role) {
                return Err(LadderError::DuplicateRole(tier.role.clone()));
            }
        }
        Ok(Self { tiers })
    }

    /// The stock five-rung ladder from the original deployment.
    ///
    /// Role handles are placeholders; a real deployment supplies its own
    /// ladder through configuration.
    pub fn default_five() -> Self {
        let tiers = [(5, "lv1"), (15, "lv2"), (30, "lv3"), (50, "lv4"), (80, "lv5")]
            .iter()
            .enumerate()
            .map(|(i, (threshold, role))| Tier {
                role: RoleId::new(*role),
                threshold: *threshold,
                label: format!("Active Lv.{}", i + 1),
            })
            .collect();
        // Static table, known-valid.
        Self { tiers }
    }

    /// Resolve a daily count to the highest qualifying tier, if any.
    ///
    /// Scans from the top of the ladder down and returns the first rung
    /// whose threshold is met, so a count satisfying several rungs maps to
    /// exactly one tier.
    pub fn resolve(&self, count: u64) -> Option<&Tier> {
        self.tiers.iter().rev().find(|t| count >= t.threshold)
    }

    /// All rungs, ascending by threshold.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Whether a role belongs to this ladder.
    pub fn contains(&self, role: &RoleId) -> bool {
        self.tiers.iter().any(|t| &t.role == role)
    }

    /// Role handles of every rung.
    pub fn roles(&self) -> impl Iterator<Item = &RoleId> {
        self.tiers.iter().map(|t| &t.role)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl TryFrom<Vec<Tier>> for TierLadder {
    type Error = LadderError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierLadder> for Vec<Tier> {
    fn from(ladder: TierLadder) -> Self {
        ladder.tiers
    }
}
