//! Laurel Activity Ledger
//!
//! Durable record of how many qualifying messages each member sent on each
//! calendar day, plus the cooldown stamp the rate gate checks. The ledger is
//! a plain nested map owned by whoever loaded it; the file store hands out
//! exclusively-owned working copies and persists them whole (last full write
//! wins).

mod gate;
mod record;
mod store;

pub use gate::{RateGate, DEFAULT_COOLDOWN_SECS};
pub use record::{ActivityRecord, Ledger, MemberId};
pub use store::FileStore;

use thiserror::Error;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from ledger persistence.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
