//! Error types for the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while tracking activity or reconciling roles.
///
/// "No tier resolved" and "non-admin invoked `/fixroles`" are ordinary
/// outcomes, not errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Ledger persistence error
    #[error("Ledger error: {0}")]
    Ledger(#[from] laurel_ledger::Error),

    /// Invalid tier ladder
    #[error("Ladder error: {0}")]
    Ladder(#[from] laurel_tiers::LadderError),

    /// Platform gateway call failed
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
