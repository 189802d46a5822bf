//! Node configuration.

use laurel_ledger::{MemberId, DEFAULT_COOLDOWN_SECS};
use laurel_tiers::TierLadder;
use std::path::PathBuf;

/// Days of ledger history kept by the retention prune.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Configuration for the engine.
///
/// The platform credential is owned by the gateway implementation and is
/// deliberately absent here.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Data directory for the ledger file.
    pub data_dir: PathBuf,

    /// Guild/space the engine manages.
    pub guild_id: String,

    /// Member allowed to invoke `/fixroles`.
    pub admin: MemberId,

    /// Rate gate cooldown between counted messages, seconds.
    pub cooldown_secs: i64,

    /// Ledger days kept before pruning. 0 disables pruning.
    pub retention_days: u32,

    /// The tier ladder.
    pub ladder: TierLadder,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl NodeConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// Malformed values are startup-fatal; there is no sane way to run
    /// with, say, half a ladder.
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(
            std::env::var("LAUREL_DATA_DIR").unwrap_or_else(|_| "./laurel-data".to_string()),
        );

        let guild_id = std::env::var("LAUREL_GUILD_ID").unwrap_or_default();

        let admin = MemberId::new(std::env::var("LAUREL_ADMIN_ID").unwrap_or_default());

        let cooldown_secs = std::env::var("LAUREL_COOLDOWN_SECS")
            .map(|s| s.parse().expect("Invalid LAUREL_COOLDOWN_SECS"))
            .unwrap_or(DEFAULT_COOLDOWN_SECS);

        let retention_days = std::env::var("LAUREL_RETENTION_DAYS")
            .map(|s| s.parse().expect("Invalid LAUREL_RETENTION_DAYS"))
            .unwrap_or(DEFAULT_RETENTION_DAYS);

        let ladder = std::env::var("LAUREL_LADDER")
            .map(|s| serde_json::from_str(&s).expect("Invalid LAUREL_LADDER"))
            .unwrap_or_else(|_| TierLadder::default_five());

        Self {
            data_dir,
            guild_id,
            admin,
            cooldown_secs,
            retention_days,
            ladder,
        }
    }

    /// Path of the ledger file inside the data directory.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger.json")
    }
}
