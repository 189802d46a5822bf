//! Laurel - Activity Tier Engine
//!
//! Watches chat activity in a guild and keeps one hierarchical activity
//! tier role per member, matching how many qualifying messages they sent
//! that day.
//!
//! # Architecture
//!
//! - **Gateway**: capability trait over the chat platform (role fetch,
//!   grant/revoke, roster, notices) - the live connection is supplied by
//!   the host, not by this crate
//! - **Tracker**: per-message orchestrator (rate gate, ledger, resolve,
//!   reconcile, persist, level-up notice)
//! - **Roster pass**: batch reconciliation over the full membership,
//!   triggered by the admin-only `/fixroles` command
//! - **Config**: environment-driven settings, including the tier ladder
//!
//! # Example
//!
//! ```no_run
//! use laurel_node::{ActivityTracker, NodeConfig};
//! use laurel_ledger::FileStore;
//!
//! # async fn run(gateway: std::sync::Arc<impl laurel_node::PlatformGateway>) {
//! let config = NodeConfig::from_env();
//! let store = FileStore::new(config.ledger_path());
//! let tracker = ActivityTracker::new(gateway, store, &config);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod roster;
pub mod tracker;

#[cfg(test)]
mod testutil;

pub use config::NodeConfig;
pub use error::{Error, Result};
pub use gateway::{MessageEvent, PlatformGateway};
pub use tracker::{ActivityTracker, TrackOutcome, FIXROLES_COMMAND};
