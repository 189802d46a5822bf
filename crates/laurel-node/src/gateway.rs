//! Platform gateway capability trait.
//!
//! The engine decides *what* should change; a gateway implementation owns
//! the connection, credentials, and wire calls. Tests drive the engine
//! through an in-memory gateway.

use crate::error::Result;
use async_trait::async_trait;
use laurel_ledger::MemberId;
use laurel_tiers::RoleId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inbound message event, as delivered by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Author of the message.
    pub author: MemberId,
    /// True for messages from bots (including this one); never counted.
    pub author_is_bot: bool,
    /// Message text, used only for command dispatch.
    pub body: String,
    /// Unix seconds when the message was sent.
    pub timestamp: i64,
}

/// Capabilities the engine needs from the chat platform.
///
/// Role snapshots are fetched fresh per reconciliation, never cached, so
/// plans are computed against current platform state.
#[async_trait]
pub trait PlatformGateway: Send + Sync {
    /// Roles the member currently holds.
    async fn fetch_member_roles(&self, member: &MemberId) -> Result<BTreeSet<RoleId>>;

    /// Grant a role to a member.
    async fn grant_role(&self, member: &MemberId, role: &RoleId) -> Result<()>;

    /// Revoke a role from a member.
    async fn revoke_role(&self, member: &MemberId, role: &RoleId) -> Result<()>;

    /// Every member of the managed guild.
    async fn list_roster(&self) -> Result<Vec<MemberId>>;

    /// Send a direct notice to a member.
    async fn send_notice(&self, member: &MemberId, text: &str) -> Result<()>;

    /// Reply to a message in channel.
    async fn reply(&self, event: &MessageEvent, text: &str) -> Result<()>;
}
