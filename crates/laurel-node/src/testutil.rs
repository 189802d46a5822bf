//! In-memory gateway and fixtures for engine tests.

use crate::config::NodeConfig;
use crate::error::{Error, Result};
use crate::gateway::{MessageEvent, PlatformGateway};
use async_trait::async_trait;
use laurel_ledger::MemberId;
use laurel_tiers::{RoleId, Tier, TierLadder};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Gateway double that applies plans to an in-memory role map, so tests can
/// observe the end state a plan converges on.
#[derive(Default)]
pub struct MockGateway {
    roles: Mutex<BTreeMap<MemberId, BTreeSet<RoleId>>>,
    roster: Mutex<Vec<MemberId>>,
    pub replies: Mutex<Vec<(MemberId, String)>>,
    pub notices: Mutex<Vec<(MemberId, String)>>,
    /// Fail every grant/revoke call.
    pub fail_role_ops: AtomicBool,
    /// Fail every role fetch.
    pub fail_role_fetch: AtomicBool,
    /// Fail every direct notice.
    pub fail_notices: AtomicBool,
    fail_fetch_members: Mutex<BTreeSet<MemberId>>,
}

impl MockGateway {
    pub fn set_roles(&self, member: &str, roles: &[&str]) {
        self.roles.lock().unwrap().insert(
            MemberId::new(member),
            roles.iter().map(|r| RoleId::new(*r)).collect(),
        );
    }

    pub fn set_roster(&self, members: &[&str]) {
        *self.roster.lock().unwrap() = members.iter().map(|m| MemberId::new(*m)).collect();
    }

    pub fn fail_fetch_for(&self, member: &str) {
        self.fail_fetch_members
            .lock()
            .unwrap()
            .insert(MemberId::new(member));
    }

    /// Current roles of a member, sorted.
    pub fn roles_of(&self, member: &str) -> Vec<RoleId> {
        self.roles
            .lock()
            .unwrap()
            .get(&MemberId::new(member))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PlatformGateway for MockGateway {
    async fn fetch_member_roles(&self, member: &MemberId) -> Result<BTreeSet<RoleId>> {
        if self.fail_role_fetch.load(Ordering::SeqCst)
            || self.fail_fetch_members.lock().unwrap().contains(member)
        {
            return Err(Error::Gateway(format!("role fetch failed for {member}")));
        }
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(member)
            .cloned()
            .unwrap_or_default())
    }

    async fn grant_role(&self, member: &MemberId, role: &RoleId) -> Result<()> {
        if self.fail_role_ops.load(Ordering::SeqCst) {
            return Err(Error::Gateway("grant failed".into()));
        }
        self.roles
            .lock()
            .unwrap()
            .entry(member.clone())
            .or_default()
            .insert(role.clone());
        Ok(())
    }

    async fn revoke_role(&self, member: &MemberId, role: &RoleId) -> Result<()> {
        if self.fail_role_ops.load(Ordering::SeqCst) {
            return Err(Error::Gateway("revoke failed".into()));
        }
        if let Some(held) = self.roles.lock().unwrap().get_mut(member) {
            held.remove(role);
        }
        Ok(())
    }

    async fn list_roster(&self) -> Result<Vec<MemberId>> {
        Ok(self.roster.lock().unwrap().clone())
    }

    async fn send_notice(&self, member: &MemberId, text: &str) -> Result<()> {
        if self.fail_notices.load(Ordering::SeqCst) {
            return Err(Error::Gateway(format!("notice to {member} failed")));
        }
        self.notices
            .lock()
            .unwrap()
            .push((member.clone(), text.to_string()));
        Ok(())
    }

    async fn reply(&self, event: &MessageEvent, text: &str) -> Result<()> {
        self.replies
            .lock()
            .unwrap()
            .push((event.author.clone(), text.to_string()));
        Ok(())
    }
}

/// The two-rung ladder used throughout the engine tests.
pub fn two_rung_ladder() -> TierLadder {
    TierLadder::new(vec![
        Tier {
            role: RoleId::new("lv1"),
            threshold: 5,
            label: "Lv1".into(),
        },
        Tier {
            role: RoleId::new("lv2"),
            threshold: 15,
            label: "Lv2".into(),
        },
    ])
    .unwrap()
}

/// Config with the two-rung ladder and `admin` as the admin identity.
pub fn two_rung_config() -> NodeConfig {
    NodeConfig {
        data_dir: ".".into(),
        guild_id: "test-guild".into(),
        admin: MemberId::new("admin"),
        cooldown_secs: 60,
        retention_days: 30,
        ladder: two_rung_ladder(),
    }
}

/// A plain member message event.
pub fn event(author: &str, body: &str, timestamp: i64) -> MessageEvent {
    MessageEvent {
        author: MemberId::new(author),
        author_is_bot: false,
        body: body.to_string(),
        timestamp,
    }
}
