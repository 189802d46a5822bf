//! Activity tracker - the per-message orchestrator.
//!
//! One event is processed to completion before the next; the tracker owns
//! a transient working copy of the ledger for the duration of one event and
//! hands it back to the store. Nothing here may take the process down: any
//! failure inside an event is caught at the boundary, logged, and forwarded
//! to the admin as a best-effort notice.

use crate::config::NodeConfig;
use crate::error::Result;
use crate::gateway::{MessageEvent, PlatformGateway};
use crate::roster;
use chrono::{Local, NaiveDate, TimeZone};
use laurel_ledger::{FileStore, MemberId, RateGate};
use laurel_tiers::{reconcile, ReconciliationPlan, TierLadder};
use std::sync::Arc;

/// The admin-only command that triggers the roster reconciliation pass.
pub const FIXROLES_COMMAND: &str = "/fixroles";

/// Terminal state of one processed event.
#[derive(Debug)]
pub enum TrackOutcome {
    /// Author is a non-counting identity (a bot); nothing happened.
    Ignored,
    /// Rate gate rejected the message; ledger untouched.
    RateLimited,
    /// Message counted and reconciliation ran.
    Counted {
        /// The member's count for the day after this message.
        count: u64,
        /// Label of the resolved tier, if any.
        tier: Option<String>,
        /// The plan that was executed.
        plan: ReconciliationPlan,
        /// True when a new tier role was granted by this event.
        leveled_up: bool,
    },
    /// `/fixroles` was dispatched. `None` means the invoker was not the
    /// admin and the command was silently ignored.
    Command { touched: Option<usize> },
    /// Processing failed; the error was logged and the admin notified.
    Failed,
}

/// Per-message activity tracking and role reconciliation.
pub struct ActivityTracker<G> {
    gateway: Arc<G>,
    store: FileStore,
    ladder: TierLadder,
    gate: RateGate,
    admin: MemberId,
    retention_days: u32,
}

impl<G: PlatformGateway> ActivityTracker<G> {
    /// Create a tracker from config. The gateway is shared with the host.
    pub fn new(gateway: Arc<G>, store: FileStore, config: &NodeConfig) -> Self {
        Self {
            gateway,
            store,
            ladder: config.ladder.clone(),
            gate: RateGate::new(config.cooldown_secs),
            admin: config.admin.clone(),
            retention_days: config.retention_days,
        }
    }

    /// Route one inbound event: `/fixroles` to the roster pass, everything
    /// else through activity tracking.
    pub async fn dispatch(&self, event: &MessageEvent) -> TrackOutcome {
        if event.body.trim() == FIXROLES_COMMAND {
            return self.handle_fixroles(event).await;
        }
        self.handle_message(event).await
    }

    /// Track one message. Never panics and never returns an error; the
    /// orchestrator must survive any single event's failure.
    pub async fn handle_message(&self, event: &MessageEvent) -> TrackOutcome {
        if event.author_is_bot {
            return TrackOutcome::Ignored;
        }

        match self.track(event).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Failed to process message from {}: {}", event.author, e);
                self.alert_admin(&format!("message processing failed: {e}"))
                    .await;
                TrackOutcome::Failed
            }
        }
    }

    async fn track(&self, event: &MessageEvent) -> Result<TrackOutcome> {
        let mut ledger = self.store.load();
        let day = local_day(event.timestamp);

        let last = ledger
            .get(day, &event.author)
            .map(|r| r.last_counted_at);
        if !self.gate.admit(last, event.timestamp) {
            tracing::debug!("Rate gate rejected message from {}", event.author);
            return Ok(TrackOutcome::RateLimited);
        }

        let count = ledger.record(day, event.author.clone(), event.timestamp);
        if self.retention_days > 0 {
            if let Some(cutoff) = day.checked_sub_days(chrono::Days::new(self.retention_days as u64))
            {
                let dropped = ledger.prune_before(cutoff);
                if dropped > 0 {
                    tracing::info!("Pruned {} ledger day(s) older than {}", dropped, cutoff);
                }
            }
        }

        let target = self.ladder.resolve(count);
        let held = self.gateway.fetch_member_roles(&event.author).await?;
        let plan = reconcile::plan(&held, target, &self.ladder);
        let leveled_up = !plan.grants.is_empty();

        roster::apply_plan(self.gateway.as_ref(), &event.author, &plan).await;

        if leveled_up {
            if let Some(tier) = target {
                tracing::info!(
                    "{} reached {} ({} messages today)",
                    event.author,
                    tier.label,
                    count
                );
                if let Err(e) = self
                    .gateway
                    .reply(event, &format!("🎉 You are now {}", tier.label))
                    .await
                {
                    tracing::warn!("Level-up reply to {} failed: {}", event.author, e);
                }
            }
        }

        // Save failures are logged, not fatal; last full write wins.
        if let Err(e) = self.store.save(&ledger) {
            tracing::error!("Ledger save failed: {}", e);
        }

        Ok(TrackOutcome::Counted {
            count,
            tier: target.map(|t| t.label.clone()),
            plan,
            leveled_up,
        })
    }

    async fn handle_fixroles(&self, event: &MessageEvent) -> TrackOutcome {
        match self.fix_roles(&event.author, event.timestamp).await {
            Ok(None) => TrackOutcome::Command { touched: None },
            Ok(Some(touched)) => {
                if let Err(e) = self
                    .gateway
                    .reply(event, &format!("✅ Reconciled roles for {touched} member(s)"))
                    .await
                {
                    tracing::warn!("fixroles reply failed: {}", e);
                }
                TrackOutcome::Command {
                    touched: Some(touched),
                }
            }
            Err(e) => {
                tracing::error!("Roster reconciliation failed: {}", e);
                self.alert_admin(&format!("roster reconciliation failed: {e}"))
                    .await;
                TrackOutcome::Failed
            }
        }
    }

    /// Run the roster reconciliation pass, admin only.
    ///
    /// A non-admin invoker gets `Ok(None)` and no reply at all, so the
    /// command's existence is not leaked.
    pub async fn fix_roles(&self, invoker: &MemberId, now: i64) -> Result<Option<usize>> {
        if invoker != &self.admin {
            tracing::debug!("Ignoring {} from non-admin {}", FIXROLES_COMMAND, invoker);
            return Ok(None);
        }

        let ledger = self.store.load();
        let day = local_day(now);
        let touched =
            roster::reconcile_all(self.gateway.as_ref(), &ledger, day, &self.ladder).await?;
        Ok(Some(touched))
    }

    /// Best-effort admin alert. A failure here is logged and swallowed;
    /// it must never cascade.
    async fn alert_admin(&self, text: &str) {
        if let Err(e) = self
            .gateway
            .send_notice(&self.admin, &format!("🤖 Laurel alert: {text}"))
            .await
        {
            tracing::warn!("Admin notice failed: {}", e);
        }
    }
}

/// Local calendar day of a unix timestamp; the activity window is one
/// wall-clock day.
pub(crate) fn local_day(timestamp: i64) -> NaiveDate {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| Local::now().date_naive())
}
