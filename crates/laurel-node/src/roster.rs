//! Roster reconciliation pass.
//!
//! Batch variant of the tracker's resolve-and-reconcile step, run over the
//! full membership to heal drift: stale tier roles from manual edits, missed
//! events, or a day rollover. Shares the resolver and planner with the live
//! path so both always agree on the target tier for a given count.

use crate::error::Result;
use crate::gateway::PlatformGateway;
use chrono::NaiveDate;
use laurel_ledger::{Ledger, MemberId};
use laurel_tiers::{reconcile, ReconciliationPlan, TierLadder};

/// Reconcile every roster member against their count for `day`.
///
/// Members the ledger has no record for count as zero, so their stale
/// ladder roles are stripped. Per-member failures are logged and skipped;
/// the pass is idempotent and safe to re-run after an interruption.
/// Returns the number of members whose role set actually changed.
pub async fn reconcile_all<G: PlatformGateway>(
    gateway: &G,
    ledger: &Ledger,
    day: NaiveDate,
    ladder: &TierLadder,
) -> Result<usize> {
    let roster = gateway.list_roster().await?;
    tracing::info!("Roster reconciliation over {} member(s)", roster.len());

    let mut touched = 0;
    for member in roster {
        let count = ledger.count_for(day, &member);
        let target = ladder.resolve(count);

        let held = match gateway.fetch_member_roles(&member).await {
            Ok(held) => held,
            Err(e) => {
                tracing::error!("Skipping {} in roster pass: {}", member, e);
                continue;
            }
        };

        let plan = reconcile::plan(&held, target, ladder);
        if plan.is_empty() {
            continue;
        }

        tracing::info!(
            "Reconciling {} (count {}, {} op(s))",
            member,
            count,
            plan.len()
        );
        apply_plan(gateway, &member, &plan).await;
        touched += 1;
    }

    Ok(touched)
}

/// Execute a plan against the gateway, fire-and-log per operation.
///
/// A failed grant or revoke never aborts the remaining operations; the
/// next reconciliation converges on whatever this one missed.
pub(crate) async fn apply_plan<G: PlatformGateway>(
    gateway: &G,
    member: &MemberId,
    plan: &ReconciliationPlan,
) {
    for role in &plan.revokes {
        match gateway.revoke_role(member, role).await {
            Ok(()) => tracing::info!("Revoked {} from {}", role, member),
            Err(e) => tracing::error!("Failed to revoke {} from {}: {}", role, member, e),
        }
    }
    for role in &plan.grants {
        match gateway.grant_role(member, role).await {
            Ok(()) => tracing::info!("Granted {} to {}", role, member),
            Err(e) => tracing::error!("Failed to grant {} to {}: {}", role, member, e),
        }
    }
}
