//! Laurel Tier Ladder
//!
//! Pure logic for the activity tier ladder: an ordered table of
//! (threshold, role) rungs, resolution of a message count to the single
//! highest qualifying tier, and planning of the minimal grant/revoke set
//! that makes a member's held roles match exactly one tier.
//!
//! No I/O lives here. The ledger and the platform gateway feed counts and
//! role snapshots in; a [`ReconciliationPlan`] comes out.

mod ladder;
pub mod reconcile;

pub use ladder::{LadderError, RoleId, Tier, TierLadder};
pub use reconcile::ReconciliationPlan;
