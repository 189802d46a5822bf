//! Role reconciliation planning.
//!
//! Given the roles a member currently holds and the tier they should have,
//! compute the grant/revoke set whose application leaves exactly one ladder
//! role (the target's) or none. Roles outside the ladder are never touched.

use crate::ladder::{RoleId, Tier, TierLadder};
use std::collections::BTreeSet;

/// Grant/revoke set produced by [`plan`].
///
/// The engine only computes the plan; the caller executes it against the
/// platform and tolerates per-operation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub grants: BTreeSet<RoleId>,
    pub revokes: BTreeSet<RoleId>,
}

impl ReconciliationPlan {
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty() && self.revokes.is_empty()
    }

    /// Total number of operations in the plan.
    pub fn len(&self) -> usize {
        self.grants.len() + self.revokes.len()
    }
}

/// Compute the plan that reconciles `held` against `target`.
///
/// Every ladder role held that is not the target is revoked, so a member
/// who drifted into holding several rungs is stripped back to one. The
/// target is granted only when not already held; a `None` target grants
/// nothing and still strips stale ladder roles.
pub fn plan(
    held: &BTreeSet<RoleId>,
    target: Option<&Tier>,
    ladder: &TierLadder,
) -> ReconciliationPlan {
    let target_role = target.map(|t| &t.role);

    let revokes = ladder
        .roles()
        .filter(|role| held.contains(*role) && Some(*role) != target_role)
        .cloned()
        .collect();

    let grants = match target_role {
        Some(role) if !held.contains(role) => BTreeSet::from([role.clone()]),
        _ => BTreeSet::new(),
    };

    ReconciliationPlan { grants, revokes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::TierLadder;

    fn ladder() -> TierLadder {
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

    fn held(roles: &[&str]) -> BTreeSet<RoleId> {
        roles.iter().map(|r| RoleId::new(*r)).collect()
    }

    fn apply(held: &BTreeSet<RoleId>, plan: &ReconciliationPlan) -> BTreeSet<RoleId> {
        let mut next = held.clone();
        for role in &plan.revokes {
            next.remove(role);
        }
        for role in &plan.grants {
            next.insert(role.clone());
        }
        next
    }

    #[test]
    fn first_tier_grant_from_nothing() {
        let ladder = ladder();
        let target = ladder.resolve(5);
        let p = plan(&held(&[]), target, &ladder);
        assert_eq!(p.grants, held(&["lv1"]));
        assert!(p.revokes.is_empty());
    }

    #[test]
    fn upgrade_grants_new_and_revokes_old() {
        let ladder = ladder();
        let target = ladder.resolve(15);
        let p = plan(&held(&["lv1"]), target, &ladder);
        assert_eq!(p.grants, held(&["lv2"]));
        assert_eq!(p.revokes, held(&["lv1"]));
    }

    #[test]
    fn drift_strips_extra_rung_without_regrant() {
        // Member erroneously holds both rungs; count 7 resolves to Lv1.
        let ladder = ladder();
        let target = ladder.resolve(7);
        let p = plan(&held(&["lv1", "lv2"]), target, &ladder);
        assert!(p.grants.is_empty());
        assert_eq!(p.revokes, held(&["lv2"]));
    }

    #[test]
    fn none_target_strips_all_ladder_roles() {
        let ladder = ladder();
        let p = plan(&held(&["lv1", "lv2"]), None, &ladder);
        assert!(p.grants.is_empty());
        assert_eq!(p.revokes, held(&["lv1", "lv2"]));
    }

    #[test]
    fn roles_outside_ladder_are_untouched() {
        let ladder = ladder();
        let current = held(&["moderator", "lv1"]);
        let p = plan(&current, None, &ladder);
        assert_eq!(p.revokes, held(&["lv1"]));

        let after = apply(&current, &p);
        assert!(after.contains(&RoleId::new("moderator")));
    }

    #[test]
    fn plan_is_idempotent() {
        let ladder = ladder();
        for held_set in [
            held(&[]),
            held(&["lv1"]),
            held(&["lv2"]),
            held(&["lv1", "lv2"]),
            held(&["other", "lv2"]),
        ] {
            for target in [None, ladder.resolve(5), ladder.resolve(15)] {
                let first = plan(&held_set, target, &ladder);
                let after = apply(&held_set, &first);
                let second = plan(&after, target, &ladder);
                assert!(second.is_empty(), "replan not empty for {held_set:?}");
            }
        }
    }

    #[test]
    fn applied_plan_leaves_at_most_one_ladder_role() {
        let ladder = ladder();
        for held_set in [held(&["lv1", "lv2"]), held(&["lv2"]), held(&[])] {
            for (count, expect) in [(0, None), (7, Some("lv1")), (40, Some("lv2"))] {
                let target = ladder.resolve(count);
                let after = apply(&held_set, &plan(&held_set, target, &ladder));
                let on_ladder: Vec<_> =
                    after.iter().filter(|r| ladder.contains(*r)).collect();
                match expect {
                    Some(role) => assert_eq!(on_ladder, vec![&RoleId::new(role)]),
                    None => assert!(on_ladder.is_empty()),
                }
            }
        }
    }
}
