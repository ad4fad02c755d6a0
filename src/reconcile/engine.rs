//! Diffing a fetched member list against the prior snapshot.
//!
//! The engine is a pure function of `(prior, members, now)`: it never touches
//! a store or a transport, and it takes the snapshot by value and hands the
//! updated one back.

use chrono::{DateTime, Utc};

use crate::types::{Member, PriorState, Snapshot, TrackedUser, Username};

/// What changed between the prior snapshot and the fetched member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReport {
    /// Users newly moved into the banned set, in first-encountered order.
    pub newly_banned: Vec<Username>,

    /// Users newly moved into the active set, in first-encountered order.
    pub newly_active: Vec<Username>,

    /// True when there was no usable prior snapshot.
    pub first_run: bool,

    /// Latest ban timestamp recorded in the prior snapshot.
    pub last_ban_at: Option<DateTime<Utc>>,
}

impl ChangeReport {
    /// True when nothing moved between sets.
    pub fn is_unchanged(&self) -> bool {
        self.newly_banned.is_empty() && self.newly_active.is_empty()
    }
}

/// Reclassifies every fetched member and reports the moves.
///
/// For each member, in fetch order:
/// - deleted and not already banned: moved to `banned` with `recorded_at = now`
/// - not deleted and not already active: moved to `active` with `recorded_at = now`
/// - otherwise left alone
///
/// Users that are in the prior snapshot but missing from `members` are kept
/// as they are; absence from the listing is not treated as removal.
pub fn reconcile(
    prior: PriorState,
    members: &[Member],
    now: DateTime<Utc>,
) -> (Snapshot, ChangeReport) {
    let first_run = prior.is_first_run();
    let mut snapshot = prior.into_snapshot();
    let last_ban_at = snapshot.last_ban_at();

    let mut newly_banned = Vec::new();
    let mut newly_active = Vec::new();

    for member in members {
        let name = &member.name;
        if member.deleted {
            if snapshot.is_banned(name.as_str()) {
                continue;
            }
            snapshot.active.shift_remove(name.as_str());
            snapshot
                .banned
                .insert(name.clone(), TrackedUser::new(name.clone(), now));
            newly_banned.push(name.clone());
        } else {
            if snapshot.is_active(name.as_str()) {
                continue;
            }
            snapshot.banned.shift_remove(name.as_str());
            snapshot
                .active
                .insert(name.clone(), TrackedUser::new(name.clone(), now));
            newly_active.push(name.clone());
        }
    }

    tracing::debug!(
        first_run,
        newly_banned = newly_banned.len(),
        newly_active = newly_active.len(),
        "Reconciled member list"
    );

    let report = ChangeReport {
        newly_banned,
        newly_active,
        first_run,
        last_ban_at,
    };
    (snapshot, report)
}
