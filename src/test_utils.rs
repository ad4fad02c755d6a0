//! Shared test utilities and arbitrary generators for property-based testing.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use crate::directory::{MemberDirectory, MemberPage, TransportError};
use crate::types::{Member, Snapshot, TrackedUser, Username};

/// Usernames from a small alphabet so snapshots and listings overlap often.
pub fn arb_username() -> impl Strategy<Value = Username> {
    "[a-h]{1,3}".prop_map(Username::new)
}

pub fn arb_datetime() -> impl Strategy<Value = DateTime<Utc>> {
    // Millisecond precision, year 1970-2100
    (0i64..4_102_444_800_000).prop_map(|ms| DateTime::from_timestamp_millis(ms).unwrap())
}

/// A well-formed snapshot: each username is in at most one set.
pub fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::vec((arb_username(), arb_datetime(), any::<bool>()), 0..20).prop_map(
        |entries| {
            let mut snapshot = Snapshot::new();
            for (name, at, banned) in entries {
                if snapshot.is_active(name.as_str()) || snapshot.is_banned(name.as_str()) {
                    continue;
                }
                let user = TrackedUser::new(name.clone(), at);
                if banned {
                    snapshot.banned.insert(name, user);
                } else {
                    snapshot.active.insert(name, user);
                }
            }
            snapshot
        },
    )
}

/// A member listing with unique names, as the directory returns it.
pub fn arb_members() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec((arb_username(), any::<bool>()), 0..30).prop_map(|entries| {
        let mut seen = HashSet::new();
        entries
            .into_iter()
            .filter(|(name, _)| seen.insert(name.clone()))
            .map(|(name, deleted)| Member { name, deleted })
            .collect()
    })
}

/// `count` active members named `<prefix>0`, `<prefix>1`, ...
pub fn members_named(prefix: &str, count: usize) -> Vec<Member> {
    (0..count)
        .map(|i| Member::active(format!("{prefix}{i}")))
        .collect()
}

/// A directory that replays a fixed sequence of page results and records
/// every request it receives.
pub struct ScriptedDirectory {
    pages: Mutex<VecDeque<Result<MemberPage, TransportError>>>,
    requests: Mutex<Vec<(Option<String>, u32)>>,
}

impl ScriptedDirectory {
    pub fn new(pages: Vec<Result<MemberPage, TransportError>>) -> Self {
        ScriptedDirectory {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// `(cursor, limit)` of every request so far.
    pub fn requests(&self) -> Vec<(Option<String>, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

impl MemberDirectory for ScriptedDirectory {
    async fn list_members(
        &self,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<MemberPage, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((cursor.map(String::from), limit));
        let next = self.pages.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(MemberPage::default()))
    }
}
