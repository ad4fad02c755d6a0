//! The active/banned snapshot carried between runs.
//!
//! # Wire format
//!
//! ```text
//! {
//!   "active": [{"username": "alice", "recorded": 1700000000000}, ...],
//!   "banned": [{"username": "mallory", "recorded": 1690000000000}, ...]
//! }
//! ```
//!
//! `recorded` is milliseconds since the Unix epoch. Both sets are written as
//! sequences in map iteration order and rebuilt into keyed maps on load.
//! Records that do not decode are skipped on load; the rest are kept.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ids::Username;

/// A user in one of the two tracked sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedUser {
    pub username: Username,

    /// When the user entered the set it currently belongs to.
    #[serde(rename = "recorded", with = "chrono::serde::ts_milliseconds")]
    pub recorded_at: DateTime<Utc>,
}

impl TrackedUser {
    pub fn new(username: Username, recorded_at: DateTime<Utc>) -> Self {
        TrackedUser {
            username,
            recorded_at,
        }
    }
}

/// Active and banned users, keyed by username.
///
/// A username is in at most one of the two maps. Insertion order is kept so
/// that the persisted blob and anything derived from it are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LoadedSnapshot", into = "StoredSnapshot")]
pub struct Snapshot {
    pub active: IndexMap<Username, TrackedUser>,
    pub banned: IndexMap<Username, TrackedUser>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent `recorded_at` among banned users, if any.
    pub fn last_ban_at(&self) -> Option<DateTime<Utc>> {
        self.banned.values().map(|u| u.recorded_at).max()
    }

    pub fn is_active(&self, username: &str) -> bool {
        self.active.contains_key(username)
    }

    pub fn is_banned(&self, username: &str) -> bool {
        self.banned.contains_key(username)
    }

    /// Usernames present in both sets. Always empty for a well-formed snapshot.
    pub fn overlap(&self) -> Vec<&Username> {
        self.active
            .keys()
            .filter(|name| self.banned.contains_key(name.as_str()))
            .collect()
    }
}

/// Serialized shape of a [`Snapshot`].
#[derive(Debug, Clone, Serialize)]
struct StoredSnapshot {
    active: Vec<TrackedUser>,
    banned: Vec<TrackedUser>,
}

/// Shape accepted on load.
///
/// Both fields must be sequences; their elements are decoded one at a time
/// so a single bad record does not discard the rest of the history.
#[derive(Debug, Deserialize)]
struct LoadedSnapshot {
    active: Vec<serde_json::Value>,
    banned: Vec<serde_json::Value>,
}

/// Decodes each stored record, skipping the ones that are not a `TrackedUser`.
fn decode_records(set: &'static str, records: Vec<serde_json::Value>) -> Vec<TrackedUser> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<TrackedUser>(record.clone()) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(set, error = %e, %record, "Skipping bad stored record");
                None
            }
        })
        .collect()
}

impl From<LoadedSnapshot> for Snapshot {
    fn from(loaded: LoadedSnapshot) -> Self {
        let banned: IndexMap<Username, TrackedUser> = decode_records("banned", loaded.banned)
            .into_iter()
            .map(|u| (u.username.clone(), u))
            .collect();

        let stored_active = decode_records("active", loaded.active);
        let mut active = IndexMap::with_capacity(stored_active.len());
        for user in stored_active {
            if banned.contains_key(user.username.as_str()) {
                tracing::warn!(
                    username = %user.username,
                    "Stored snapshot lists user as both active and banned; keeping banned"
                );
                continue;
            }
            active.insert(user.username.clone(), user);
        }

        Snapshot { active, banned }
    }
}

impl From<Snapshot> for StoredSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        StoredSnapshot {
            active: snapshot.active.into_values().collect(),
            banned: snapshot.banned.into_values().collect(),
        }
    }
}

/// The prior state a run starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorState {
    /// A valid snapshot from a previous run.
    Existing(Snapshot),

    /// No usable snapshot; the run is reported as a first scan.
    FirstRun(FirstRunCause),
}

impl PriorState {
    pub fn is_first_run(&self) -> bool {
        matches!(self, PriorState::FirstRun(_))
    }

    /// Returns the snapshot to reconcile against (empty on a first run).
    pub fn into_snapshot(self) -> Snapshot {
        match self {
            PriorState::Existing(snapshot) => snapshot,
            PriorState::FirstRun(_) => Snapshot::new(),
        }
    }
}

/// Why no prior snapshot was available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirstRunCause {
    /// Nothing stored under the snapshot key.
    Absent,

    /// Something was stored but it did not have the expected shape.
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::arb_snapshot;
    use proptest::prelude::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn user(name: &str, ms: i64) -> TrackedUser {
        TrackedUser::new(Username::from(name), at(ms))
    }

    proptest! {
        #[test]
        fn serde_roundtrip_preserves_order(snapshot in arb_snapshot()) {
            let json = serde_json::to_string(&snapshot).unwrap();
            let parsed: Snapshot = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(
                parsed.active.keys().collect::<Vec<_>>(),
                snapshot.active.keys().collect::<Vec<_>>()
            );
            prop_assert_eq!(parsed, snapshot);
        }
    }

    #[test]
    fn serializes_sets_as_sequences() {
        let mut snapshot = Snapshot::new();
        snapshot
            .active
            .insert(Username::from("bob"), user("bob", 500));
        snapshot
            .banned
            .insert(Username::from("alice"), user("alice", 100));

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "active": [{"username": "bob", "recorded": 500}],
                "banned": [{"username": "alice", "recorded": 100}],
            })
        );
    }

    #[test]
    fn user_in_both_lists_is_kept_as_banned() {
        let json = r#"{
            "active": [{"username": "eve", "recorded": 1}, {"username": "bob", "recorded": 2}],
            "banned": [{"username": "eve", "recorded": 3}]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert!(snapshot.is_banned("eve"));
        assert!(!snapshot.is_active("eve"));
        assert!(snapshot.is_active("bob"));
        assert!(snapshot.overlap().is_empty());
    }

    #[test]
    fn bad_records_are_skipped() {
        let json = r#"{
            "active": [{"username": "bob"}, {"username": "carol", "recorded": 7}, 42],
            "banned": [{"username": "mallory", "recorded": "yesterday"}, {"username": "eve", "recorded": 100}]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.active.keys().map(Username::as_str).collect::<Vec<_>>(), vec!["carol"]);
        assert_eq!(snapshot.banned.keys().map(Username::as_str).collect::<Vec<_>>(), vec!["eve"]);
        assert_eq!(snapshot.banned["eve"].recorded_at, at(100));
    }

    #[test]
    fn duplicate_entries_collapse_to_last() {
        let json = r#"{
            "active": [{"username": "bob", "recorded": 2}, {"username": "bob", "recorded": 9}],
            "banned": []
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.active.len(), 1);
        assert_eq!(snapshot.active["bob"].recorded_at, at(9));
    }

    #[test]
    fn last_ban_at_is_max_of_banned() {
        let mut snapshot = Snapshot::new();
        assert_eq!(snapshot.last_ban_at(), None);

        snapshot.banned.insert(Username::from("a"), user("a", 300));
        snapshot.banned.insert(Username::from("b"), user("b", 700));
        snapshot.banned.insert(Username::from("c"), user("c", 200));
        snapshot.active.insert(Username::from("d"), user("d", 900));

        assert_eq!(snapshot.last_ban_at(), Some(at(700)));
    }

    #[test]
    fn first_run_yields_empty_snapshot() {
        let prior = PriorState::FirstRun(FirstRunCause::Absent);
        assert!(prior.is_first_run());
        assert_eq!(prior.into_snapshot(), Snapshot::new());
    }
}
