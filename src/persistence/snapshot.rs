//! Loading and saving the tracker's snapshot.
//!
//! The snapshot is a single JSON blob stored under [`SNAPSHOT_KEY`]. Loading
//! is forgiving: a missing or malformed blob is reported as a first run rather
//! than an error, so a corrupted state file never blocks the report. Saving is
//! all-or-nothing: the blob is fully serialized before the store is touched.

use std::io;

use thiserror::Error;

use super::store::KeyValueStore;
use crate::types::{FirstRunCause, PriorState, Snapshot};

/// Fixed key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "slack-banlist";

/// Errors that can occur during snapshot operations.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The store itself failed to read or write.
    #[error("snapshot store error: {0}")]
    Io(#[from] io::Error),

    /// The snapshot could not be serialized.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Loads the prior snapshot from `store`.
///
/// Returns `PriorState::FirstRun` if nothing is stored or if the stored bytes
/// are not a `{ active: [...], banned: [...] }` document. Individual records
/// that fail to decode are skipped with a warning. Only failures of the store
/// itself are returned as errors.
pub fn load_snapshot(store: &impl KeyValueStore) -> Result<PriorState> {
    let Some(bytes) = store.get(SNAPSHOT_KEY)? else {
        tracing::info!(key = SNAPSHOT_KEY, "No stored snapshot; treating as first scan");
        return Ok(PriorState::FirstRun(FirstRunCause::Absent));
    };

    match serde_json::from_slice::<Snapshot>(&bytes) {
        Ok(snapshot) => {
            tracing::debug!(
                active = snapshot.active.len(),
                banned = snapshot.banned.len(),
                "Loaded stored snapshot"
            );
            Ok(PriorState::Existing(snapshot))
        }
        Err(e) => {
            tracing::warn!(
                key = SNAPSHOT_KEY,
                error = %e,
                stored = %String::from_utf8_lossy(&bytes),
                "Bad stored snapshot; treating as first scan"
            );
            Ok(PriorState::FirstRun(FirstRunCause::Malformed(e.to_string())))
        }
    }
}

/// Serializes `snapshot` and writes it to `store`, replacing any prior value.
pub fn save_snapshot(store: &impl KeyValueStore, snapshot: &Snapshot) -> Result<()> {
    let bytes = serde_json::to_vec(snapshot).map_err(SnapshotError::Serialize)?;
    store.put(SNAPSHOT_KEY, &bytes)?;

    tracing::debug!(
        active = snapshot.active.len(),
        banned = snapshot.banned.len(),
        bytes = bytes.len(),
        "Saved snapshot"
    );
    Ok(())
}
