//! One-shot scan: load, fetch, reconcile, save, format.
//!
//! A scan either completes fully or leaves the stored snapshot exactly as it
//! was. Transport failures abort before reconciliation; a failed save aborts
//! before any message is produced.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::directory::{MemberDirectory, TransportError, fetch_all_members};
use crate::persistence::{KeyValueStore, SnapshotError, load_snapshot, save_snapshot};
use crate::reconcile::{ChangeReport, reconcile};
use crate::report::format_messages;
use crate::types::{PriorState, Snapshot};

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to fetch member list: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl RunError {
    /// HTTP status of a failed listing request, if the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RunError::Transport(e) => e.status_code(),
            RunError::Snapshot(_) => None,
        }
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// The snapshot that was persisted.
    pub snapshot: Snapshot,
    pub report: ChangeReport,
    /// Lines to hand to a presenter, in display order.
    pub messages: Vec<String>,
}

/// Runs one scan against `store` and `directory`, stamping changes with `now`.
pub async fn run_scan<S, D>(store: &S, directory: &D, now: DateTime<Utc>) -> Result<ScanOutcome, RunError>
where
    S: KeyValueStore,
    D: MemberDirectory,
{
    let prior = load_snapshot(store)?;
    if let PriorState::FirstRun(cause) = &prior {
        tracing::info!(?cause, "Starting first scan");
    }

    let members = fetch_all_members(directory).await?;
    let (snapshot, report) = reconcile(prior, &members, now);
    save_snapshot(store, &snapshot)?;

    let messages = format_messages(&report);
    tracing::info!(
        first_run = report.first_run,
        newly_banned = report.newly_banned.len(),
        newly_active = report.newly_active.len(),
        "Scan complete"
    );

    Ok(ScanOutcome {
        snapshot,
        report,
        messages,
    })
}
