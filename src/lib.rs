//! Banlist - tracks who left and who joined a Slack workspace between runs.
//!
//! Each run fetches the full member list, diffs it against the snapshot
//! saved by the previous run, reports newly banned and newly active users,
//! and saves the updated snapshot.

pub mod config;
pub mod directory;
pub mod persistence;
pub mod reconcile;
pub mod report;
pub mod run;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use run::{RunError, ScanOutcome, run_scan};
