//! Persistence layer for the membership tracker.
//!
//! The only durable state is one snapshot blob kept in a key-value byte
//! store under a fixed key. The store is abstracted behind
//! [`KeyValueStore`] so the reconciliation path can run against an
//! in-memory store in tests and a directory of JSON files in production.
//!
//! # File Layout
//!
//! ```text
//! <state_dir>/
//!   slack-banlist.json       # current snapshot
//!   slack-banlist.json.tmp   # only present mid-write
//! ```

pub mod snapshot;
pub mod store;

pub use snapshot::{SNAPSHOT_KEY, SnapshotError, load_snapshot, save_snapshot};
pub use store::{FileStore, KeyValueStore, MemoryStore};
