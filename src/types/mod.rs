//! Core domain types for the membership tracker.
//!
//! The persisted `Snapshot` and the transport-supplied `Member` both live
//! here so the reconciliation engine can be tested without a store or a
//! transport.

pub mod ids;
pub mod member;
pub mod snapshot;

pub use ids::Username;
pub use member::Member;
pub use snapshot::{FirstRunCause, PriorState, Snapshot, TrackedUser};
