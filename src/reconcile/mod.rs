//! Reconciliation of the fetched member list against the prior snapshot.
//!
//! Reconciliation is the diff-and-update step: it moves users between the
//! active and banned sets according to the listing's `deleted` flag and
//! records which users moved, producing a [`ChangeReport`].

mod engine;

pub use engine::{ChangeReport, reconcile};
