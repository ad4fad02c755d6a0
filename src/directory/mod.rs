//! Remote member directory access.
//!
//! This module fetches the complete member list from a paginated
//! `users.list`-style endpoint.
//!
//! Key features:
//! - `MemberDirectory` trait seam so the fetch loop runs against fakes in tests
//! - Cursor-based pagination with a fixed page size
//! - Fail-fast: any non-200 status or `ok: false` envelope aborts the fetch
//! - No retries; transient failures surface immediately

mod client;
mod error;
mod fetch;
mod source;

pub use client::{DEFAULT_API_BASE, SlackClient};
pub use error::TransportError;
pub use fetch::{PAGE_SIZE, fetch_all_members};
pub use source::{MemberDirectory, MemberPage};
