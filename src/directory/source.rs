//! The paginated listing seam.
//!
//! `MemberDirectory` is implemented by [`SlackClient`](super::SlackClient)
//! for the real endpoint and by scripted fakes in tests, so the fetch loop
//! and everything above it can be exercised without a network.

use std::future::Future;

use super::error::TransportError;
use crate::types::Member;

/// One page of the member listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPage {
    /// Members on this page, in server order.
    pub members: Vec<Member>,

    /// Cursor for the next page. `None` or empty means this was the last page.
    pub next_cursor: Option<String>,
}

impl MemberPage {
    pub fn new(members: Vec<Member>, next_cursor: Option<String>) -> Self {
        MemberPage {
            members,
            next_cursor,
        }
    }

    /// A final page with no continuation cursor.
    pub fn last(members: Vec<Member>) -> Self {
        Self::new(members, None)
    }
}

/// A remote user directory that can be listed page by page.
pub trait MemberDirectory {
    /// Fetch one page of at most `limit` members.
    ///
    /// `cursor` is `None` for the first page and the previous page's
    /// `next_cursor` afterwards.
    fn list_members(
        &self,
        cursor: Option<&str>,
        limit: u32,
    ) -> impl Future<Output = Result<MemberPage, TransportError>> + Send;
}
