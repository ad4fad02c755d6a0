//! Cursor-driven pagination over the member listing.

use super::error::TransportError;
use super::source::MemberDirectory;
use crate::types::Member;

/// Number of members requested per page.
pub const PAGE_SIZE: u32 = 1000;

/// Fetches every member by following pagination cursors until none remains.
///
/// Pages are requested strictly one after another. The first error aborts
/// the whole fetch and the members gathered so far are discarded.
#[tracing::instrument(skip_all)]
pub async fn fetch_all_members<D: MemberDirectory>(
    directory: &D,
) -> Result<Vec<Member>, TransportError> {
    let mut members = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = directory.list_members(cursor.as_deref(), PAGE_SIZE).await?;
        pages += 1;
        tracing::debug!(
            page = pages,
            count = page.members.len(),
            has_more = page.next_cursor.is_some(),
            "Fetched member page"
        );
        members.extend(page.members);

        match page.next_cursor.filter(|c| !c.is_empty()) {
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                return Err(TransportError::CursorLoop { cursor: next });
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::info!(pages, members = members.len(), "Fetched full member list");
    Ok(members)
}
