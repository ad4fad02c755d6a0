//! Transport error types for the directory listing.
//!
//! Every variant is fatal for the run. Reconciling against an incomplete
//! member list would report still-active members as newly banned, so the
//! fetcher never retries and never returns a partial list.

use thiserror::Error;

/// A failure while fetching a page of the member listing.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint answered with a non-200 HTTP status.
    #[error("bad API response: HTTP {status}")]
    Status { status: u16 },

    /// The endpoint answered 200 but the envelope had `ok: false`.
    #[error("error calling users.list: {error}")]
    Api { error: String },

    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not a listing envelope.
    #[error("failed to decode users.list response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server handed back the cursor that was just requested.
    #[error("pagination cursor {cursor:?} repeated; refusing to loop")]
    CursorLoop { cursor: String },
}

impl TransportError {
    /// The HTTP status, for errors that carry one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status } => Some(*status),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
