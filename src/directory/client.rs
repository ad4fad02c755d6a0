//! HTTP client for the Slack `users.list` endpoint.
//!
//! `SlackClient` wraps a `reqwest::Client` together with the API base URL and
//! the auth token, and implements [`MemberDirectory`] by issuing one GET per
//! page. The token is sent as a bearer `Authorization` header rather than a
//! query parameter so it never shows up in URLs or request logs.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use super::error::TransportError;
use super::source::{MemberDirectory, MemberPage};
use crate::types::Member;

/// Base URL of the public Slack Web API.
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Per-request timeout configured on the underlying HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Envelope returned by `users.list`.
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    ok: bool,
    error: Option<String>,
    /// Absent or `null` is an empty page; any other non-sequence fails decoding.
    members: Option<Vec<Member>>,
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    next_cursor: Option<String>,
}

impl ListResponse {
    fn into_page(self) -> Result<MemberPage, TransportError> {
        if !self.ok {
            return Err(TransportError::Api {
                error: self.error.unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        let next_cursor = self
            .response_metadata
            .and_then(|m| m.next_cursor)
            .filter(|c| !c.is_empty());

        Ok(MemberPage::new(self.members.unwrap_or_default(), next_cursor))
    }
}

/// A `users.list` client bound to one workspace token.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl SlackClient {
    /// Creates a client for `base_url` (e.g. [`DEFAULT_API_BASE`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_http_client(http, token, base_url))
    }

    /// Creates a client from a pre-configured `reqwest::Client`.
    pub fn with_http_client(
        http: reqwest::Client,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        SlackClient {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn users_list_url(&self) -> String {
        format!("{}/users.list", self.base_url.trim_end_matches('/'))
    }
}

impl MemberDirectory for SlackClient {
    async fn list_members(
        &self,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<MemberPage, TransportError> {
        let mut request = self
            .http
            .get(self.users_list_url())
            .bearer_auth(&self.token)
            .query(&[("limit", limit.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let envelope: ListResponse =
            serde_json::from_slice(&body).map_err(TransportError::Decode)?;
        envelope.into_page()
    }
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
