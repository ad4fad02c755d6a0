//! Configuration for the `banlist` binary.
//!
//! The library core reads nothing from the environment; the binary builds a
//! [`ScanConfig`] here and wires the pieces together from it.

use std::path::PathBuf;

use thiserror::Error;

use crate::directory::DEFAULT_API_BASE;

/// Default directory holding the snapshot file.
pub const DEFAULT_STATE_DIR: &str = ".banlist";

/// Errors building a [`ScanConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SLACK_TOKEN environment variable not set")]
    MissingToken,
}

/// Settings for one scan.
#[derive(Clone)]
pub struct ScanConfig {
    /// API token used to list members.
    pub token: String,

    /// Base URL of the Web API (`users.list` is appended).
    pub api_base: String,

    /// Directory for the snapshot file.
    pub state_dir: PathBuf,

    /// Wait for Enter before exiting so the panel stays on screen.
    pub interactive: bool,
}

impl ScanConfig {
    /// Reads configuration from environment variables.
    ///
    /// - `SLACK_TOKEN` (required)
    /// - `SLACK_API_BASE` (default: the public Slack API)
    /// - `BANLIST_STATE_DIR` (default: `.banlist`)
    /// - `BANLIST_INTERACTIVE` (any non-empty value enables it)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty("SLACK_TOKEN").ok_or(ConfigError::MissingToken)?;

        Ok(ScanConfig {
            token,
            api_base: non_empty("SLACK_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            state_dir: non_empty("BANLIST_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
            interactive: non_empty("BANLIST_INTERACTIVE").is_some(),
        })
    }
}

impl std::fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanConfig")
            .field("api_base", &self.api_base)
            .field("state_dir", &self.state_dir)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}
