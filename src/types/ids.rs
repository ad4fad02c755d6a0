//! Newtype wrappers for directory identifiers.
//!
//! A `Username` is the unique key of a directory member. Wrapping it keeps
//! usernames from being confused with cursors, tokens, or other strings that
//! flow through the fetch loop.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A directory member's unique name (the `name` field of a listed member).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(pub String);

impl Username {
    pub fn new(s: impl Into<String>) -> Self {
        Username(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Username(s)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Username(s.to_string())
    }
}

// Lets `IndexMap<Username, _>` be queried with a plain `&str`.
impl Borrow<str> for Username {
    fn borrow(&self) -> &str {
        &self.0
    }
}
