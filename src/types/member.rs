//! Directory members as returned by the listing endpoint.

use serde::{Deserialize, Serialize};

use super::ids::Username;

/// A member record from one page of the directory listing.
///
/// Only the fields reconciliation needs are decoded; everything else the
/// endpoint returns (profile, team id, flags) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's unique name.
    pub name: Username,

    /// Whether the account has been deactivated or removed.
    #[serde(default)]
    pub deleted: bool,
}

impl Member {
    /// An active member.
    pub fn active(name: impl Into<String>) -> Self {
        Member {
            name: Username::new(name),
            deleted: false,
        }
    }

    /// A deleted (banned) member.
    pub fn deleted(name: impl Into<String>) -> Self {
        Member {
            name: Username::new(name),
            deleted: true,
        }
    }
}
