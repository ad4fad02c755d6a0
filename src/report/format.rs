//! Human-readable messages for a change report.
//!
//! A first run has no "before" to compare against, so it is summarised as
//! counts. Later runs list who left and who joined, falling back to fixed
//! "nothing new" lines.

use chrono::{DateTime, Utc};

use crate::reconcile::ChangeReport;
use crate::types::Username;

/// Date format used in the "no new bans since" line.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns a report into the ordered lines shown to the user.
pub fn format_messages(report: &ChangeReport) -> Vec<String> {
    if report.first_run {
        return vec![
            "First scan!".to_string(),
            format!("Found {} banned users", report.newly_banned.len()),
            format!("Found {} active users", report.newly_active.len()),
        ];
    }

    let bans = if report.newly_banned.is_empty() {
        format!(
            "No new bans since last scan ({})",
            format_date(report.last_ban_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
        )
    } else {
        format!("\u{1f6ab} Goodbye: {}", join_names(&report.newly_banned))
    };

    let joins = if report.newly_active.is_empty() {
        "No new active users since last scan".to_string()
    } else {
        format!("\u{1f44b} Welcome: {}", join_names(&report.newly_active))
    };

    vec![bans, joins]
}

fn format_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

fn join_names(names: &[Username]) -> String {
    names
        .iter()
        .map(Username::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
