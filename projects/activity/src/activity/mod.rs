//! Commit-day aggregation over a trailing 31-day window.

pub mod repo_scan;
pub mod search_scan;
pub mod streak;
pub mod window;

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Calendar days (UTC, day precision) with at least one attributed commit.
pub type CommitDaySet = BTreeSet<NaiveDate>;

/// Renders a commit day in the wire format (`YYYY-MM-DD`). Membership checks
/// and output both go through [`NaiveDate`], so generation and lookup cannot
/// drift apart.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::format_day;

    #[test]
    fn commit_timestamps_truncate_to_utc_days() {
        let authored: DateTime<Utc> = "2024-03-05T10:00:00Z".parse().unwrap();
        assert_eq!(format_day(authored.date_naive()), "2024-03-05");
    }
}
