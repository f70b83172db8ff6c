use super::window::ActivityWindow;
use super::CommitDaySet;

const HEALTH_MAX: i64 = 100;
const HEALTH_PER_COMMIT_DAY: i64 = 3;
const HEALTH_PER_GAP_DAY: i64 = 1;

/// Streak metrics for one window, derived in a single oldest-to-newest walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakTally {
    /// Consecutive commit days ending at the most recent evaluated day.
    pub streak: u32,
    /// Longest run observed anywhere in the window.
    pub max_streak: u32,
    /// Bounded score: +3 per commit day, -1 per gap day, clamped to [0, 100].
    pub health: u32,
}

/// Walks the window oldest to newest, growing the running streak on commit
/// days and resetting it on gaps.
///
/// The final day only counts when present: today is still in progress, so
/// its absence leaves the streak and health untouched instead of resetting
/// them.
pub fn tally(window: &ActivityWindow, commit_days: &CommitDaySet) -> StreakTally {
    let mut streak = 0u32;
    let mut max_streak = 0u32;
    let mut health = 0i64;

    for day in window.days() {
        if commit_days.contains(&day) {
            streak += 1;
            health += HEALTH_PER_COMMIT_DAY;
            max_streak = max_streak.max(streak);
        } else if day == window.today() {
            continue;
        } else {
            streak = 0;
            health -= HEALTH_PER_GAP_DAY;
        }
        health = health.clamp(0, HEALTH_MAX);
    }

    StreakTally {
        streak,
        max_streak,
        health: health as u32,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn days_ago(offsets: &[i64]) -> CommitDaySet {
        offsets
            .iter()
            .map(|offset| today() - Duration::days(*offset))
            .collect()
    }

    #[test]
    fn no_activity_yields_a_zeroed_tally() {
        let result = tally(&ActivityWindow::ending(today()), &CommitDaySet::new());
        assert_eq!(result, StreakTally::default());
    }

    #[test]
    fn streak_is_the_run_ending_at_the_most_recent_day() {
        // A commit yesterday plus a three-day run earlier in the window:
        // the reported streak is 1, not the max of 3.
        let result = tally(&ActivityWindow::ending(today()), &days_ago(&[1, 3, 4, 5]));

        assert_eq!(result.streak, 1);
        assert_eq!(result.max_streak, 3);
    }

    #[test]
    fn a_commitless_today_does_not_reset_the_streak() {
        let result = tally(&ActivityWindow::ending(today()), &days_ago(&[1, 2]));
        assert_eq!(result.streak, 2);
    }

    #[test]
    fn a_commit_today_extends_the_streak() {
        let result = tally(&ActivityWindow::ending(today()), &days_ago(&[0, 1]));

        assert_eq!(result.streak, 2);
        assert_eq!(result.max_streak, 2);
    }

    #[test]
    fn gaps_reset_the_running_streak_but_not_the_max() {
        let result = tally(
            &ActivityWindow::ending(today()),
            &days_ago(&[5, 6, 8, 9, 10]),
        );

        assert_eq!(result.streak, 0);
        assert_eq!(result.max_streak, 3);
    }

    #[test]
    fn health_never_drops_below_zero() {
        // One commit day among thirty gaps: the -1 penalties clamp at 0.
        let result = tally(&ActivityWindow::ending(today()), &days_ago(&[15]));
        assert_eq!(result.health, 0);
    }

    #[test]
    fn a_perfect_window_maxes_the_streak() {
        let every_day: CommitDaySet = (0..=30)
            .map(|offset| today() - Duration::days(offset))
            .collect();
        let result = tally(&ActivityWindow::ending(today()), &every_day);

        assert_eq!(result.streak, 31);
        assert_eq!(result.max_streak, 31);
        assert_eq!(result.health, 93);
    }

    #[test]
    fn repeated_tallies_are_identical() {
        let commit_days = days_ago(&[1, 3, 4, 5]);
        let window = ActivityWindow::ending(today());

        assert_eq!(tally(&window, &commit_days), tally(&window, &commit_days));
    }
}
