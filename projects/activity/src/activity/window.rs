use chrono::{Duration, NaiveDate, Utc};

/// Days looked back from today. The window spans `LOOKBACK_DAYS + 1`
/// calendar days because today is part of it.
pub const LOOKBACK_DAYS: i64 = 30;

/// The trailing aggregation horizon: 31 calendar days ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    today: NaiveDate,
}

impl ActivityWindow {
    pub fn current() -> Self {
        Self::ending(Utc::now().date_naive())
    }

    /// Window ending on an explicit day. Handlers use [`ActivityWindow::current`];
    /// tests pin the end day here.
    pub fn ending(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Oldest day of the window, the `>=` bound on upstream queries.
    pub fn since(&self) -> NaiveDate {
        self.today - Duration::days(LOOKBACK_DAYS)
    }

    /// Iterates the window oldest to newest (offset 30 down to 0).
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let today = self.today;
        (0..=LOOKBACK_DAYS)
            .rev()
            .map(move |offset| today - Duration::days(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn spans_thirty_one_days_oldest_first() {
        let window = ActivityWindow::ending(day(2024, 6, 30));
        let days: Vec<NaiveDate> = window.days().collect();

        assert_eq!(days.len(), 31);
        assert_eq!(days[0], day(2024, 5, 31));
        assert_eq!(days[30], day(2024, 6, 30));
    }

    #[test]
    fn since_is_the_oldest_day() {
        let window = ActivityWindow::ending(day(2024, 6, 30));

        assert_eq!(window.since(), day(2024, 5, 31));
        assert_eq!(window.days().next(), Some(window.since()));
    }

    #[test]
    fn crosses_month_boundaries() {
        let window = ActivityWindow::ending(day(2024, 3, 5));
        assert_eq!(window.since(), day(2024, 2, 4));
    }
}
