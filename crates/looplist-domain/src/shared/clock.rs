use chrono::{DateTime, NaiveDate, Utc};

/// Source of "today" for every date-dependent rule.
///
/// Calendar dates are local and date-only; timestamps (`now`) are only used
/// for audit fields such as `created_at`.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;
}

/// Clock pinned to a single calendar date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.today
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_default()
    }
}
