use chrono::{DateTime, Local, NaiveDate, Utc};

use looplist_domain::shared::Clock;

/// Wall clock. "Today" is the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
