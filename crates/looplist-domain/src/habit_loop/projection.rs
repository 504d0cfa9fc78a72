use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::schedule::is_trackable;
use super::value_objects::{DayMap, DayStatus, Frequency};

/// Default heatmap window, in days before today.
pub const DEFAULT_PROJECTION_DAYS: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedDay {
    pub date: NaiveDate,
    pub status: DayStatus,
}

/// Display view of the trackable days in `[from, to]`, clipped to the loop's
/// start date.
///
/// Stored entries are shown as-is. Trackable days without an entry show as
/// `Pending` up to `today` and `Future` after it.
pub fn project_days(
    start_date: NaiveDate,
    frequency: Frequency,
    days: &DayMap,
    from: NaiveDate,
    to: NaiveDate,
    today: NaiveDate,
) -> Vec<ProjectedDay> {
    let effective_start = from.max(start_date);
    effective_start
        .iter_days()
        .take_while(|d| *d <= to)
        .filter(|d| is_trackable(frequency, start_date, *d))
        .map(|date| {
            let status = days.get(&date).unwrap_or(if date > today {
                DayStatus::Future
            } else {
                DayStatus::Pending
            });
            ProjectedDay { date, status }
        })
        .collect()
}

/// The last `max_days` days through today.
pub fn project_recent_days(
    start_date: NaiveDate,
    frequency: Frequency,
    days: &DayMap,
    today: NaiveDate,
    max_days: u32,
) -> Vec<ProjectedDay> {
    let from = today - Duration::days(i64::from(max_days));
    project_days(start_date, frequency, days, from, today, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_missing_days_become_pending_or_future() {
        let record = DayMap::from_iso_entries([
            ("2024-01-01", DayStatus::Checked),
            ("2024-01-02", DayStatus::Missed),
        ])
        .unwrap();
        let view = project_days(
            date("2024-01-01"),
            Frequency::Daily,
            &record,
            date("2024-01-01"),
            date("2024-01-05"),
            date("2024-01-03"),
        );
        let statuses: Vec<_> = view.iter().map(|d| d.status).collect();
        assert_eq!(
            statuses,
            vec![
                DayStatus::Checked,
                DayStatus::Missed,
                DayStatus::Pending,
                DayStatus::Future,
                DayStatus::Future,
            ]
        );
    }

    #[test]
    fn test_window_is_clipped_to_start_date() {
        let view = project_recent_days(
            date("2024-01-10"),
            Frequency::Daily,
            &DayMap::new(),
            date("2024-01-12"),
            DEFAULT_PROJECTION_DAYS,
        );
        assert_eq!(view.len(), 3);
        assert_eq!(view[0].date, date("2024-01-10"));
    }

    #[test]
    fn test_untracked_days_are_skipped() {
        // 2024-01-06 and 2024-01-07 are a weekend
        let view = project_days(
            date("2024-01-01"),
            Frequency::Weekdays,
            &DayMap::new(),
            date("2024-01-05"),
            date("2024-01-08"),
            date("2024-01-08"),
        );
        let dates: Vec<_> = view.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date("2024-01-05"), date("2024-01-08")]);
    }

    #[test]
    fn test_recent_window_length() {
        let view = project_recent_days(
            date("2023-01-01"),
            Frequency::Daily,
            &DayMap::new(),
            date("2024-01-31"),
            DEFAULT_PROJECTION_DAYS,
        );
        assert_eq!(view.len(), DEFAULT_PROJECTION_DAYS as usize + 1);
    }
}
