use chrono::{Datelike, NaiveDate, Weekday};

use super::backfill::BackfillPolicy;
use super::value_objects::{DayMap, DayStatus, Frequency};
use crate::shared::DomainError;

/// Whether `date` requires a check-in under `frequency`.
///
/// `ThreeTimesWeek` is fixed to Monday / Wednesday / Friday and `Custom` to
/// every other day counted from `start_date`.
pub fn is_trackable(frequency: Frequency, start_date: NaiveDate, date: NaiveDate) -> bool {
    match frequency {
        Frequency::Daily => true,
        Frequency::Weekdays => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        Frequency::ThreeTimesWeek => {
            matches!(date.weekday(), Weekday::Mon | Weekday::Wed | Weekday::Fri)
        }
        Frequency::Custom => (date - start_date).num_days().rem_euclid(2) == 0,
    }
}

/// Seed the day record of a new loop, from `start_date` through `today`.
///
/// Past trackable days take their status from `backfill`, today's trackable
/// day is `Pending`, non-trackable days are left out.
pub fn generate_initial_days(
    start_date: NaiveDate,
    frequency: Frequency,
    today: NaiveDate,
    backfill: &mut dyn BackfillPolicy,
) -> Result<DayMap, DomainError> {
    if start_date > today {
        return Err(DomainError::InvalidSchedule(format!(
            "Start date {start_date} is after today ({today})"
        )));
    }

    let mut days = DayMap::new();
    for date in start_date.iter_days().take_while(|d| *d <= today) {
        if !is_trackable(frequency, start_date, date) {
            continue;
        }

        let status = if date < today {
            match backfill.status_for(date) {
                DayStatus::Checked => DayStatus::Checked,
                _ => DayStatus::Missed,
            }
        } else {
            DayStatus::Pending
        };
        days.insert(date, status);
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit_loop::backfill::{RandomBackfill, UniformBackfill};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekdays,
        Frequency::ThreeTimesWeek,
        Frequency::Custom,
    ];

    #[test]
    fn test_every_key_is_trackable_and_no_trackable_day_is_missing() {
        let start = date("2024-01-03");
        let today = date("2024-03-10");
        for frequency in ALL {
            let days =
                generate_initial_days(start, frequency, today, &mut RandomBackfill::seeded(9))
                    .unwrap();
            for day in start.iter_days().take_while(|d| *d <= today) {
                assert_eq!(
                    days.contains(&day),
                    is_trackable(frequency, start, day),
                    "{frequency} {day}"
                );
            }
        }
    }

    #[test]
    fn test_daily_size_is_inclusive_day_count() {
        let start = date("2024-01-01");
        let today = date("2024-01-31");
        let days = generate_initial_days(
            start,
            Frequency::Daily,
            today,
            &mut UniformBackfill(DayStatus::Checked),
        )
        .unwrap();
        assert_eq!(days.len() as i64, (today - start).num_days() + 1);
    }

    #[test]
    fn test_weekdays_skip_weekends() {
        let days = generate_initial_days(
            date("2024-01-01"),
            Frequency::Weekdays,
            date("2024-02-29"),
            &mut RandomBackfill::seeded(3),
        )
        .unwrap();
        assert!(!days.is_empty());
        assert!(days
            .dates()
            .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn test_three_times_week_is_mon_wed_fri() {
        // 2024-01-01 is a Monday
        let days = generate_initial_days(
            date("2024-01-01"),
            Frequency::ThreeTimesWeek,
            date("2024-01-07"),
            &mut UniformBackfill(DayStatus::Checked),
        )
        .unwrap();
        let keys: Vec<_> = days.dates().copied().collect();
        assert_eq!(
            keys,
            vec![date("2024-01-01"), date("2024-01-03"), date("2024-01-05")]
        );
    }

    #[test]
    fn test_custom_is_every_other_day_from_start() {
        let days = generate_initial_days(
            date("2024-01-02"),
            Frequency::Custom,
            date("2024-01-07"),
            &mut UniformBackfill(DayStatus::Checked),
        )
        .unwrap();
        let keys: Vec<_> = days.dates().copied().collect();
        assert_eq!(
            keys,
            vec![date("2024-01-02"), date("2024-01-04"), date("2024-01-06")]
        );
    }

    #[test]
    fn test_start_today_yields_single_pending_entry() {
        let today = date("2024-05-20");
        let days = generate_initial_days(
            today,
            Frequency::Daily,
            today,
            &mut RandomBackfill::seeded(1),
        )
        .unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days.get(&today), Some(DayStatus::Pending));
    }

    #[test]
    fn test_start_today_on_untracked_day_is_empty() {
        // 2024-05-18 is a Saturday
        let today = date("2024-05-18");
        let days = generate_initial_days(
            today,
            Frequency::Weekdays,
            today,
            &mut RandomBackfill::seeded(1),
        )
        .unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn test_future_start_is_rejected() {
        let result = generate_initial_days(
            date("2024-05-21"),
            Frequency::Daily,
            date("2024-05-20"),
            &mut RandomBackfill::seeded(1),
        );
        assert!(matches!(result, Err(DomainError::InvalidSchedule(_))));
    }

    #[test]
    fn test_only_today_is_pending_and_future_never_generated() {
        let today = date("2024-02-10");
        let days = generate_initial_days(
            date("2024-01-10"),
            Frequency::Daily,
            today,
            &mut RandomBackfill::seeded(11),
        )
        .unwrap();
        for (day, status) in days.iter() {
            assert_ne!(*status, DayStatus::Future);
            if *day == today {
                assert_eq!(*status, DayStatus::Pending);
            } else {
                assert!(matches!(status, DayStatus::Checked | DayStatus::Missed));
            }
        }
    }

    #[test]
    fn test_backfill_answers_are_coerced_to_checked_or_missed() {
        let today = date("2024-01-05");
        let days = generate_initial_days(
            date("2024-01-01"),
            Frequency::Daily,
            today,
            &mut UniformBackfill(DayStatus::Future),
        )
        .unwrap();
        assert_eq!(days.count(DayStatus::Missed), 4);
        assert_eq!(days.count(DayStatus::Pending), 1);
    }
}
