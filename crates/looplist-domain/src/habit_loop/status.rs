use super::streak::StreakMetrics;
use super::value_objects::{DayMap, DayStatus, LoopStatus};

/// Tracked days needed before a loop can graduate.
pub const GRADUATION_MIN_TRACKED_DAYS: u32 = 30;
/// Completion rate (percent) needed to graduate.
pub const GRADUATION_MIN_COMPLETION_RATE: f64 = 90.0;

/// Days-only classification: the most recent decisive entry wins.
///
/// A missed day means `Broken`, a checked or pending day means `Active`.
/// An empty record is `Active`.
pub fn classify_status(days: &DayMap) -> LoopStatus {
    for (_, status) in days.iter().rev() {
        match status {
            DayStatus::Missed => return LoopStatus::Broken,
            DayStatus::Checked | DayStatus::Pending => return LoopStatus::Active,
            DayStatus::Future => {}
        }
    }

    LoopStatus::Active
}

/// Metrics-aware classification, the rule applied after every recompute.
///
/// Graduation (`Completed`) takes priority and is re-evaluated each time, so
/// a loop can fall back out of it. `applied` is the status just written by a
/// check-in; without one the most recent entry stands in. When neither the
/// broken nor the active condition holds, the days-only rule decides.
pub fn classify_status_with_metrics(
    days: &DayMap,
    metrics: &StreakMetrics,
    applied: Option<DayStatus>,
) -> LoopStatus {
    if metrics.tracked_days >= GRADUATION_MIN_TRACKED_DAYS
        && metrics.completion_rate >= GRADUATION_MIN_COMPLETION_RATE
    {
        return LoopStatus::Completed;
    }

    let applied = applied.or_else(|| days.latest().map(|(_, status)| status));

    if applied == Some(DayStatus::Missed) && metrics.current_streak == 0 {
        return LoopStatus::Broken;
    }

    if metrics.current_streak > 0 {
        return LoopStatus::Active;
    }

    classify_status(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit_loop::streak::compute_streak_metrics;
    use chrono::{Duration, NaiveDate};

    fn days(entries: &[(&str, DayStatus)]) -> DayMap {
        DayMap::from_iso_entries(entries.iter().copied()).unwrap()
    }

    fn run(start: &str, statuses: &[DayStatus]) -> DayMap {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| (start + Duration::days(i as i64), *s))
            .collect()
    }

    #[test]
    fn test_basic_empty_is_active() {
        assert_eq!(classify_status(&DayMap::new()), LoopStatus::Active);
    }

    #[test]
    fn test_basic_single_missed_is_broken() {
        let record = days(&[("2024-01-01", DayStatus::Missed)]);
        assert_eq!(classify_status(&record), LoopStatus::Broken);
    }

    #[test]
    fn test_basic_uses_most_recent_decisive_entry() {
        let record = days(&[
            ("2024-01-01", DayStatus::Missed),
            ("2024-01-02", DayStatus::Checked),
            ("2024-01-03", DayStatus::Future),
        ]);
        assert_eq!(classify_status(&record), LoopStatus::Active);

        let record = days(&[
            ("2024-01-01", DayStatus::Checked),
            ("2024-01-02", DayStatus::Missed),
        ]);
        assert_eq!(classify_status(&record), LoopStatus::Broken);
    }

    #[test]
    fn test_graduates_at_ninety_percent_over_thirty_days() {
        let mut statuses = vec![DayStatus::Checked; 30];
        statuses[3] = DayStatus::Missed;
        statuses[20] = DayStatus::Missed;
        let record = run("2024-01-01", &statuses);
        let metrics = compute_streak_metrics(&record);
        assert_eq!(metrics.tracked_days, 30);
        assert!(metrics.completion_rate > 93.0);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, Some(DayStatus::Checked)),
            LoopStatus::Completed
        );
    }

    #[test]
    fn test_graduation_beats_a_fresh_miss() {
        let mut statuses = vec![DayStatus::Checked; 40];
        statuses[39] = DayStatus::Missed;
        let record = run("2024-01-01", &statuses);
        let metrics = compute_streak_metrics(&record);
        assert_eq!(metrics.current_streak, 0);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, Some(DayStatus::Missed)),
            LoopStatus::Completed
        );
    }

    #[test]
    fn test_too_few_days_never_graduates() {
        let record = run("2024-01-01", &[DayStatus::Checked; 29]);
        let metrics = compute_streak_metrics(&record);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, None),
            LoopStatus::Active
        );
    }

    #[test]
    fn test_completed_is_not_terminal() {
        let mut statuses = vec![DayStatus::Checked; 30];
        let record = run("2024-01-01", &statuses);
        let metrics = compute_streak_metrics(&record);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, None),
            LoopStatus::Completed
        );

        statuses.extend([DayStatus::Missed; 5]);
        let record = run("2024-01-01", &statuses);
        let metrics = compute_streak_metrics(&record);
        assert!(metrics.completion_rate < 90.0);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, Some(DayStatus::Missed)),
            LoopStatus::Broken
        );
    }

    #[test]
    fn test_applied_missed_with_zero_streak_is_broken() {
        let record = days(&[
            ("2024-01-01", DayStatus::Checked),
            ("2024-01-02", DayStatus::Missed),
        ]);
        let metrics = compute_streak_metrics(&record);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, Some(DayStatus::Missed)),
            LoopStatus::Broken
        );
    }

    #[test]
    fn test_running_streak_is_active() {
        let record = days(&[
            ("2024-01-01", DayStatus::Missed),
            ("2024-01-02", DayStatus::Pending),
        ]);
        let metrics = compute_streak_metrics(&record);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, None),
            LoopStatus::Active
        );
    }

    #[test]
    fn test_past_check_in_behind_a_miss_falls_back_to_days_rule() {
        let record = days(&[
            ("2024-01-01", DayStatus::Checked),
            ("2024-01-02", DayStatus::Missed),
        ]);
        let metrics = compute_streak_metrics(&record);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, Some(DayStatus::Checked)),
            LoopStatus::Broken
        );
    }

    #[test]
    fn test_empty_record_with_metrics_is_active() {
        let record = DayMap::new();
        let metrics = compute_streak_metrics(&record);
        assert_eq!(
            classify_status_with_metrics(&record, &metrics, None),
            LoopStatus::Active
        );
    }
}
