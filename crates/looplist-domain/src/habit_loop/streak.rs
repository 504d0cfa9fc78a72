use serde::{Deserialize, Serialize};

use super::value_objects::{DayMap, DayStatus};

/// Counters derived from a day record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakMetrics {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Percentage in `[0, 100]`.
    pub completion_rate: f64,
    pub completed_days: u32,
    /// Every non-future entry, including today's pending day.
    pub tracked_days: u32,
}

/// Walk the record oldest-first and derive streaks and completion rate.
///
/// A pending day extends the running streak and counts toward the tracked
/// total without counting as completed.
pub fn compute_streak_metrics(days: &DayMap) -> StreakMetrics {
    let mut running = 0u32;
    let mut longest = 0u32;
    let mut completed = 0u32;
    let mut tracked = 0u32;

    for (_, status) in days.iter() {
        if status.extends_streak() {
            running += 1;
            if *status == DayStatus::Checked {
                completed += 1;
            }
            longest = longest.max(running);
        } else if *status == DayStatus::Missed {
            running = 0;
        }

        if *status != DayStatus::Future {
            tracked += 1;
        }
    }

    let completion_rate = if tracked > 0 {
        completed as f64 / tracked as f64 * 100.0
    } else {
        0.0
    };

    StreakMetrics {
        current_streak: running,
        longest_streak: longest,
        completion_rate,
        completed_days: completed,
        tracked_days: tracked,
    }
}
