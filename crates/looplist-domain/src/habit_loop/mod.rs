//! Loops and the metrics engine behind them.
//!
//! The engine is three pure steps: `schedule` seeds the day record,
//! `streak` derives counters from it and `status` classifies the loop.
//! `HabitLoop` chains them whenever its day record changes.

mod aggregate;
mod backfill;
mod cheer;
mod projection;
mod repository;
mod schedule;
mod status;
mod streak;
mod value_objects;

#[cfg(test)]
mod aggregate_test;

pub use aggregate::{CheerToggle, HabitLoop, LoopDetailsUpdate, LoopDraft};
pub use backfill::{BackfillPolicy, HistoryBackfill, RandomBackfill, UniformBackfill};
pub use cheer::Cheer;
pub use projection::{project_days, project_recent_days, ProjectedDay, DEFAULT_PROJECTION_DAYS};
pub use repository::LoopRepository;
pub use schedule::{generate_initial_days, is_trackable};
pub use status::{
    classify_status, classify_status_with_metrics, GRADUATION_MIN_COMPLETION_RATE,
    GRADUATION_MIN_TRACKED_DAYS,
};
pub use streak::{compute_streak_metrics, StreakMetrics};
pub use value_objects::{
    parse_iso_date, DayMap, DayStatus, DaysCount, Frequency, LoopStatus, Visibility,
    ISO_DATE_FORMAT,
};
