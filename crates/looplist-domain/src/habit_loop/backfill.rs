use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::value_objects::{DayMap, DayStatus};

/// Decides the status of a trackable day that lies before the creation date
/// of a schedule.
///
/// Only `Checked` and `Missed` are meaningful answers; the schedule generator
/// coerces anything else to `Missed`.
pub trait BackfillPolicy {
    fn status_for(&mut self, date: NaiveDate) -> DayStatus;
}

/// Demo seeding: each past day is checked with probability `checked_ratio`.
pub struct RandomBackfill {
    rng: StdRng,
    checked_ratio: f64,
}

impl RandomBackfill {
    pub const DEFAULT_CHECKED_RATIO: f64 = 0.7;

    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            checked_ratio: Self::DEFAULT_CHECKED_RATIO,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            checked_ratio: Self::DEFAULT_CHECKED_RATIO,
        }
    }

    pub fn with_checked_ratio(mut self, ratio: f64) -> Self {
        self.checked_ratio = ratio.clamp(0.0, 1.0);
        self
    }
}

impl Default for RandomBackfill {
    fn default() -> Self {
        Self::new()
    }
}

impl BackfillPolicy for RandomBackfill {
    fn status_for(&mut self, _date: NaiveDate) -> DayStatus {
        if self.rng.gen_bool(self.checked_ratio) {
            DayStatus::Checked
        } else {
            DayStatus::Missed
        }
    }
}

/// Every past day gets the same status.
#[derive(Debug, Clone, Copy)]
pub struct UniformBackfill(pub DayStatus);

impl BackfillPolicy for UniformBackfill {
    fn status_for(&mut self, _date: NaiveDate) -> DayStatus {
        self.0
    }
}

/// Imported history. Days without a record count as missed.
#[derive(Debug, Clone, Default)]
pub struct HistoryBackfill {
    history: DayMap,
}

impl HistoryBackfill {
    pub fn new(history: DayMap) -> Self {
        Self { history }
    }
}

impl BackfillPolicy for HistoryBackfill {
    fn status_for(&mut self, date: NaiveDate) -> DayStatus {
        self.history.get(&date).unwrap_or(DayStatus::Missed)
    }
}
