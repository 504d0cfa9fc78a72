use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::habit_loop::{DayStatus, Frequency, LoopStatus};
use crate::impl_domain_event;
use crate::shared::{LoopId, UserId};

/// Event fired when a loop is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopCreated {
    pub loop_id: LoopId,
    pub user_id: UserId,
    pub title: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event fired when a loop's details or day record are edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopUpdated {
    pub loop_id: LoopId,
    pub user_id: UserId,
    pub days_merged: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopDeleted {
    pub loop_id: LoopId,
    pub user_id: UserId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event fired after a check-in, carrying the recomputed metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayStatusUpdated {
    pub loop_id: LoopId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub previous: Option<DayStatus>,
    pub status: DayStatus,
    pub loop_status: LoopStatus,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheerToggled {
    pub loop_id: LoopId,
    pub user_id: UserId,
    pub emoji: String,
    pub added: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopCloned {
    pub source_loop_id: LoopId,
    pub loop_id: LoopId,
    pub user_id: UserId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(
    LoopCreated,
    LoopUpdated,
    LoopDeleted,
    DayStatusUpdated,
    CheerToggled,
    LoopCloned,
);
