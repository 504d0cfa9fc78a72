use serde::{Deserialize, Serialize};

use looplist_domain::habit_loop::{ProjectedDay, ISO_DATE_FORMAT};

/// Headline numbers for the signed-in user's dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_loops: u32,
    pub active_loops: u32,
    pub broken_loops: u32,
    pub completed_loops: u32,
    /// Highest current streak across loops
    pub best_current_streak: u32,
    /// Highest longest streak across loops
    pub best_longest_streak: u32,
    /// Mean completion rate (0.0 - 100.0), 0 without loops
    pub average_completion_rate: f64,
    pub checked_today: u32,
    pub pending_today: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapDayDto {
    pub date: String, // YYYY-MM-DD
    pub status: String,
}

impl From<&ProjectedDay> for HeatmapDayDto {
    fn from(day: &ProjectedDay) -> Self {
        Self {
            date: day.date.format(ISO_DATE_FORMAT).to_string(),
            status: day.status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapDto {
    pub loop_id: String,
    pub days: Vec<HeatmapDayDto>,
}
