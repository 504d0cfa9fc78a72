use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use looplist_domain::habit_loop::{Cheer, DayMap, DaysCount, HabitLoop, ISO_DATE_FORMAT};
use looplist_domain::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheerDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub emoji: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Cheer> for CheerDto {
    fn from(cheer: &Cheer) -> Self {
        Self {
            id: cheer.id().to_string(),
            user_id: cheer.user_id().to_string(),
            user_name: cheer.user_name().to_string(),
            emoji: cheer.emoji().to_string(),
            timestamp: cheer.timestamp(),
        }
    }
}

/// A loop as its owner sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopDto {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    pub frequency: String,
    pub start_date: String, // YYYY-MM-DD
    pub end_date: Option<String>,
    pub visibility: String,
    pub status: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub days: DayMap,
    pub cheers: Vec<CheerDto>,
}

impl From<&HabitLoop> for LoopDto {
    fn from(l: &HabitLoop) -> Self {
        Self {
            id: l.id().to_string(),
            user_id: l.user_id().to_string(),
            title: l.title().to_string(),
            emoji: l.emoji().map(str::to_string),
            cover_image: l.cover_image().map(str::to_string),
            frequency: l.frequency().to_string(),
            start_date: l.start_date().format(ISO_DATE_FORMAT).to_string(),
            end_date: l.end_date().map(|d| d.format(ISO_DATE_FORMAT).to_string()),
            visibility: l.visibility().to_string(),
            status: l.status().to_string(),
            current_streak: l.current_streak(),
            longest_streak: l.longest_streak(),
            completion_rate: l.completion_rate(),
            created_at: l.created_at(),
            updated_at: l.updated_at(),
            days: l.days().clone(),
            cheers: l.cheers().iter().map(CheerDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopOwnerDto {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl From<&User> for LoopOwnerDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            avatar: user.avatar().map(str::to_string),
        }
    }
}

/// A loop in the public feed: no day record, owner summary and tallies instead
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLoopDto {
    pub id: String,
    pub user_id: String,
    pub user: LoopOwnerDto,
    pub title: String,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    pub frequency: String,
    pub start_date: String,
    pub visibility: String,
    pub status: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub days_count: DaysCount,
    pub cheers: Vec<CheerDto>,
}

impl PublicLoopDto {
    pub fn new(l: &HabitLoop, owner: LoopOwnerDto) -> Self {
        Self {
            id: l.id().to_string(),
            user_id: l.user_id().to_string(),
            user: owner,
            title: l.title().to_string(),
            emoji: l.emoji().map(str::to_string),
            cover_image: l.cover_image().map(str::to_string),
            frequency: l.frequency().to_string(),
            start_date: l.start_date().format(ISO_DATE_FORMAT).to_string(),
            visibility: l.visibility().to_string(),
            status: l.status().to_string(),
            current_streak: l.current_streak(),
            longest_streak: l.longest_streak(),
            completion_rate: l.completion_rate(),
            created_at: l.created_at(),
            updated_at: l.updated_at(),
            days_count: l.days_count(),
            cheers: l.cheers().iter().map(CheerDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCheerResult {
    pub loop_id: String,
    pub added: bool,
    pub cheers: Vec<CheerDto>,
}

/// Frontend-facing create input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoopInput {
    pub title: String,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    pub frequency: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub visibility: String,
    #[serde(default)]
    pub history: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoopInput {
    pub loop_id: String,
    pub title: Option<String>,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    pub visibility: Option<String>,
    pub end_date: Option<String>,
    pub days: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDayStatusInput {
    pub loop_id: String,
    pub date: Option<String>,
    pub status: String,
}
