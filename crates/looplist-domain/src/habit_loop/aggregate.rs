use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::backfill::BackfillPolicy;
use super::cheer::Cheer;
use super::projection::{project_recent_days, ProjectedDay};
use super::schedule::{generate_initial_days, is_trackable};
use super::status::classify_status_with_metrics;
use super::streak::{compute_streak_metrics, StreakMetrics};
use super::value_objects::{DayMap, DayStatus, DaysCount, Frequency, LoopStatus, Visibility};
use crate::shared::{DomainError, LoopId, UserId};

/// Everything a caller chooses when creating a loop.
#[derive(Debug, Clone)]
pub struct LoopDraft {
    pub user_id: UserId,
    pub title: String,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub visibility: Visibility,
}

/// Editable presentation fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct LoopDetailsUpdate {
    pub title: Option<String>,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    pub visibility: Option<Visibility>,
    pub end_date: Option<NaiveDate>,
}

/// Outcome of toggling a cheer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheerToggle {
    Added,
    Removed,
}

/// A recurring micro-habit and its day record.
///
/// Streaks, completion rate and status are private and only ever derived
/// from `days`; every method that touches `days` recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLoop {
    id: LoopId,
    user_id: UserId,
    title: String,
    emoji: Option<String>,
    cover_image: Option<String>,
    frequency: Frequency,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    visibility: Visibility,
    status: LoopStatus,
    current_streak: u32,
    longest_streak: u32,
    completion_rate: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    days: DayMap,
    #[serde(default)]
    cheers: Vec<Cheer>,
}

impl HabitLoop {
    pub const MIN_TITLE_LEN: usize = 3;

    pub fn new(
        draft: LoopDraft,
        today: NaiveDate,
        now: DateTime<Utc>,
        backfill: &mut dyn BackfillPolicy,
    ) -> Result<Self, DomainError> {
        let title = validate_title(&draft.title)?;
        validate_end_date(draft.start_date, draft.end_date)?;

        let days = generate_initial_days(draft.start_date, draft.frequency, today, backfill)?;

        let mut habit_loop = Self {
            id: LoopId::new(),
            user_id: draft.user_id,
            title,
            emoji: normalize_optional(draft.emoji),
            cover_image: normalize_optional(draft.cover_image),
            frequency: draft.frequency,
            start_date: draft.start_date,
            end_date: draft.end_date,
            visibility: draft.visibility,
            status: LoopStatus::Active,
            current_streak: 0,
            longest_streak: 0,
            completion_rate: 0.0,
            created_at: now,
            updated_at: now,
            days,
            cheers: Vec::new(),
        };
        habit_loop.recompute(None);
        Ok(habit_loop)
    }

    /// Private copy of another loop's habit for `user_id`, starting today
    /// with no history and no cheers.
    pub fn clone_for(
        source: &HabitLoop,
        user_id: UserId,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        let mut days = DayMap::new();
        if is_trackable(source.frequency, today, today) {
            days.insert(today, DayStatus::Pending);
        }

        let mut habit_loop = Self {
            id: LoopId::new(),
            user_id,
            title: source.title.clone(),
            emoji: source.emoji.clone(),
            cover_image: source.cover_image.clone(),
            frequency: source.frequency,
            start_date: today,
            end_date: None,
            visibility: Visibility::Private,
            status: LoopStatus::Active,
            current_streak: 0,
            longest_streak: 0,
            completion_rate: 0.0,
            created_at: now,
            updated_at: now,
            days,
            cheers: Vec::new(),
        };
        habit_loop.recompute(None);
        habit_loop
    }

    pub fn id(&self) -> &LoopId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref()
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn completion_rate(&self) -> f64 {
        self.completion_rate
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn days(&self) -> &DayMap {
        &self.days
    }

    pub fn cheers(&self) -> &[Cheer] {
        &self.cheers
    }

    pub fn days_count(&self) -> DaysCount {
        DaysCount::from_days(&self.days)
    }

    pub fn metrics(&self) -> StreakMetrics {
        compute_streak_metrics(&self.days)
    }

    pub fn recent_days(&self, today: NaiveDate, max_days: u32) -> Vec<ProjectedDay> {
        project_recent_days(self.start_date, self.frequency, &self.days, today, max_days)
    }

    /// Record a check-in (or a miss) for one trackable day.
    ///
    /// Returns the status the day had before.
    pub fn apply_day_status(
        &mut self,
        date: NaiveDate,
        status: DayStatus,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Option<DayStatus>, DomainError> {
        self.ensure_writable(date, status, today)?;

        let previous = self.days.insert(date, status);
        self.updated_at = now;
        self.recompute(Some(status));
        Ok(previous)
    }

    /// Write several day statuses at once, e.g. from an import.
    ///
    /// Entries are merged into the record, so dates already tracked stay.
    /// Every entry is checked before anything is written.
    pub fn merge_days(
        &mut self,
        days: DayMap,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        for (date, status) in days.iter() {
            self.ensure_writable(*date, *status, today)?;
        }

        for (date, status) in days.iter() {
            self.days.insert(*date, *status);
        }
        self.updated_at = now;
        self.recompute(None);
        Ok(())
    }

    pub fn update_details(
        &mut self,
        update: LoopDetailsUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let title = update.title.as_deref().map(validate_title).transpose()?;
        if update.end_date.is_some() {
            validate_end_date(self.start_date, update.end_date)?;
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(emoji) = update.emoji {
            self.emoji = normalize_optional(Some(emoji));
        }
        if let Some(cover_image) = update.cover_image {
            self.cover_image = normalize_optional(Some(cover_image));
        }
        if let Some(visibility) = update.visibility {
            self.visibility = visibility;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = Some(end_date);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Add `emoji` from `user_id`, or take it back if already given.
    pub fn toggle_cheer(
        &mut self,
        user_id: &UserId,
        user_name: &str,
        emoji: &str,
        now: DateTime<Utc>,
    ) -> Result<CheerToggle, DomainError> {
        if !self.is_public() {
            return Err(DomainError::LoopNotPublic(self.id.to_string()));
        }

        let before = self.cheers.len();
        self.cheers.retain(|c| !c.is_same_reaction(user_id, emoji));
        if self.cheers.len() < before {
            return Ok(CheerToggle::Removed);
        }

        self.cheers.push(Cheer::new(
            user_id.clone(),
            user_name.to_string(),
            emoji.to_string(),
            now,
        )?);
        Ok(CheerToggle::Added)
    }

    fn recompute(&mut self, applied: Option<DayStatus>) {
        let metrics = compute_streak_metrics(&self.days);
        self.current_streak = metrics.current_streak;
        self.longest_streak = metrics.longest_streak;
        self.completion_rate = metrics.completion_rate;
        self.status = classify_status_with_metrics(&self.days, &metrics, applied);
    }

    /// `future` is display-only and never stored.
    fn ensure_writable(
        &self,
        date: NaiveDate,
        status: DayStatus,
        today: NaiveDate,
    ) -> Result<(), DomainError> {
        if status == DayStatus::Future {
            return Err(DomainError::Validation(
                "A day cannot be marked as future".to_string(),
            ));
        }
        if date > today {
            return Err(DomainError::Validation(format!(
                "Cannot check in for {date}, it is after today ({today})"
            )));
        }
        self.ensure_trackable(date)
    }

    fn ensure_trackable(&self, date: NaiveDate) -> Result<(), DomainError> {
        if date < self.start_date {
            return Err(DomainError::Validation(format!(
                "{date} is before the loop start date {}",
                self.start_date
            )));
        }
        if let Some(end_date) = self.end_date {
            if date > end_date {
                return Err(DomainError::Validation(format!(
                    "{date} is after the loop end date {end_date}"
                )));
            }
        }
        if !is_trackable(self.frequency, self.start_date, date) {
            return Err(DomainError::Validation(format!(
                "{date} is not a tracked day for a {} loop",
                self.frequency
            )));
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.chars().count() < HabitLoop::MIN_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "Title must be at least {} characters",
            HabitLoop::MIN_TITLE_LEN
        )));
    }
    Ok(title.to_string())
}

fn validate_end_date(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), DomainError> {
    match end {
        Some(end) if end < start => Err(DomainError::Validation(format!(
            "End date {end} is before start date {start}"
        ))),
        _ => Ok(()),
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
