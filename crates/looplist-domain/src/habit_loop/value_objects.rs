use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .map_err(|e| DomainError::InvalidInput(format!("Invalid date '{value}': {e}")))
}

/// How often a loop expects a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekdays")]
    Weekdays,
    #[serde(rename = "3x-week")]
    ThreeTimesWeek,
    #[serde(rename = "custom")]
    Custom,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekdays => "weekdays",
            Frequency::ThreeTimesWeek => "3x-week",
            Frequency::Custom => "custom",
        }
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekdays" => Ok(Frequency::Weekdays),
            "3x-week" => Ok(Frequency::ThreeTimesWeek),
            "custom" => Ok(Frequency::Custom),
            _ => Err(DomainError::InvalidFrequency(format!(
                "Unknown frequency: {s}"
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who can see a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
    Friends,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
            Visibility::Friends => "friends",
        }
    }
}

impl FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            "friends" => Ok(Visibility::Friends),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown visibility: {s}"
            ))),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status derived from the day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopStatus {
    Active,
    Broken,
    Completed,
}

impl LoopStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopStatus::Active => "active",
            LoopStatus::Broken => "broken",
            LoopStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single tracked day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Checked,
    Missed,
    Pending,
    /// Display only. Never written by the schedule generator.
    Future,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Checked => "checked",
            DayStatus::Missed => "missed",
            DayStatus::Pending => "pending",
            DayStatus::Future => "future",
        }
    }

    /// Checked and pending days keep a streak alive.
    pub fn extends_streak(&self) -> bool {
        matches!(self, DayStatus::Checked | DayStatus::Pending)
    }
}

impl FromStr for DayStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checked" => Ok(DayStatus::Checked),
            "missed" => Ok(DayStatus::Missed),
            "pending" => Ok(DayStatus::Pending),
            "future" => Ok(DayStatus::Future),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown day status: {s}"
            ))),
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sparse date -> status record of a loop.
///
/// Keys serialize as `YYYY-MM-DD`, so the JSON shape is a plain object whose
/// lexicographic key order is also chronological. Iteration is always in
/// ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayMap(BTreeMap<NaiveDate, DayStatus>);

impl DayMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build from ISO date strings, rejecting malformed keys.
    pub fn from_iso_entries<'a, I>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (&'a str, DayStatus)>,
    {
        let mut map = BTreeMap::new();
        for (date, status) in entries {
            map.insert(parse_iso_date(date)?, status);
        }
        Ok(Self(map))
    }

    pub fn get(&self, date: &NaiveDate) -> Option<DayStatus> {
        self.0.get(date).copied()
    }

    /// Insert or overwrite one entry, returning the previous status.
    pub fn insert(&mut self, date: NaiveDate, status: DayStatus) -> Option<DayStatus> {
        self.0.insert(date, status)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0.contains_key(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending date order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&NaiveDate, &DayStatus)> {
        self.0.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.keys()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<(NaiveDate, DayStatus)> {
        self.0.iter().next_back().map(|(d, s)| (*d, *s))
    }

    pub fn count(&self, status: DayStatus) -> usize {
        self.0.values().filter(|s| **s == status).count()
    }
}

impl FromIterator<(NaiveDate, DayStatus)> for DayMap {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, DayStatus)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Checked / missed / pending tallies shown on public loops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysCount {
    pub checked: u32,
    pub missed: u32,
    pub pending: u32,
}

impl DaysCount {
    pub fn from_days(days: &DayMap) -> Self {
        days.iter().fold(Self::default(), |mut acc, (_, status)| {
            match status {
                DayStatus::Checked => acc.checked += 1,
                DayStatus::Missed => acc.missed += 1,
                DayStatus::Pending => acc.pending += 1,
                DayStatus::Future => {}
            }
            acc
        })
    }
}
