use chrono::NaiveDate;
use std::collections::BTreeMap;

use looplist_domain::habit_loop::{parse_iso_date, DayMap, DayStatus, HabitLoop, LoopRepository};
use looplist_domain::shared::{DomainError, LoopId};
use looplist_domain::user::UserContext;

/// Load a loop the caller owns. Someone else's loop reads as not found.
pub(super) async fn load_owned_loop(
    loop_repo: &dyn LoopRepository,
    user: &UserContext,
    loop_id: &str,
) -> Result<HabitLoop, DomainError> {
    let habit_loop = loop_repo
        .find_by_id(&LoopId::from_string(loop_id))
        .await?
        .filter(|l| l.is_owned_by(&user.user_id))
        .ok_or_else(|| DomainError::LoopNotFound(loop_id.to_string()))?;

    Ok(habit_loop)
}

pub(super) fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_iso_date)
        .transpose()
}

/// Parse a wire day record (`YYYY-MM-DD` -> status name)
pub(super) fn parse_day_entries(raw: &BTreeMap<String, String>) -> Result<DayMap, DomainError> {
    let mut entries = Vec::with_capacity(raw.len());
    for (date, status) in raw {
        entries.push((date.as_str(), status.parse::<DayStatus>()?));
    }
    DayMap::from_iso_entries(entries)
}
