use std::collections::BTreeMap;

use crate::application::commands::command_handler::Command;
use looplist_domain::user::UserContext;

/// Create loop command
#[derive(Debug, Clone)]
pub struct CreateLoopCommand {
    pub user: UserContext,
    pub title: String,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    /// `daily`, `weekdays`, `3x-week` or `custom`
    pub frequency: String,
    /// `YYYY-MM-DD`; today when absent
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// `private`, `public` or `friends`
    pub visibility: String,
    /// Imported past statuses keyed by `YYYY-MM-DD`, `checked` or `missed`.
    /// Replaces the configured backfill for this loop when present.
    pub history: Option<BTreeMap<String, String>>,
}

impl Command for CreateLoopCommand {}

/// Update loop command. `None` leaves a field untouched.
#[derive(Debug, Clone)]
pub struct UpdateLoopCommand {
    pub user: UserContext,
    pub loop_id: String,
    pub title: Option<String>,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    pub visibility: Option<String>,
    pub end_date: Option<String>,
    /// Day statuses merged into the record, keyed by `YYYY-MM-DD`
    pub days: Option<BTreeMap<String, String>>,
}

impl Command for UpdateLoopCommand {}

#[derive(Debug, Clone)]
pub struct DeleteLoopCommand {
    pub user: UserContext,
    pub loop_id: String,
}

impl Command for DeleteLoopCommand {}

#[derive(Debug, Clone)]
pub struct DeleteLoopResult {
    pub success: bool,
}

/// Check in (or mark missed) one day of a loop
#[derive(Debug, Clone)]
pub struct UpdateDayStatusCommand {
    pub user: UserContext,
    pub loop_id: String,
    /// `YYYY-MM-DD`; today when absent
    pub date: Option<String>,
    /// `checked`, `missed` or `pending`
    pub status: String,
}

impl Command for UpdateDayStatusCommand {}

#[derive(Debug, Clone)]
pub struct ToggleCheerCommand {
    pub user: UserContext,
    pub loop_id: String,
    pub emoji: String,
}

impl Command for ToggleCheerCommand {}

#[derive(Debug, Clone)]
pub struct CloneLoopCommand {
    pub user: UserContext,
    pub loop_id: String,
}

impl Command for CloneLoopCommand {}
