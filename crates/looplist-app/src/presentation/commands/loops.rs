use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::*;
use crate::application::dtos::{
    CreateLoopInput, DashboardStatsDto, HeatmapDto, LoopDto, UpdateDayStatusInput,
    UpdateLoopInput,
};
use crate::presentation::commands::session_user;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use looplist_domain::habit_loop::DEFAULT_PROJECTION_DAYS;

/// Loops of the signed-in user
pub async fn get_loops(state: &AppState) -> Result<Vec<LoopDto>, CommandError> {
    let user = session_user(state).await?;
    Ok(state.queries.loops.get_user_loops(&user).await?)
}

pub async fn get_loop(loop_id: String, state: &AppState) -> Result<LoopDto, CommandError> {
    let user = session_user(state).await?;
    Ok(state.queries.loops.get_loop(&user, &loop_id).await?)
}

pub async fn create_loop(input: CreateLoopInput, state: &AppState) -> Result<LoopDto, CommandError> {
    let command = CreateLoopCommand {
        user: session_user(state).await?,
        title: input.title,
        emoji: input.emoji,
        cover_image: input.cover_image,
        frequency: input.frequency,
        start_date: input.start_date,
        end_date: input.end_date,
        visibility: input.visibility,
        history: input.history,
    };

    let result = state
        .command_handlers
        .create_loop
        .handle(command)
        .await
        .map_err(CommandError::from)?;

    Ok(result)
}

pub async fn update_loop(input: UpdateLoopInput, state: &AppState) -> Result<LoopDto, CommandError> {
    let command = UpdateLoopCommand {
        user: session_user(state).await?,
        loop_id: input.loop_id,
        title: input.title,
        emoji: input.emoji,
        cover_image: input.cover_image,
        visibility: input.visibility,
        end_date: input.end_date,
        days: input.days,
    };

    let result = state
        .command_handlers
        .update_loop
        .handle(command)
        .await
        .map_err(CommandError::from)?;

    Ok(result)
}

pub async fn delete_loop(loop_id: String, state: &AppState) -> Result<bool, CommandError> {
    let command = DeleteLoopCommand {
        user: session_user(state).await?,
        loop_id,
    };

    let result = state
        .command_handlers
        .delete_loop
        .handle(command)
        .await
        .map_err(CommandError::from)?;

    Ok(result.success)
}

/// Check in, or mark a day missed. `date` defaults to today.
pub async fn update_day_status(
    input: UpdateDayStatusInput,
    state: &AppState,
) -> Result<LoopDto, CommandError> {
    let command = UpdateDayStatusCommand {
        user: session_user(state).await?,
        loop_id: input.loop_id,
        date: input.date,
        status: input.status,
    };

    let result = state
        .command_handlers
        .update_day_status
        .handle(command)
        .await
        .map_err(CommandError::from)?;

    Ok(result)
}

pub async fn get_dashboard_stats(state: &AppState) -> Result<DashboardStatsDto, CommandError> {
    let user = session_user(state).await?;
    Ok(state.queries.loops.get_dashboard_stats(&user).await?)
}

/// Heatmap window; `max_days` defaults to two weeks
pub async fn get_heatmap(
    loop_id: String,
    max_days: Option<u32>,
    state: &AppState,
) -> Result<HeatmapDto, CommandError> {
    let user = session_user(state).await?;
    let max_days = max_days.unwrap_or(DEFAULT_PROJECTION_DAYS);
    Ok(state
        .queries
        .loops
        .get_heatmap(&user, &loop_id, max_days)
        .await?)
}
