use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::{CloneLoopCommand, ToggleCheerCommand};
use crate::application::dtos::{LoopDto, PublicLoopDto, ToggleCheerResult};
use crate::presentation::commands::session_user;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

/// Public feed. Does not require a session.
pub async fn get_public_loops(state: &AppState) -> Result<Vec<PublicLoopDto>, CommandError> {
    Ok(state.queries.loops.get_public_loops().await?)
}

pub async fn toggle_cheer(
    loop_id: String,
    emoji: String,
    state: &AppState,
) -> Result<ToggleCheerResult, CommandError> {
    let command = ToggleCheerCommand {
        user: session_user(state).await?,
        loop_id,
        emoji,
    };

    let result = state
        .command_handlers
        .toggle_cheer
        .handle(command)
        .await
        .map_err(CommandError::from)?;

    Ok(result)
}

pub async fn clone_loop(loop_id: String, state: &AppState) -> Result<LoopDto, CommandError> {
    let command = CloneLoopCommand {
        user: session_user(state).await?,
        loop_id,
    };

    let result = state
        .command_handlers
        .clone_loop
        .handle(command)
        .await
        .map_err(CommandError::from)?;

    Ok(result)
}
