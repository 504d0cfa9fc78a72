use crate::application::dtos::{LoginInput, RegisterInput, SessionDto, UpdateProfileInput, UserDto};
use crate::presentation::commands::session_user;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

pub async fn login(input: LoginInput, state: &AppState) -> Result<SessionDto, CommandError> {
    Ok(state.services.auth.login(input).await?)
}

pub async fn register(input: RegisterInput, state: &AppState) -> Result<SessionDto, CommandError> {
    Ok(state.services.auth.register(input).await?)
}

pub async fn logout(state: &AppState) -> Result<(), CommandError> {
    state.services.auth.logout().await;
    Ok(())
}

/// `None` when signed out
pub async fn get_current_user(state: &AppState) -> Result<Option<UserDto>, CommandError> {
    Ok(state.services.auth.current_profile().await)
}

pub async fn update_profile(
    input: UpdateProfileInput,
    state: &AppState,
) -> Result<UserDto, CommandError> {
    let user = session_user(state).await?;
    Ok(state.services.auth.update_profile(&user, input).await?)
}
