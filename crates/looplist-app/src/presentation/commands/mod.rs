pub mod auth;
pub mod loops;
pub mod social;
pub mod system;

pub use auth::*;
pub use loops::*;
pub use social::*;
pub use system::*;

use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use looplist_domain::user::UserContext;

/// The signed-in user, or `Unauthenticated`
pub(crate) async fn session_user(state: &AppState) -> Result<UserContext, CommandError> {
    state
        .services
        .auth
        .current_user()
        .await
        .ok_or_else(CommandError::unauthenticated)
}
