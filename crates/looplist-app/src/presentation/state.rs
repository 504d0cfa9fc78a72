use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::FeedbackEventHandler;
use crate::application::queries::LoopQueries;
use crate::application::services::AuthService;
use looplist_domain::events::EventBus;
use looplist_domain::habit_loop::LoopRepository;
use looplist_domain::shared::Clock;
use looplist_domain::user::UserRepository;
use looplist_infrastructure::persistence::SessionStorage;

/// Command handlers container
pub struct CommandHandlers {
    pub create_loop: Arc<CreateLoopCommandHandler>,
    pub update_loop: Arc<UpdateLoopCommandHandler>,
    pub delete_loop: Arc<DeleteLoopCommandHandler>,
    pub update_day_status: Arc<UpdateDayStatusCommandHandler>,
    pub toggle_cheer: Arc<ToggleCheerCommandHandler>,
    pub clone_loop: Arc<CloneLoopCommandHandler>,
}

pub struct Runtime {
    pub storage: Arc<SessionStorage>,
    pub event_bus: Arc<dyn EventBus>,
    pub clock: Arc<dyn Clock>,
    pub backfill: SharedBackfill,
}

pub struct Repositories {
    pub loops: Arc<dyn LoopRepository>,
    pub users: Arc<dyn UserRepository>,
}

pub struct Services {
    pub auth: Arc<AuthService>,
    pub feedback: Arc<FeedbackEventHandler>,
}

pub struct Queries {
    pub loops: Arc<LoopQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    pub async fn new(
        config: &crate::application::config::AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, looplist_domain::shared::DomainError> {
        crate::presentation::bootstrap::build_app_state(config, clock).await
    }
}
