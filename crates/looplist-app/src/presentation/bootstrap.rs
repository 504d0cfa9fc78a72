use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::config::AppConfig;
use crate::application::event_handlers::FeedbackEventHandler;
use crate::application::queries::LoopQueries;
use crate::application::services::{seed_demo_data, AuthService};
use crate::presentation::state::{
    AppState, CommandHandlers, Queries, Repositories, Runtime, Services,
};
use looplist_domain::events::loop_events::*;
use looplist_domain::events::{EventBus, TypedEventHandlerWrapper};
use looplist_domain::habit_loop::LoopRepository;
use looplist_domain::shared::{Clock, DomainError};
use looplist_domain::user::UserRepository;
use looplist_infrastructure::events::InMemoryEventBus;
use looplist_infrastructure::persistence::repositories::{
    InMemoryLoopRepository, InMemoryUserRepository,
};
use looplist_infrastructure::persistence::SessionStorage;

/// Wire storage, repositories, the event bus, services and handlers, then
/// seed the demo data.
pub async fn build_app_state(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<AppState, DomainError> {
    let startup_started_at = Instant::now();

    let storage = Arc::new(SessionStorage::new());
    let loop_repo = Arc::new(InMemoryLoopRepository::new(storage.clone())) as Arc<dyn LoopRepository>;
    let user_repo = Arc::new(InMemoryUserRepository::new(storage.clone())) as Arc<dyn UserRepository>;
    let backfill = config.shared_backfill();
    info!(
        "✓ Storage ready (backfill={}, latency={})",
        config.backfill,
        if config.latency.is_disabled() { "off" } else { "on" }
    );

    info!("🔧 Initializing event bus...");
    let feedback = Arc::new(FeedbackEventHandler::new());
    let event_bus = Arc::new(InMemoryEventBus::new());
    register_feedback_handler(&event_bus, &feedback).await;
    let event_bus = event_bus as Arc<dyn EventBus>;
    info!("✓ Event bus initialized and handlers registered");

    info!("🌱 Seeding demo data...");
    let started_at = Instant::now();
    let report = seed_demo_data(
        user_repo.clone(),
        loop_repo.clone(),
        clock.clone(),
        backfill.clone(),
        config.seed,
    )
    .await?;
    info!(
        "✓ Demo data seeded: {} user(s), {} loop(s) ({}ms)",
        report.users_seeded,
        report.loops_seeded,
        started_at.elapsed().as_millis()
    );

    let latency = &config.latency;
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        storage.clone(),
        event_bus.clone(),
        clock.clone(),
        latency.clone(),
    ));
    let loop_queries = Arc::new(LoopQueries::new(
        loop_repo.clone(),
        user_repo.clone(),
        clock.clone(),
        latency.clone(),
    ));

    info!("🔧 Initializing command handlers...");
    let command_handlers = CommandHandlers {
        create_loop: Arc::new(CreateLoopCommandHandler::new(
            loop_repo.clone(),
            event_bus.clone(),
            clock.clone(),
            backfill.clone(),
            latency.create,
        )),
        update_loop: Arc::new(UpdateLoopCommandHandler::new(
            loop_repo.clone(),
            event_bus.clone(),
            clock.clone(),
            latency.update,
        )),
        delete_loop: Arc::new(DeleteLoopCommandHandler::new(
            loop_repo.clone(),
            event_bus.clone(),
            clock.clone(),
            latency.delete,
        )),
        update_day_status: Arc::new(UpdateDayStatusCommandHandler::new(
            loop_repo.clone(),
            event_bus.clone(),
            clock.clone(),
            latency.day_status,
        )),
        toggle_cheer: Arc::new(ToggleCheerCommandHandler::new(
            loop_repo.clone(),
            event_bus.clone(),
            clock.clone(),
            latency.cheer,
        )),
        clone_loop: Arc::new(CloneLoopCommandHandler::new(
            loop_repo.clone(),
            event_bus.clone(),
            clock.clone(),
            latency.clone,
        )),
    };
    info!("✓ Command handlers initialized");

    info!(
        "✅ AppState ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime {
            storage,
            event_bus,
            clock,
            backfill,
        },
        repositories: Repositories {
            loops: loop_repo,
            users: user_repo,
        },
        services: Services {
            auth: auth_service,
            feedback,
        },
        queries: Queries {
            loops: loop_queries,
        },
        command_handlers,
    })
}

async fn register_feedback_handler(bus: &InMemoryEventBus, feedback: &Arc<FeedbackEventHandler>) {
    let handler = feedback.as_ref().clone();
    bus.subscribe::<LoopCreated>(Arc::new(
        TypedEventHandlerWrapper::<LoopCreated, _>::new(handler.clone()),
    ))
    .await;
    bus.subscribe::<LoopDeleted>(Arc::new(
        TypedEventHandlerWrapper::<LoopDeleted, _>::new(handler.clone()),
    ))
    .await;
    bus.subscribe::<DayStatusUpdated>(Arc::new(
        TypedEventHandlerWrapper::<DayStatusUpdated, _>::new(handler.clone()),
    ))
    .await;
    bus.subscribe::<CheerToggled>(Arc::new(
        TypedEventHandlerWrapper::<CheerToggled, _>::new(handler.clone()),
    ))
    .await;
    bus.subscribe::<LoopCloned>(Arc::new(
        TypedEventHandlerWrapper::<LoopCloned, _>::new(handler),
    ))
    .await;
}
