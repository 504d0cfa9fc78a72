use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use super::shared::load_owned_loop;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::{DeleteLoopCommand, DeleteLoopResult};
use looplist_domain::events::loop_events::LoopDeleted;
use looplist_domain::events::EventBus;
use looplist_domain::habit_loop::LoopRepository;
use looplist_domain::shared::{Clock, DomainError};
use looplist_infrastructure::config::simulate_latency;

/// Delete loop command handler
pub struct DeleteLoopCommandHandler {
    loop_repo: Arc<dyn LoopRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl DeleteLoopCommandHandler {
    pub fn new(
        loop_repo: Arc<dyn LoopRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        latency: Duration,
    ) -> Self {
        Self {
            loop_repo,
            event_bus,
            clock,
            latency,
        }
    }
}

#[async_trait]
impl CommandHandler<DeleteLoopCommand> for DeleteLoopCommandHandler {
    type Result = DeleteLoopResult;

    async fn handle(&self, cmd: DeleteLoopCommand) -> Result<Self::Result, DomainError> {
        simulate_latency(self.latency).await;
        info!("Handling DeleteLoopCommand for loop: {}", cmd.loop_id);

        let habit_loop =
            load_owned_loop(self.loop_repo.as_ref(), &cmd.user, &cmd.loop_id).await?;
        self.loop_repo.delete(habit_loop.id()).await?;

        info!("Loop deleted: {} ({})", habit_loop.title(), habit_loop.id());

        let event = LoopDeleted {
            loop_id: habit_loop.id().clone(),
            user_id: habit_loop.user_id().clone(),
            title: habit_loop.title().to_string(),
            occurred_at: self.clock.now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(DeleteLoopResult { success: true })
    }
}
