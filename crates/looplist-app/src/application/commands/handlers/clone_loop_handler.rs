use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::CloneLoopCommand;
use crate::application::dtos::LoopDto;
use looplist_domain::events::loop_events::LoopCloned;
use looplist_domain::events::EventBus;
use looplist_domain::habit_loop::{HabitLoop, LoopRepository};
use looplist_domain::shared::{Clock, DomainError, LoopId};
use looplist_infrastructure::config::simulate_latency;

/// Copy a public loop into the caller's own list
pub struct CloneLoopCommandHandler {
    loop_repo: Arc<dyn LoopRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl CloneLoopCommandHandler {
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
impl CommandHandler<CloneLoopCommand> for CloneLoopCommandHandler {
    type Result = LoopDto;

    async fn handle(&self, cmd: CloneLoopCommand) -> Result<Self::Result, DomainError> {
        simulate_latency(self.latency).await;
        info!(
            "Handling CloneLoopCommand loop_id={} user_id={}",
            cmd.loop_id, cmd.user.user_id
        );

        // Only public loops can be cloned; anything else reads as not found
        let source = self
            .loop_repo
            .find_by_id(&LoopId::from_string(&cmd.loop_id))
            .await?
            .filter(HabitLoop::is_public)
            .ok_or_else(|| DomainError::LoopNotFound(cmd.loop_id.clone()))?;

        let now = self.clock.now();
        let copy =
            HabitLoop::clone_for(&source, cmd.user.user_id.clone(), self.clock.today(), now);
        self.loop_repo.save(&copy).await?;

        info!("Loop cloned: {} -> {} ({})", source.id(), copy.id(), copy.title());

        let event = LoopCloned {
            source_loop_id: source.id().clone(),
            loop_id: copy.id().clone(),
            user_id: copy.user_id().clone(),
            title: copy.title().to_string(),
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(LoopDto::from(&copy))
    }
}
