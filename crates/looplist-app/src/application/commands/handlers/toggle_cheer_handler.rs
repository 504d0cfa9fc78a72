use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::ToggleCheerCommand;
use crate::application::dtos::{CheerDto, ToggleCheerResult};
use looplist_domain::events::loop_events::CheerToggled;
use looplist_domain::events::EventBus;
use looplist_domain::habit_loop::{CheerToggle, LoopRepository};
use looplist_domain::shared::{Clock, DomainError, LoopId};
use looplist_infrastructure::config::simulate_latency;

/// Toggle a cheer on someone's public loop
pub struct ToggleCheerCommandHandler {
    loop_repo: Arc<dyn LoopRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl ToggleCheerCommandHandler {
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
impl CommandHandler<ToggleCheerCommand> for ToggleCheerCommandHandler {
    type Result = ToggleCheerResult;

    async fn handle(&self, cmd: ToggleCheerCommand) -> Result<Self::Result, DomainError> {
        simulate_latency(self.latency).await;

        let loop_id = LoopId::from_string(&cmd.loop_id);
        let mut habit_loop = self
            .loop_repo
            .find_by_id(&loop_id)
            .await?
            .ok_or_else(|| DomainError::LoopNotFound(cmd.loop_id.clone()))?;

        let now = self.clock.now();
        let outcome =
            habit_loop.toggle_cheer(&cmd.user.user_id, &cmd.user.user_name, &cmd.emoji, now)?;
        self.loop_repo.save(&habit_loop).await?;

        let added = outcome == CheerToggle::Added;
        info!(
            "[cheer] loop_id={} user_id={} emoji={} added={}",
            loop_id, cmd.user.user_id, cmd.emoji, added
        );

        let event = CheerToggled {
            loop_id: loop_id.clone(),
            user_id: cmd.user.user_id.clone(),
            emoji: cmd.emoji,
            added,
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(ToggleCheerResult {
            loop_id: loop_id.to_string(),
            added,
            cheers: habit_loop.cheers().iter().map(CheerDto::from).collect(),
        })
    }
}
