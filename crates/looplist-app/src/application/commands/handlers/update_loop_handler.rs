use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use super::shared::{load_owned_loop, parse_day_entries, parse_optional_date};
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::UpdateLoopCommand;
use crate::application::dtos::LoopDto;
use looplist_domain::events::loop_events::LoopUpdated;
use looplist_domain::events::EventBus;
use looplist_domain::habit_loop::{LoopDetailsUpdate, LoopRepository, Visibility};
use looplist_domain::shared::{Clock, DomainError};
use looplist_infrastructure::config::simulate_latency;

/// Update loop command handler
pub struct UpdateLoopCommandHandler {
    loop_repo: Arc<dyn LoopRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl UpdateLoopCommandHandler {
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
impl CommandHandler<UpdateLoopCommand> for UpdateLoopCommandHandler {
    type Result = LoopDto;

    async fn handle(&self, cmd: UpdateLoopCommand) -> Result<Self::Result, DomainError> {
        simulate_latency(self.latency).await;
        info!("Handling UpdateLoopCommand for loop: {}", cmd.loop_id);

        let mut habit_loop =
            load_owned_loop(self.loop_repo.as_ref(), &cmd.user, &cmd.loop_id).await?;
        let now = self.clock.now();

        let update = LoopDetailsUpdate {
            title: cmd.title,
            emoji: cmd.emoji,
            cover_image: cmd.cover_image,
            visibility: cmd
                .visibility
                .as_deref()
                .map(str::parse::<Visibility>)
                .transpose()?,
            end_date: parse_optional_date(cmd.end_date.as_deref())?,
        };
        habit_loop.update_details(update, now)?;

        let days_merged = match cmd.days {
            Some(raw) => {
                habit_loop.merge_days(parse_day_entries(&raw)?, self.clock.today(), now)?;
                true
            }
            None => false,
        };

        self.loop_repo.save(&habit_loop).await?;

        info!(
            "Loop updated: {} days_merged={} status={}",
            habit_loop.id(),
            days_merged,
            habit_loop.status()
        );

        let event = LoopUpdated {
            loop_id: habit_loop.id().clone(),
            user_id: habit_loop.user_id().clone(),
            days_merged,
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(LoopDto::from(&habit_loop))
    }
}
