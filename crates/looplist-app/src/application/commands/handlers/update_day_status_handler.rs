use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use super::shared::{load_owned_loop, parse_optional_date};
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::UpdateDayStatusCommand;
use crate::application::dtos::LoopDto;
use looplist_domain::events::loop_events::DayStatusUpdated;
use looplist_domain::events::EventBus;
use looplist_domain::habit_loop::{DayStatus, LoopRepository};
use looplist_domain::shared::{Clock, DomainError};
use looplist_infrastructure::config::simulate_latency;

/// Check-in handler: writes one day and recomputes the loop
pub struct UpdateDayStatusCommandHandler {
    loop_repo: Arc<dyn LoopRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl UpdateDayStatusCommandHandler {
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
impl CommandHandler<UpdateDayStatusCommand> for UpdateDayStatusCommandHandler {
    type Result = LoopDto;

    async fn handle(&self, cmd: UpdateDayStatusCommand) -> Result<Self::Result, DomainError> {
        simulate_latency(self.latency).await;

        let today = self.clock.today();
        let now = self.clock.now();
        let date = parse_optional_date(cmd.date.as_deref())?.unwrap_or(today);
        let status: DayStatus = cmd.status.parse()?;

        let mut habit_loop =
            load_owned_loop(self.loop_repo.as_ref(), &cmd.user, &cmd.loop_id).await?;
        let previous = habit_loop.apply_day_status(date, status, today, now)?;
        self.loop_repo.save(&habit_loop).await?;

        info!(
            "[check-in] loop_id={} date={} status={} streak={} longest={} rate={:.1} loop_status={}",
            habit_loop.id(),
            date,
            status,
            habit_loop.current_streak(),
            habit_loop.longest_streak(),
            habit_loop.completion_rate(),
            habit_loop.status()
        );

        let event = DayStatusUpdated {
            loop_id: habit_loop.id().clone(),
            user_id: habit_loop.user_id().clone(),
            date,
            previous,
            status,
            loop_status: habit_loop.status(),
            current_streak: habit_loop.current_streak(),
            longest_streak: habit_loop.longest_streak(),
            completion_rate: habit_loop.completion_rate(),
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(LoopDto::from(&habit_loop))
    }
}
