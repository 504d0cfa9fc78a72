use async_trait::async_trait;
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::shared::{parse_day_entries, parse_optional_date};
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::CreateLoopCommand;
use crate::application::dtos::LoopDto;
use looplist_domain::events::loop_events::LoopCreated;
use looplist_domain::events::EventBus;
use looplist_domain::habit_loop::{
    BackfillPolicy, DayMap, DayStatus, HabitLoop, HistoryBackfill, LoopDraft, LoopRepository,
};
use looplist_domain::shared::{Clock, DomainError};
use looplist_infrastructure::config::simulate_latency;

/// Backfill policy shared by everything that seeds day records
pub type SharedBackfill = Arc<Mutex<Box<dyn BackfillPolicy + Send>>>;

/// Create loop command handler
pub struct CreateLoopCommandHandler {
    loop_repo: Arc<dyn LoopRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    backfill: SharedBackfill,
    latency: Duration,
}

impl CreateLoopCommandHandler {
    pub fn new(
        loop_repo: Arc<dyn LoopRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        backfill: SharedBackfill,
        latency: Duration,
    ) -> Self {
        Self {
            loop_repo,
            event_bus,
            clock,
            backfill,
            latency,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateLoopCommand> for CreateLoopCommandHandler {
    type Result = LoopDto;

    async fn handle(&self, cmd: CreateLoopCommand) -> Result<Self::Result, DomainError> {
        simulate_latency(self.latency).await;
        info!(
            "Handling CreateLoopCommand user_id={} title={}",
            cmd.user.user_id, cmd.title
        );

        let today = self.clock.today();
        let now = self.clock.now();

        let draft = LoopDraft {
            user_id: cmd.user.user_id.clone(),
            title: cmd.title,
            emoji: cmd.emoji,
            cover_image: cmd.cover_image,
            frequency: cmd.frequency.parse()?,
            start_date: parse_optional_date(cmd.start_date.as_deref())?.unwrap_or(today),
            end_date: parse_optional_date(cmd.end_date.as_deref())?,
            visibility: cmd.visibility.parse()?,
        };

        let habit_loop = match cmd.history {
            Some(raw) => {
                let mut history = HistoryBackfill::new(parse_history(&raw)?);
                HabitLoop::new(draft, today, now, &mut history)?
            }
            None => {
                let mut backfill = self.backfill.lock().await;
                HabitLoop::new(draft, today, now, &mut **backfill)?
            }
        };

        self.loop_repo.save(&habit_loop).await?;

        info!(
            "Loop created: {} ({}) days={} streak={} status={}",
            habit_loop.title(),
            habit_loop.id(),
            habit_loop.days().len(),
            habit_loop.current_streak(),
            habit_loop.status()
        );

        let event = LoopCreated {
            loop_id: habit_loop.id().clone(),
            user_id: habit_loop.user_id().clone(),
            title: habit_loop.title().to_string(),
            frequency: habit_loop.frequency(),
            start_date: habit_loop.start_date(),
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(LoopDto::from(&habit_loop))
    }
}

/// Imported history may only say whether a past day was done.
fn parse_history(raw: &BTreeMap<String, String>) -> Result<DayMap, DomainError> {
    let history = parse_day_entries(raw)?;
    if let Some((date, status)) = history
        .iter()
        .find(|(_, status)| !matches!(status, DayStatus::Checked | DayStatus::Missed))
    {
        return Err(DomainError::Validation(format!(
            "History for {date} must be checked or missed, got {status}"
        )));
    }
    Ok(history)
}
