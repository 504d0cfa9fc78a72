use async_trait::async_trait;
use log::info;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use looplist_domain::events::event_bus::EventHandler;
use looplist_domain::events::loop_events::*;
use looplist_domain::habit_loop::DayStatus;
use looplist_domain::shared::DomainError;

const MAX_NOTICES: usize = 50;

/// Turns loop events into short user-facing notices
///
/// The UI drains them and shows each one as a toast.
#[derive(Clone, Default)]
pub struct FeedbackEventHandler {
    notices: Arc<RwLock<VecDeque<String>>>,
}

impl FeedbackEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notice, oldest first
    pub async fn drain(&self) -> Vec<String> {
        self.notices.write().await.drain(..).collect()
    }

    pub async fn pending(&self) -> usize {
        self.notices.read().await.len()
    }

    async fn push(&self, notice: String) {
        info!("[feedback] {}", notice);
        let mut notices = self.notices.write().await;
        if notices.len() == MAX_NOTICES {
            notices.pop_front();
        }
        notices.push_back(notice);
    }
}

#[async_trait]
impl EventHandler<LoopCreated> for FeedbackEventHandler {
    async fn handle(&self, _event: &LoopCreated) -> Result<(), DomainError> {
        self.push("Loop created successfully".to_string()).await;
        Ok(())
    }
}

#[async_trait]
impl EventHandler<LoopDeleted> for FeedbackEventHandler {
    async fn handle(&self, _event: &LoopDeleted) -> Result<(), DomainError> {
        self.push("Loop deleted successfully".to_string()).await;
        Ok(())
    }
}

#[async_trait]
impl EventHandler<DayStatusUpdated> for FeedbackEventHandler {
    async fn handle(&self, event: &DayStatusUpdated) -> Result<(), DomainError> {
        if event.status == DayStatus::Checked {
            self.push(format!(
                "Great job! You checked in for {}. Streak: {}",
                event.date, event.current_streak
            ))
            .await;
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<CheerToggled> for FeedbackEventHandler {
    async fn handle(&self, event: &CheerToggled) -> Result<(), DomainError> {
        let notice = if event.added {
            "Cheer added!"
        } else {
            "Cheer removed!"
        };
        self.push(notice.to_string()).await;
        Ok(())
    }
}

#[async_trait]
impl EventHandler<LoopCloned> for FeedbackEventHandler {
    async fn handle(&self, event: &LoopCloned) -> Result<(), DomainError> {
        self.push(format!("Cloned \"{}\" to your loops", event.title))
            .await;
        Ok(())
    }
}
