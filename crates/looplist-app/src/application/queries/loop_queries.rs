use futures::future::try_join_all;
use log::{info, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::application::dtos::{
    DashboardStatsDto, HeatmapDayDto, HeatmapDto, LoopDto, LoopOwnerDto, PublicLoopDto,
};
use looplist_domain::habit_loop::{DayStatus, HabitLoop, LoopRepository, LoopStatus};
use looplist_domain::shared::{Clock, DomainError, LoopId, UserId};
use looplist_domain::user::{UserContext, UserRepository};
use looplist_infrastructure::config::{simulate_latency, LatencyConfig};

/// Read side of loops: lists, the public feed, stats and heatmaps
pub struct LoopQueries {
    loop_repo: Arc<dyn LoopRepository>,
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    latency: LatencyConfig,
}

impl LoopQueries {
    pub fn new(
        loop_repo: Arc<dyn LoopRepository>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            loop_repo,
            user_repo,
            clock,
            latency,
        }
    }

    /// Loops owned by the signed-in user, newest first
    pub async fn get_user_loops(&self, user: &UserContext) -> Result<Vec<LoopDto>, DomainError> {
        simulate_latency(self.latency.list).await;

        let mut loops = self.loop_repo.find_by_user(&user.user_id).await?;
        loops.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        info!(
            "[loops] get_user_loops user_id={} count={}",
            user.user_id,
            loops.len()
        );
        Ok(loops.iter().map(LoopDto::from).collect())
    }

    pub async fn get_loop(&self, user: &UserContext, loop_id: &str) -> Result<LoopDto, DomainError> {
        simulate_latency(self.latency.get).await;
        let habit_loop = self.find_owned(user, loop_id).await?;
        Ok(LoopDto::from(&habit_loop))
    }

    /// Every public loop with its owner's summary
    pub async fn get_public_loops(&self) -> Result<Vec<PublicLoopDto>, DomainError> {
        simulate_latency(self.latency.public_feed).await;

        let mut loops = self.loop_repo.find_public().await?;
        loops.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let owners = self.resolve_owners(&loops).await?;
        let feed: Vec<PublicLoopDto> = loops
            .iter()
            .map(|l| {
                let owner = owners.get(l.user_id()).cloned().unwrap_or_else(|| {
                    warn!("[loops] owner {} of public loop {} not found", l.user_id(), l.id());
                    LoopOwnerDto {
                        id: l.user_id().to_string(),
                        name: "Unknown".to_string(),
                        avatar: None,
                    }
                });
                PublicLoopDto::new(l, owner)
            })
            .collect();

        info!("[loops] get_public_loops count={}", feed.len());
        Ok(feed)
    }

    pub async fn get_dashboard_stats(
        &self,
        user: &UserContext,
    ) -> Result<DashboardStatsDto, DomainError> {
        simulate_latency(self.latency.list).await;
        let loops = self.loop_repo.find_by_user(&user.user_id).await?;
        let stats = dashboard_stats(&loops, self.clock.today());

        info!(
            "[stats] user_id={} total={} active={} broken={} completed={}",
            user.user_id, stats.total_loops, stats.active_loops, stats.broken_loops,
            stats.completed_loops
        );
        Ok(stats)
    }

    /// Days from `max_days` ago through today, oldest first, ready for a heatmap
    pub async fn get_heatmap(
        &self,
        user: &UserContext,
        loop_id: &str,
        max_days: u32,
    ) -> Result<HeatmapDto, DomainError> {
        simulate_latency(self.latency.get).await;
        let habit_loop = self.find_owned(user, loop_id).await?;
        let days = habit_loop
            .recent_days(self.clock.today(), max_days)
            .iter()
            .map(HeatmapDayDto::from)
            .collect();

        Ok(HeatmapDto {
            loop_id: habit_loop.id().to_string(),
            days,
        })
    }

    async fn find_owned(&self, user: &UserContext, loop_id: &str) -> Result<HabitLoop, DomainError> {
        self.loop_repo
            .find_by_id(&LoopId::from_string(loop_id))
            .await?
            .filter(|l| l.is_owned_by(&user.user_id))
            .ok_or_else(|| DomainError::LoopNotFound(loop_id.to_string()))
    }

    async fn resolve_owners(
        &self,
        loops: &[HabitLoop],
    ) -> Result<HashMap<UserId, LoopOwnerDto>, DomainError> {
        let owner_ids: BTreeSet<&str> = loops.iter().map(|l| l.user_id().as_str()).collect();

        let lookups = owner_ids.into_iter().map(|id| {
            let user_repo = self.user_repo.clone();
            let id = UserId::from_string(id);
            async move { user_repo.find_by_id(&id).await }
        });

        let owners = try_join_all(lookups).await?;
        Ok(owners
            .into_iter()
            .flatten()
            .map(|user| (user.id().clone(), LoopOwnerDto::from(&user)))
            .collect())
    }
}

fn dashboard_stats(loops: &[HabitLoop], today: chrono::NaiveDate) -> DashboardStatsDto {
    let mut stats = DashboardStatsDto {
        total_loops: loops.len() as u32,
        ..Default::default()
    };

    for l in loops {
        match l.status() {
            LoopStatus::Active => stats.active_loops += 1,
            LoopStatus::Broken => stats.broken_loops += 1,
            LoopStatus::Completed => stats.completed_loops += 1,
        }
        stats.best_current_streak = stats.best_current_streak.max(l.current_streak());
        stats.best_longest_streak = stats.best_longest_streak.max(l.longest_streak());
        match l.days().get(&today) {
            Some(DayStatus::Checked) => stats.checked_today += 1,
            Some(DayStatus::Pending) => stats.pending_today += 1,
            _ => {}
        }
    }

    if !loops.is_empty() {
        stats.average_completion_rate =
            loops.iter().map(HabitLoop::completion_rate).sum::<f64>() / loops.len() as f64;
    }

    stats
}
