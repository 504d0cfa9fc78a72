use async_trait::async_trait;

use super::aggregate::HabitLoop;
use crate::shared::{DomainError, LoopId, UserId};

#[async_trait]
pub trait LoopRepository: Send + Sync {
    /// Insert or replace a loop.
    async fn save(&self, habit_loop: &HabitLoop) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &LoopId) -> Result<Option<HabitLoop>, DomainError>;

    /// Loops owned by one user.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<HabitLoop>, DomainError>;

    /// Loops of every user whose visibility is public.
    async fn find_public(&self) -> Result<Vec<HabitLoop>, DomainError>;

    async fn delete(&self, id: &LoopId) -> Result<(), DomainError>;
}
