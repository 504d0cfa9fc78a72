use async_trait::async_trait;
use std::sync::Arc;

use looplist_domain::habit_loop::{HabitLoop, LoopRepository};
use looplist_domain::shared::{DomainError, LoopId, UserId};

use crate::persistence::session_storage::{SessionStorage, LOOPS_KEY};
use crate::persistence::StorageRepositoryBase;

/// Loops kept as one JSON array in session storage. Last write wins.
pub struct InMemoryLoopRepository {
    base: StorageRepositoryBase,
}

impl InMemoryLoopRepository {
    pub fn new(storage: Arc<SessionStorage>) -> Self {
        Self {
            base: StorageRepositoryBase::new(storage, LOOPS_KEY),
        }
    }

    async fn load(&self, context: &str) -> Result<Vec<HabitLoop>, DomainError> {
        self.base.load_all(context).await
    }
}

#[async_trait]
impl LoopRepository for InMemoryLoopRepository {
    async fn save(&self, habit_loop: &HabitLoop) -> Result<(), DomainError> {
        let habit_loop = habit_loop.clone();
        self.base
            .mutate("Save loop", move |loops: &mut Vec<HabitLoop>| {
                match loops.iter_mut().find(|l| l.id() == habit_loop.id()) {
                    Some(existing) => *existing = habit_loop,
                    None => loops.push(habit_loop),
                }
            })
            .await
    }

    async fn find_by_id(&self, id: &LoopId) -> Result<Option<HabitLoop>, DomainError> {
        let loops = self.load("Find loop by ID").await?;
        Ok(loops.into_iter().find(|l| l.id() == id))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<HabitLoop>, DomainError> {
        let loops = self.load("Find loops by user").await?;
        Ok(loops.into_iter().filter(|l| l.is_owned_by(user_id)).collect())
    }

    async fn find_public(&self) -> Result<Vec<HabitLoop>, DomainError> {
        let loops = self.load("Find public loops").await?;
        Ok(loops.into_iter().filter(HabitLoop::is_public).collect())
    }

    async fn delete(&self, id: &LoopId) -> Result<(), DomainError> {
        let removed = self
            .base
            .mutate("Delete loop", |loops: &mut Vec<HabitLoop>| {
                let before = loops.len();
                loops.retain(|l| l.id() != id);
                before != loops.len()
            })
            .await?;

        if removed {
            Ok(())
        } else {
            Err(DomainError::LoopNotFound(id.to_string()))
        }
    }
}
