use async_trait::async_trait;
use std::sync::Arc;

use looplist_domain::shared::{DomainError, UserId};
use looplist_domain::user::{User, UserRepository};

use crate::persistence::session_storage::{SessionStorage, USERS_KEY};
use crate::persistence::StorageRepositoryBase;

pub struct InMemoryUserRepository {
    base: StorageRepositoryBase,
}

impl InMemoryUserRepository {
    pub fn new(storage: Arc<SessionStorage>) -> Self {
        Self {
            base: StorageRepositoryBase::new(storage, USERS_KEY),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let user = user.clone();
        self.base
            .mutate("Save user", move |users: &mut Vec<User>| {
                match users.iter_mut().find(|u| u.id() == user.id()) {
                    Some(existing) => *existing = user,
                    None => users.push(user),
                }
            })
            .await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users: Vec<User> = self.base.load_all("Find user by ID").await?;
        Ok(users.into_iter().find(|u| u.id() == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users: Vec<User> = self.base.load_all("Find user by email").await?;
        Ok(users.into_iter().find(|u| u.has_email(email)))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        self.base.load_all("Find all users").await
    }
}
