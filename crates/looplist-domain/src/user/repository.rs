use async_trait::async_trait;

use super::aggregate::User;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
}
