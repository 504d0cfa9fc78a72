use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{CheerId, DomainError, UserId};

/// Emoji reaction left on a public loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cheer {
    id: CheerId,
    user_id: UserId,
    user_name: String,
    emoji: String,
    timestamp: DateTime<Utc>,
}

impl Cheer {
    pub fn new(
        user_id: UserId,
        user_name: String,
        emoji: String,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if emoji.trim().is_empty() {
            return Err(DomainError::Validation(
                "Cheer emoji cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: CheerId::new(),
            user_id,
            user_name,
            emoji: emoji.trim().to_string(),
            timestamp,
        })
    }

    pub fn id(&self) -> &CheerId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_same_reaction(&self, user_id: &UserId, emoji: &str) -> bool {
        &self.user_id == user_id && self.emoji == emoji.trim()
    }
}
