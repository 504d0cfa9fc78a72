use serde::{Deserialize, Serialize};

use super::aggregate::User;
use crate::shared::UserId;

/// The signed-in user a command or query runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub user_id: UserId,
    pub user_name: String,
    pub avatar: Option<String>,
}

impl UserContext {
    pub fn new(user_id: UserId, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            avatar: None,
        }
    }
}

impl From<&User> for UserContext {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().clone(),
            user_name: user.name().to_string(),
            avatar: user.avatar().map(str::to_string),
        }
    }
}
