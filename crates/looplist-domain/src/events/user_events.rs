use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_event;
use crate::shared::UserId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub user_id: UserId,
    pub email: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event fired on every successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedIn {
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(UserRegistered, UserLoggedIn);
