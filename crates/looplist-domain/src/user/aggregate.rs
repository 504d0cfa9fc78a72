use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};

/// Avatar service used when a user registers without one.
pub const DEFAULT_AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// A registered user.
///
/// Only the password digest is kept; hashing is the caller's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    avatar: Option<String>,
    password_digest: String,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        password_digest: String,
        avatar: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::with_id(UserId::new(), name, email, password_digest, avatar)
    }

    /// Build a user with a known id, e.g. a seeded demo account.
    pub fn with_id(
        id: UserId,
        name: String,
        email: String,
        password_digest: String,
        avatar: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = validate_name(&name)?;
        let email = email.trim().to_string();
        if !email.contains('@') {
            return Err(DomainError::Validation(format!(
                "Invalid email address: {email}"
            )));
        }
        let avatar = avatar
            .filter(|a| !a.trim().is_empty())
            .or_else(|| Some(format!("{DEFAULT_AVATAR_BASE}{name}")));

        Ok(Self {
            id,
            name,
            email,
            avatar,
            password_digest,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn password_digest(&self) -> &str {
        &self.password_digest
    }

    /// Emails compare case-insensitively.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    pub fn update_profile(
        &mut self,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Result<(), DomainError> {
        if let Some(name) = name {
            self.name = validate_name(&name)?;
        }
        if let Some(avatar) = avatar {
            let avatar = avatar.trim().to_string();
            self.avatar = if avatar.is_empty() { None } else { Some(avatar) };
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("Name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}
