use log::{info, warn};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::application::dtos::{LoginInput, RegisterInput, SessionDto, UpdateProfileInput, UserDto};
use looplist_domain::events::user_events::{UserLoggedIn, UserRegistered};
use looplist_domain::events::EventBus;
use looplist_domain::shared::{Clock, DomainError, UserId};
use looplist_domain::user::{User, UserContext, UserRepository};
use looplist_infrastructure::config::{simulate_latency, LatencyConfig};
use looplist_infrastructure::persistence::{ResultExt as _, SessionStorage, TOKEN_KEY, USER_KEY};

const TOKEN_PREFIX: &str = "mock-jwt-token-";

/// Hex SHA-256 of a password. Keeps plain text out of storage, nothing more.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Mock authentication backed by the user store and session storage
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    storage: Arc<SessionStorage>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    latency: LatencyConfig,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        storage: Arc<SessionStorage>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            user_repo,
            storage,
            event_bus,
            clock,
            latency,
        }
    }

    pub async fn register(&self, input: RegisterInput) -> Result<SessionDto, DomainError> {
        simulate_latency(self.latency.auth).await;

        if input.password.is_empty() {
            return Err(DomainError::Validation("Password cannot be empty".to_string()));
        }
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Validation(
                "User with this email already exists".to_string(),
            ));
        }

        let user = User::new(input.name, input.email, hash_password(&input.password), None)?;
        self.user_repo.save(&user).await?;
        info!("[auth] registered user_id={} email={}", user.id(), user.email());

        self.event_bus
            .publish(Box::new(UserRegistered {
                user_id: user.id().clone(),
                email: user.email().to_string(),
                occurred_at: self.clock.now(),
            }))
            .await?;

        self.start_session(&user).await
    }

    pub async fn login(&self, input: LoginInput) -> Result<SessionDto, DomainError> {
        simulate_latency(self.latency.auth).await;

        let digest = hash_password(&input.password);
        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .filter(|u| u.password_digest() == digest)
            .ok_or_else(|| {
                warn!("[auth] failed login for {}", input.email);
                DomainError::InvalidCredentials("Invalid email or password".to_string())
            })?;

        info!("[auth] login user_id={}", user.id());
        self.event_bus
            .publish(Box::new(UserLoggedIn {
                user_id: user.id().clone(),
                occurred_at: self.clock.now(),
            }))
            .await?;

        self.start_session(&user).await
    }

    pub async fn logout(&self) {
        self.storage.remove_item(USER_KEY).await;
        self.storage.remove_item(TOKEN_KEY).await;
        info!("[auth] logout");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.storage.contains(TOKEN_KEY).await
    }

    /// The signed-in user as stored in the session. A corrupt entry reads as
    /// signed out.
    pub async fn current_profile(&self) -> Option<UserDto> {
        let json = self.storage.get_item(USER_KEY).await?;
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("[auth] unreadable session user: {}", e);
                None
            }
        }
    }

    pub async fn current_user(&self) -> Option<UserContext> {
        self.current_profile().await.map(|user| UserContext {
            user_id: UserId::from_string(&user.id),
            user_name: user.name,
            avatar: user.avatar,
        })
    }

    pub async fn require_user(&self) -> Result<UserContext, DomainError> {
        self.current_user()
            .await
            .ok_or_else(|| DomainError::Unauthenticated("No authenticated user".to_string()))
    }

    pub async fn update_profile(
        &self,
        user: &UserContext,
        input: UpdateProfileInput,
    ) -> Result<UserDto, DomainError> {
        simulate_latency(self.latency.profile).await;

        let mut stored = self
            .user_repo
            .find_by_id(&user.user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user.user_id.to_string()))?;
        stored.update_profile(input.name, input.avatar)?;
        self.user_repo.save(&stored).await?;

        let profile = UserDto::from(&stored);
        if self.current_user().await.is_some_and(|c| c.user_id == user.user_id) {
            self.store_profile(&profile).await?;
        }

        info!("[auth] profile updated user_id={}", stored.id());
        Ok(profile)
    }

    async fn start_session(&self, user: &User) -> Result<SessionDto, DomainError> {
        let profile = UserDto::from(user);
        let token = format!("{TOKEN_PREFIX}{}", user.id());

        self.store_profile(&profile).await?;
        self.storage.set_item(TOKEN_KEY, token.clone()).await;

        Ok(SessionDto {
            token,
            user: profile,
        })
    }

    async fn store_profile(&self, profile: &UserDto) -> Result<(), DomainError> {
        let json = serde_json::to_string(profile).to_serialization_err("Store session user")?;
        self.storage.set_item(USER_KEY, json).await;
        Ok(())
    }
}
