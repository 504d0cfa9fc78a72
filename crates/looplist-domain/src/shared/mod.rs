use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod clock;
pub use clock::{Clock, FixedClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(LoopId);
define_id!(UserId);
define_id!(CheerId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1xxx)
    InvalidCredentials = 1001,
    Unauthenticated = 1002,

    // Resource Not Found (2xxx)
    LoopNotFound = 2001,
    UserNotFound = 2002,

    // Business Logic (3xxx)
    InvalidSchedule = 3001,
    InvalidFrequency = 3002,
    LoopNotPublic = 3003,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::InvalidCredentials | ErrorCode::Unauthenticated => ErrorSeverity::Warning,

            ErrorCode::LoopNotFound
            | ErrorCode::UserNotFound
            | ErrorCode::LoopNotPublic
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::InvalidSchedule | ErrorCode::InvalidFrequency => ErrorSeverity::Warning,

            ErrorCode::RepositoryError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Storage hiccups can be retried; rule violations cannot.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::RepositoryError | ErrorCode::InfrastructureError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Loop not found: {0}")]
    LoopNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Loop is not public: {0}")]
    LoopNotPublic(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            DomainError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            DomainError::LoopNotFound(_) => ErrorCode::LoopNotFound,
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::InvalidSchedule(_) => ErrorCode::InvalidSchedule,
            DomainError::InvalidFrequency(_) => ErrorCode::InvalidFrequency,
            DomainError::LoopNotPublic(_) => ErrorCode::LoopNotPublic,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidCredentials(msg)
            | DomainError::Unauthenticated(msg)
            | DomainError::LoopNotFound(msg)
            | DomainError::UserNotFound(msg)
            | DomainError::InvalidSchedule(msg)
            | DomainError::InvalidFrequency(msg)
            | DomainError::LoopNotPublic(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Serialization(msg)
            | DomainError::Deserialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
