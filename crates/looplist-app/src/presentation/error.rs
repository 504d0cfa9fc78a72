use looplist_domain::shared::{DomainError, ErrorCode, ErrorSeverity};
use serde::{Deserialize, Serialize};

/// Structured error returned by every frontend-facing command
///
/// Carries the numeric code, a readable message, a severity for the UI and
/// whether retrying can help.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    /// Numeric error code (1xxx-6xxx range)
    pub code: u16,

    pub message: String,

    pub severity: ErrorSeverity,

    /// Whether the operation can be retried
    pub recoverable: bool,
}

impl CommandError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    pub fn unauthenticated() -> Self {
        Self::from_code(ErrorCode::Unauthenticated, "No authenticated user")
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::from_code(ErrorCode::SerializationError, err.to_string())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}
