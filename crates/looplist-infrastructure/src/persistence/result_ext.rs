use looplist_domain::shared::DomainError;

/// Map storage and codec failures onto `DomainError`
pub trait ResultExt<T> {
    /// Wrap any error as `DomainError::Repository` with a context prefix
    fn to_repo_err(self, context: &str) -> Result<T, DomainError>;

    fn to_serialization_err(self, context: &str) -> Result<T, DomainError>;

    fn to_deserialization_err(self, context: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn to_repo_err(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(format!("{context}: {e}")))
    }

    fn to_serialization_err(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Serialization(format!("{context}: {e}")))
    }

    fn to_deserialization_err(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Deserialization(format!("{context}: {e}")))
    }
}
