//! Error types for member resolution, mutation and configuration

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while resolving or binding bean members
#[derive(Debug, Error)]
pub enum BindError {
    /// A member was explicitly requested but no accessor exists at any level
    #[error("No accessor could be resolved for member '{0}'")]
    MemberNotFound(String),

    /// The bean type has no instance factory, or the factory declined
    #[error("Unable to create an instance of '{0}'")]
    InstanceUnavailable(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for resolution and binding operations
pub type BindResult<T> = Result<T, BindError>;

/// Failure reported by a member's setter
///
/// The message is what the user sees next to the field, so setters should
/// phrase it for people rather than for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SetError {
    message: String,
}

impl SetError {
    /// Create a new setter error with a user-facing message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Setter received a value of the wrong type
    #[must_use]
    pub fn type_mismatch(expected: &str, actual: &str) -> Self {
        Self::new(format!("expected {expected}, got {actual}"))
    }

    /// The message carried by this error
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_error_display() {
        let err = SetError::new("Age must be positive");
        assert_eq!(err.to_string(), "Age must be positive");
        assert_eq!(err.message(), "Age must be positive");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = SetError::type_mismatch("Int", "String");
        assert_eq!(err.message(), "expected Int, got String");
    }

    #[test]
    fn test_bind_error_display() {
        let err = BindError::MemberNotFound("salary".to_string());
        assert_eq!(
            err.to_string(),
            "No accessor could be resolved for member 'salary'"
        );
    }
}
