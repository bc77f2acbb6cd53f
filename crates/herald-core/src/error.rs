//! Unified error handling for Herald Core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Herald Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// herald-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum HeraldError {
    /// Errors from the domain layer (broken command declarations).
    #[error("Declaration error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (loading and dispatch failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl HeraldError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Herald".into(),
                "Please report this issue to the maintainers".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Declaration => ErrorCategory::Declaration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid user input on an invocation.
    Validation,
    /// The invocation named something that does not exist.
    NotFound,
    /// A broken declaration inside an app (programming error).
    Declaration,
    /// Settings or app-list problems.
    Configuration,
    /// Everything unexpected.
    Internal,
}

/// Convenient result type alias.
pub type HeraldResult<T> = Result<T, HeraldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_errors_keep_their_category() {
        let err: HeraldError = ApplicationError::CommandNotFound { name: "x".into() }.into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn domain_errors_are_declaration_category() {
        let err: HeraldError = DomainError::EmptyCommandName.into();
        assert_eq!(err.category(), ErrorCategory::Declaration);
    }
}
