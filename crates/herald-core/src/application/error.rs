//! Application layer errors.
//!
//! These errors represent failures in loading and dispatching, not broken
//! command declarations. Declaration errors are `DomainError` from
//! `crate::domain`.
//!
//! The taxonomy follows one rule: app-load failures are fatal at startup,
//! everything else is terminal for the current invocation only.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading apps or dispatching an invocation.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// An app named in settings could not be located or its command
    /// declarations could not be evaluated. Fatal: the process cannot
    /// proceed without its command table.
    #[error("failed to load app '{identifier}': {cause}")]
    AppLoad { identifier: String, cause: String },

    /// The invocation named a command nobody registered.
    #[error("unknown command '{name}'")]
    CommandNotFound { name: String },

    /// Fewer raw arguments than required arguments.
    #[error("missing required argument '{argument}'")]
    MissingArgument { argument: String },

    /// More raw arguments than the command declares.
    #[error("too many arguments: expected at most {expected}, got {given}")]
    UnexpectedArgument { expected: usize, given: usize },

    /// A validator rejected a supplied value. Reported before the handler
    /// runs; the handler never observes raw strings.
    #[error("invalid value for '{argument}': {reason}")]
    ArgumentValidation { argument: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AppLoad { identifier, cause } => vec![
                format!("The app '{}' could not be loaded: {}", identifier, cause),
                "Check the app list in your herald.toml".into(),
                "Remove or fix the entry, then run again".into(),
            ],
            Self::CommandNotFound { name } => vec![
                format!("No installed app registers a command named '{}'", name),
                "Run with no arguments to list available commands".into(),
            ],
            Self::MissingArgument { argument } => vec![
                format!("Supply a value for '{}'", argument),
                "Arguments are positional, in declaration order".into(),
            ],
            Self::UnexpectedArgument { expected, .. } => vec![
                format!("This command takes at most {} argument(s)", expected),
                "Remove the extra values".into(),
            ],
            Self::ArgumentValidation { argument, reason } => vec![
                format!("'{}' was rejected: {}", argument, reason),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AppLoad { .. } => ErrorCategory::Configuration,
            Self::CommandNotFound { .. } => ErrorCategory::NotFound,
            Self::MissingArgument { .. }
            | Self::UnexpectedArgument { .. }
            | Self::ArgumentValidation { .. } => ErrorCategory::Validation,
        }
    }

    /// Process exit code for this error.
    ///
    /// | Variant             | Code |
    /// |---------------------|------|
    /// | CommandNotFound     |  2   |
    /// | Missing/Unexpected  |  1   |
    /// | ArgumentValidation  |  1   |
    /// | AppLoad             |  3   |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandNotFound { .. } => 2,
            Self::AppLoad { .. } => 3,
            Self::MissingArgument { .. }
            | Self::UnexpectedArgument { .. }
            | Self::ArgumentValidation { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_the_cli_contract() {
        assert_eq!(
            ApplicationError::CommandNotFound { name: "x".into() }.exit_code(),
            2
        );
        assert_eq!(
            ApplicationError::MissingArgument {
                argument: "email".into()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            ApplicationError::UnexpectedArgument {
                expected: 1,
                given: 3
            }
            .exit_code(),
            1
        );
        assert_eq!(
            ApplicationError::ArgumentValidation {
                argument: "email".into(),
                reason: "invalid email format".into()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            ApplicationError::AppLoad {
                identifier: "ghost".into(),
                cause: "unknown app".into()
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn suggestions_are_never_empty() {
        let errors = [
            ApplicationError::CommandNotFound { name: "x".into() },
            ApplicationError::MissingArgument {
                argument: "a".into(),
            },
            ApplicationError::ArgumentValidation {
                argument: "a".into(),
                reason: "r".into(),
            },
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty());
        }
    }
}
