// ============================================================================
// domain/error.rs - DECLARATION-TIME ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (descriptors are built in loops)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Every variant here is a *programming error in an app's declarations*,
/// surfaced when a command descriptor is built — never at dispatch time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("command '{command}' declares argument '{argument}' twice")]
    DuplicateArgument { command: String, argument: String },

    #[error("command name cannot be empty")]
    EmptyCommandName,

    #[error("argument name cannot be empty in command '{command}'")]
    EmptyArgumentName { command: String },

    #[error("default for argument '{argument}' rejected by its validator: {reason}")]
    InvalidDefault { argument: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateArgument { command, argument } => vec![
                format!(
                    "The command '{}' declares '{}' more than once",
                    command, argument
                ),
                "Rename one of the arguments or remove the duplicate declaration".into(),
            ],
            Self::EmptyCommandName => vec![
                "Give the command a non-empty name in its builder call".into(),
            ],
            Self::EmptyArgumentName { command } => vec![
                format!("An argument of command '{}' has an empty name", command),
                "Every argument spec needs a non-empty name".into(),
            ],
            Self::InvalidDefault { argument, reason } => vec![
                format!("The default value for '{}' is invalid: {}", argument, reason),
                "Declare a default that its own validator accepts".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        // Declaration mistakes are app-programming errors, not user input.
        ErrorCategory::Declaration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A broken command declaration inside an app.
    Declaration,
    /// Anything else (reserved for future variants).
    Internal,
}
