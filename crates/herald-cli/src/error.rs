//! Comprehensive error handling for the Herald CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping
//!
//! Only *startup* failures travel through [`CliError`]: settings loading,
//! logging setup, and the app-load phase. Per-invocation failures are
//! reported by the dispatcher itself and surface only as an exit code.

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use herald_core::application::ApplicationError;
use herald_core::error::HeraldError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can abort the CLI before any dispatch happens.
#[derive(Debug, Error)]
pub enum CliError {
    /// The settings file could not be found, read, or parsed.
    #[error("Settings error: {message}")]
    Settings {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `herald-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error without touching core internals.
    #[error("{0}")]
    Core(#[from] HeraldError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ApplicationError> for CliError {
    fn from(err: ApplicationError) -> Self {
        CliError::Core(HeraldError::Application(err))
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Settings { message, .. } => vec![
                format!("Settings issue: {}", message),
                "Check your herald.toml (or the path passed via --config)".into(),
                "Run 'herald startproject <name>' to generate a working settings file".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Failure               | Code |
    /// |-----------------------|------|
    /// | App load              |  3   |
    /// | Settings              |  4   |
    /// | Everything else       |  1   |
    ///
    /// Invocation-level codes (unknown command → 2, validation → 1) come
    /// from the dispatcher, not from here.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Settings { .. } => 4,
            Self::Core(HeraldError::Application(app)) => {
                u8::try_from(app.exit_code()).unwrap_or(1)
            }
            Self::Core(_) => 3,
            Self::IoError { .. } => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] — no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self {
            Self::Settings { .. } => tracing::error!("Settings error: {}", self),
            Self::Core(_) => tracing::error!("Startup error: {}", self),
            Self::IoError { .. } => tracing::error!("I/O error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn app_load() -> CliError {
        ApplicationError::AppLoad {
            identifier: "ghost".into(),
            cause: "unknown app".into(),
        }
        .into()
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_settings() {
        let err = CliError::Settings {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn exit_code_app_load() {
        assert_eq!(app_load().exit_code(), 3);
    }

    #[test]
    fn exit_code_io() {
        let err = CliError::IoError {
            message: "e".into(),
            source: io::Error::other("e"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn settings_suggestions_mention_startproject() {
        let err = CliError::Settings {
            message: "bad toml".into(),
            source: None,
        };
        assert!(err.suggestions().iter().any(|s| s.contains("startproject")));
    }

    #[test]
    fn core_suggestions_pass_through() {
        assert!(app_load()
            .suggestions()
            .iter()
            .any(|s| s.contains("herald.toml")));
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let s = app_load().format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let s = app_load().format_plain(true);
        assert!(!s.contains("--verbose"));
    }
}
