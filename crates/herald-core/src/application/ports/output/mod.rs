//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `herald-adapters` crate provides the in-process command source and
//! the test fakes; `herald-cli` provides the console presenter.

use std::io;

use thiserror::Error;

use crate::application::descriptor::CommandDescriptor;
use crate::domain::AppId;

// ── Command discovery ─────────────────────────────────────────────────────────

/// Why a command source could not produce an app's descriptors.
///
/// `UnknownApp` and `Declaration` are distinct so the registry can report
/// "no such app" differently from "the app's declarations are broken".
#[derive(Debug, Error, Clone)]
pub enum SourceError {
    #[error("unknown app '{0}'")]
    UnknownApp(AppId),

    #[error("broken command declarations: {reason}")]
    Declaration { reason: String },
}

/// Port for app discovery.
///
/// Given an identifier from settings, return every command descriptor that
/// app declares, or a load failure. Evaluating an app must have no side
/// effect beyond producing descriptors.
///
/// Implemented by:
/// - `herald_adapters::StaticCommandSource` (compiled-in apps; also the
///   test fake - construct one from closures)
pub trait CommandSource: Send + Sync {
    /// All descriptors the app declares, in declaration order.
    fn descriptors(&self, app: &AppId) -> Result<Vec<CommandDescriptor>, SourceError>;

    /// The identifiers this source can resolve, for diagnostics.
    fn known_apps(&self) -> Vec<AppId>;
}

// ── Presentation Engine ───────────────────────────────────────────────────────

/// A live animated indicator.
///
/// The spinner is a scoped resource: dropping the box stops the animation
/// and restores the line, on every exit path of the enclosing operation -
/// early return and unwinding included.
pub trait Spinner: Send {
    /// Replace the message shown next to the animation.
    fn set_message(&mut self, message: &str);
}

/// Port for the Presentation Engine.
///
/// Handlers receive this handle through the [`Context`](crate::application::Context)
/// and use it for all terminal output; the core itself uses it to report
/// dispatch errors. Rendering details (colors, themes, animation) belong to
/// the implementation.
///
/// Implemented by:
/// - the console presenter in `herald-cli` (production)
/// - `herald_adapters::RecordingPresenter` (testing)
pub trait Presenter: Send + Sync {
    /// Plain text line.
    fn write(&self, text: &str) -> io::Result<()>;

    /// Success indicator line.
    fn success(&self, msg: &str) -> io::Result<()>;

    /// Error indicator line. Never suppressed.
    fn error(&self, msg: &str) -> io::Result<()>;

    /// Warning indicator line.
    fn warning(&self, msg: &str) -> io::Result<()>;

    /// Informational indicator line.
    fn info(&self, msg: &str) -> io::Result<()>;

    /// Large styled header with an optional subtitle.
    fn header(&self, title: &str, subtitle: Option<&str>) -> io::Result<()>;

    /// Formatted table.
    fn table(&self, columns: &[&str], rows: &[Vec<String>], title: Option<&str>) -> io::Result<()>;

    /// Prompt for a line of input.
    fn ask(&self, question: &str, default: Option<&str>) -> io::Result<String>;

    /// Prompt for a yes/no answer.
    fn confirm(&self, question: &str, default: bool) -> io::Result<bool>;

    /// Start an animated indicator; it stops when the returned value drops.
    fn spinner(&self, message: &str) -> Box<dyn Spinner>;
}

// ── Interactive View Runtime ──────────────────────────────────────────────────

/// Port for the Interactive View Runtime.
///
/// A handler that wants a full-screen dashboard hands control to an
/// implementation of this trait. The call blocks, owns the terminal's event
/// loop for its whole duration, and returns the dashboard's final exit
/// signal when the user leaves it.
///
/// Implemented by:
/// - `herald_adapters::HeadlessRuntime` (testing)
pub trait InteractiveRuntime: Send + Sync {
    /// Run the dashboard to completion and return its exit code.
    fn run(&self) -> io::Result<i32>;
}
