//! Application layer for Herald.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (AppRegistry, Dispatcher)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Descriptors & Context**: the immutable command records built by apps
//!   and the per-invocation bundle handed to handlers
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! validation logic itself. All validation rules live in `crate::domain`.

pub mod context;
pub mod descriptor;
pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{AppRegistry, CommandTable, Dispatcher};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandSource, InteractiveRuntime, Presenter, SourceError, Spinner};

pub use context::{CommandInfo, Context};
pub use descriptor::{CommandBuilder, CommandDescriptor, Handler, HandlerResult};
pub use error::ApplicationError;
