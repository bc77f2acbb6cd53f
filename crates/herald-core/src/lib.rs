//! Herald Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Herald
//! declarative command framework, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           herald-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │       (AppRegistry, Dispatcher)         │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: CommandSource, Presenter, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    herald-adapters (Infrastructure)     │
//! │ (StaticCommandSource, RecordingUi, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │     (Validators, ArgSpec, AppId)        │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use herald_core::{
//!     application::{AppRegistry, Dispatcher, descriptor::CommandDescriptor},
//!     domain::{ArgSpec, validators},
//! };
//!
//! // 1. Declare a command
//! let add_user = CommandDescriptor::builder("add_user")
//!     .help("Register a new user")
//!     .arg(ArgSpec::required(
//!         "email",
//!         validators::email(),
//!         "Email address of the user",
//!     ))?
//!     .handler(|ctx| {
//!         ctx.ui.success("user added")?;
//!         Ok(None)
//!     })?;
//!
//! // 2. Load the table from configured apps and dispatch one invocation
//! let registry = AppRegistry::new(source); // impl CommandSource
//! let table = registry.load(&app_ids)?;
//! let code = Dispatcher::new(ui).dispatch(&table, "add_user", &args);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AppRegistry, CommandTable, Dispatcher,
        context::{CommandInfo, Context},
        descriptor::{CommandBuilder, CommandDescriptor, Handler, HandlerResult},
        ports::{CommandSource, InteractiveRuntime, Presenter, SourceError, Spinner},
    };
    pub use crate::domain::{AppId, ArgSpec, ArgValue, Validator, validators};
    pub use crate::error::{HeraldError, HeraldResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
