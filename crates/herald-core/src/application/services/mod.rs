//! Application services - use case orchestration.
//!
//! Two services cover the whole pipeline: [`AppRegistry`] builds the
//! process-wide command table once at startup, [`Dispatcher`] runs exactly
//! one invocation against it.

pub mod dispatcher;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use registry::{AppRegistry, CommandTable};
