//! The per-invocation execution context.
//!
//! A [`Context`] is created fresh by the dispatcher for exactly one handler
//! call: the validated, typed arguments, a handle to the Presentation
//! Engine, and metadata about the resolved command. The handler owns it for
//! the duration of the call; it is discarded afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::ports::Presenter;
use crate::domain::validators::ArgValue;

/// Metadata about the command an invocation resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub help: String,
}

/// Everything a handler gets: validated arguments, the UI handle, and the
/// resolved command's metadata. Never raw strings.
pub struct Context {
    pub command: CommandInfo,
    pub arguments: BTreeMap<String, ArgValue>,
    pub ui: Arc<dyn Presenter>,
}

impl Context {
    pub fn new(
        command: CommandInfo,
        arguments: BTreeMap<String, ArgValue>,
        ui: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            command,
            arguments,
            ui,
        }
    }

    /// Raw typed value of an argument, if supplied.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.arguments.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ArgValue::as_int)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ArgValue::as_float)
    }

    pub fn path(&self, name: &str) -> Option<&std::path::Path> {
        self.get(name).and_then(ArgValue::as_path)
    }

    pub fn uuid(&self, name: &str) -> Option<uuid::Uuid> {
        self.get(name).and_then(ArgValue::as_uuid)
    }

    pub fn json(&self, name: &str) -> Option<&serde_json::Value> {
        self.get(name).and_then(ArgValue::as_json)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("command", &self.command.name)
            .field("arguments", &self.arguments)
            .finish()
    }
}
