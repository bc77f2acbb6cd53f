//! Command descriptors and their builder.
//!
//! A [`CommandDescriptor`] is the immutable record an app produces for each
//! command: name, help text, ordered argument specs, and the handler. The
//! stacked-decorator registration of dynamic frameworks becomes an explicit
//! builder here: [`CommandBuilder::arg`] accumulates specs in declaration
//! order (which is also the positional binding order on the command line)
//! and a duplicate argument name fails fast at declaration time, not at
//! dispatch time. Building never invokes the handler.

use std::fmt;
use std::sync::Arc;

use crate::application::context::Context;
use crate::domain::error::DomainError;
use crate::domain::spec::ArgSpec;

/// What a handler may signal: an explicit exit code, "nothing" (exit 0), or
/// a failure the dispatcher converts to a formatted report and exit 1.
pub type HandlerResult = Result<Option<i32>, Box<dyn std::error::Error + Send + Sync>>;

/// The callable invoked with the per-call [`Context`].
pub type Handler = Arc<dyn Fn(Context) -> HandlerResult + Send + Sync>;

/// Immutable description of one registered command.
#[derive(Clone)]
pub struct CommandDescriptor {
    name: String,
    help: String,
    arguments: Vec<ArgSpec>,
    handler: Handler,
}

impl CommandDescriptor {
    /// Start declaring a command.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            help: String::new(),
            arguments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Argument specs in declaration order = positional binding order.
    pub fn arguments(&self) -> &[ArgSpec] {
        &self.arguments
    }

    /// Number of arguments that must be supplied.
    pub fn required_count(&self) -> usize {
        self.arguments.iter().filter(|a| a.is_required()).count()
    }

    /// One-line usage string: `add_user <email:email> [age:range]`.
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        for arg in &self.arguments {
            usage.push(' ');
            usage.push_str(&arg.usage());
        }
        usage
    }

    /// Invoke the handler with a prepared context.
    ///
    /// Only the dispatcher calls this; it is public so tests can drive a
    /// descriptor without a full table.
    pub fn invoke(&self, ctx: Context) -> HandlerResult {
        (self.handler)(ctx)
    }

    /// Structural identity: same name, help, and argument shape.
    ///
    /// Handlers are opaque, so two descriptors with identical declarations
    /// but different bodies compare equal. Used by the idempotence checks.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.name == other.name
            && self.help == other.help
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(other.arguments.iter())
                .all(|(a, b)| {
                    a.name() == b.name()
                        && a.is_required() == b.is_required()
                        && a.validator().type_name() == b.validator().type_name()
                })
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Accumulates argument specs and produces one immutable descriptor.
///
/// The terminal step is [`handler`](Self::handler); until then no handler
/// exists and nothing is registered anywhere — insertion into a registry is
/// the caller's explicit move.
#[derive(Debug)]
pub struct CommandBuilder {
    name: String,
    help: String,
    arguments: Vec<ArgSpec>,
}

impl CommandBuilder {
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Declare the next positional argument.
    ///
    /// Rejects immediately on a duplicate name within this command.
    pub fn arg(mut self, spec: ArgSpec) -> Result<Self, DomainError> {
        if spec.name().is_empty() {
            return Err(DomainError::EmptyArgumentName {
                command: self.name.clone(),
            });
        }
        if self.arguments.iter().any(|a| a.name() == spec.name()) {
            return Err(DomainError::DuplicateArgument {
                command: self.name.clone(),
                argument: spec.name().to_string(),
            });
        }
        self.arguments.push(spec);
        Ok(self)
    }

    /// Attach the handler and finish the descriptor.
    pub fn handler<F>(self, f: F) -> Result<CommandDescriptor, DomainError>
    where
        F: Fn(Context) -> HandlerResult + Send + Sync + 'static,
    {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyCommandName);
        }
        // Defaults must pass their own validator, checked once here rather
        // than on every dispatch.
        for spec in &self.arguments {
            if let Some(default) = spec.default() {
                if let ArgSpecDefaultCheck::Rejected(reason) = check_default(spec, default) {
                    return Err(DomainError::InvalidDefault {
                        argument: spec.name().to_string(),
                        reason,
                    });
                }
            }
        }
        Ok(CommandDescriptor {
            name: self.name,
            help: self.help,
            arguments: self.arguments,
            handler: Arc::new(f),
        })
    }
}

enum ArgSpecDefaultCheck {
    Accepted,
    Rejected(String),
}

/// A default given as a string is re-validated; any other typed default is
/// trusted as already typed by the declaring app.
fn check_default(
    spec: &ArgSpec,
    default: &crate::domain::validators::ArgValue,
) -> ArgSpecDefaultCheck {
    use crate::domain::validators::ArgValue;
    match default {
        ArgValue::Str(s) => match spec.validator().validate(s) {
            Ok(_) => ArgSpecDefaultCheck::Accepted,
            Err(reason) => ArgSpecDefaultCheck::Rejected(reason),
        },
        _ => ArgSpecDefaultCheck::Accepted,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
