//! Dispatcher - resolves one invocation and runs its handler.
//!
//! The pipeline is linear and terminal: resolve → bind → validate → invoke.
//! There is no retry; a miss or a rejected value ends the invocation with a
//! report and a non-zero exit code, and the handler body only ever observes
//! fully validated input.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::{
    application::{
        ApplicationError,
        context::{CommandInfo, Context},
        descriptor::CommandDescriptor,
        ports::Presenter,
        services::registry::CommandTable,
    },
    domain::validators::ArgValue,
};

/// Runs one invocation against a finished command table.
pub struct Dispatcher {
    ui: Arc<dyn Presenter>,
}

impl Dispatcher {
    pub fn new(ui: Arc<dyn Presenter>) -> Self {
        Self { ui }
    }

    /// Resolve, validate, and invoke. Returns the process exit code.
    ///
    /// | Outcome                      | Code            |
    /// |------------------------------|-----------------|
    /// | Unknown command              | 2               |
    /// | Binding/validation failure   | 1               |
    /// | Handler returned nothing     | 0               |
    /// | Handler returned code        | that code       |
    /// | Handler signalled failure    | 1 (reported)    |
    #[instrument(skip_all, fields(command = %invocation_name))]
    pub fn dispatch(
        &self,
        table: &CommandTable,
        invocation_name: &str,
        raw_args: &[String],
    ) -> i32 {
        let (descriptor, arguments) =
            match Self::resolve_and_validate(table, invocation_name, raw_args) {
                Ok(bound) => bound,
                Err(err) => {
                    self.report(&err);
                    return err.exit_code();
                }
            };

        debug!(arity = arguments.len(), "arguments validated");

        let ctx = Context::new(
            CommandInfo {
                name: descriptor.name().to_string(),
                help: descriptor.help().to_string(),
            },
            arguments,
            Arc::clone(&self.ui),
        );

        // The single boundary where handler failures are caught. They are
        // reported through the Presentation Engine and become exit code 1 —
        // never an unformatted crash.
        match descriptor.invoke(ctx) {
            Ok(Some(code)) => code,
            Ok(None) => 0,
            Err(failure) => {
                error!(command = invocation_name, error = %failure, "handler failed");
                let _ = self
                    .ui
                    .error(&format!("command '{invocation_name}' failed: {failure}"));
                1
            }
        }
    }

    /// The pure half of the pipeline: look up the descriptor and turn raw
    /// strings into a typed argument map. No UI, no handler - this is what
    /// tests drive to assert on the error taxonomy.
    pub fn resolve_and_validate<'t>(
        table: &'t CommandTable,
        invocation_name: &str,
        raw_args: &[String],
    ) -> Result<(&'t CommandDescriptor, BTreeMap<String, ArgValue>), ApplicationError> {
        let descriptor =
            table
                .get(invocation_name)
                .ok_or_else(|| ApplicationError::CommandNotFound {
                    name: invocation_name.to_string(),
                })?;

        let arguments = Self::bind(descriptor, raw_args)?;
        Ok((descriptor, arguments))
    }

    /// Bind raw values positionally, in declaration order, and validate
    /// each. Fail-fast: the first rejection short-circuits the rest.
    fn bind(
        descriptor: &CommandDescriptor,
        raw_args: &[String],
    ) -> Result<BTreeMap<String, ArgValue>, ApplicationError> {
        let specs = descriptor.arguments();

        // Arity first: binding errors are reported before any validator runs.
        if raw_args.len() > specs.len() {
            return Err(ApplicationError::UnexpectedArgument {
                expected: specs.len(),
                given: raw_args.len(),
            });
        }
        if let Some(unfilled) = specs
            .iter()
            .skip(raw_args.len())
            .find(|spec| spec.is_required())
        {
            return Err(ApplicationError::MissingArgument {
                argument: unfilled.name().to_string(),
            });
        }

        let mut arguments = BTreeMap::new();
        for (position, spec) in specs.iter().enumerate() {
            match raw_args.get(position) {
                Some(raw) => {
                    let value = spec.validator().validate(raw).map_err(|reason| {
                        ApplicationError::ArgumentValidation {
                            argument: spec.name().to_string(),
                            reason,
                        }
                    })?;
                    arguments.insert(spec.name().to_string(), value);
                }
                None => {
                    // Optional and absent: use the default if there is one,
                    // otherwise the argument stays out of the map.
                    if let Some(default) = spec.default() {
                        arguments.insert(spec.name().to_string(), default.clone());
                    }
                }
            }
        }

        Ok(arguments)
    }

    fn report(&self, err: &ApplicationError) {
        let _ = self.ui.error(&err.to_string());
        for suggestion in err.suggestions() {
            let _ = self.ui.write(&format!("  {suggestion}"));
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
