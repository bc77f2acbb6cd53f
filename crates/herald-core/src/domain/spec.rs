//! Argument specifications.
//!
//! An [`ArgSpec`] binds a declared parameter name to a validator, an
//! optionality flag and an optional default. Specs are immutable once
//! constructed; name uniqueness within a command is enforced by the
//! command builder, not here.

use std::fmt;
use std::sync::Arc;

use crate::domain::validators::{ArgValue, Validator};

/// One declared positional argument of a command.
#[derive(Clone)]
pub struct ArgSpec {
    name: String,
    validator: Arc<dyn Validator>,
    required: bool,
    default: Option<ArgValue>,
    help: String,
}

impl ArgSpec {
    /// A required argument: must be supplied on every invocation.
    pub fn required(
        name: impl Into<String>,
        validator: Arc<dyn Validator>,
        help: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            validator,
            required: true,
            default: None,
            help: help.into(),
        }
    }

    /// An optional argument with a default used when it is not supplied.
    pub fn optional(
        name: impl Into<String>,
        validator: Arc<dyn Validator>,
        default: ArgValue,
        help: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            validator,
            required: false,
            default: Some(default),
            help: help.into(),
        }
    }

    /// An optional argument with no default: when it is not supplied, it is
    /// simply absent from the context and the validator is never consulted.
    pub fn optional_without_default(
        name: impl Into<String>,
        validator: Arc<dyn Validator>,
        help: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            validator,
            required: false,
            default: None,
            help: help.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&ArgValue> {
        self.default.as_ref()
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// One-line usage fragment for help output: `<email:email>` or
    /// `[age:range]` for optional arguments.
    pub fn usage(&self) -> String {
        if self.required {
            format!("<{}:{}>", self.name, self.validator.type_name())
        } else {
            format!("[{}:{}]", self.name, self.validator.type_name())
        }
    }
}

impl fmt::Debug for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgSpec")
            .field("name", &self.name)
            .field("type", &self.validator.type_name())
            .field("required", &self.required)
            .field("default", &self.default)
            .finish()
    }
}
