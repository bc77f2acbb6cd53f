//! Built-in apps shipped with the `herald` binary.
//!
//! Built-ins register through the same command-source mechanism as user
//! apps, so an operator can override any of their commands by listing a
//! later app that declares the same name. Downstream binaries extend the
//! source returned here with their own providers.

pub mod scaffold;

use herald_adapters::StaticCommandSource;

/// Command source with every compiled-in app registered.
pub fn builtin_source() -> StaticCommandSource {
    StaticCommandSource::new().register("scaffold", scaffold::provider)
}
