//! Compiled-in command source.
//!
//! Rust has no runtime module import, so apps register a *provider
//! function* under their identifier; the registry evaluates providers
//! through the [`CommandSource`] port when it loads the configured app
//! list. A provider that returns a declaration error (e.g. a duplicate
//! argument name) surfaces as [`SourceError::Declaration`] and fails the
//! whole load, matching the "malformed declaration" contract.
//!
//! The same type is the natural test fake: construct one from closures.

use std::collections::HashMap;

use tracing::debug;

use herald_core::application::descriptor::CommandDescriptor;
use herald_core::application::ports::{CommandSource, SourceError};
use herald_core::domain::{AppId, DomainError};

/// What an app exposes: evaluate to descriptors or a declaration error.
pub type AppProvider =
    Box<dyn Fn() -> Result<Vec<CommandDescriptor>, DomainError> + Send + Sync>;

/// In-process command source mapping app identifiers to providers.
#[derive(Default)]
pub struct StaticCommandSource {
    providers: HashMap<AppId, AppProvider>,
}

impl StaticCommandSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an app's provider under its identifier.
    ///
    /// Registering the same identifier twice replaces the provider - the
    /// wiring site decides, not the source.
    pub fn register<F>(mut self, id: impl Into<AppId>, provider: F) -> Self
    where
        F: Fn() -> Result<Vec<CommandDescriptor>, DomainError> + Send + Sync + 'static,
    {
        let id = id.into();
        debug!(app = %id, "app provider registered");
        self.providers.insert(id, Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl CommandSource for StaticCommandSource {
    fn descriptors(&self, app: &AppId) -> Result<Vec<CommandDescriptor>, SourceError> {
        let provider = self
            .providers
            .get(app)
            .ok_or_else(|| SourceError::UnknownApp(app.clone()))?;

        provider().map_err(|e| SourceError::Declaration {
            reason: e.to_string(),
        })
    }

    fn known_apps(&self) -> Vec<AppId> {
        let mut apps: Vec<AppId> = self.providers.keys().cloned().collect();
        apps.sort();
        apps
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::domain::{ArgSpec, validators};

    fn sample_app() -> Result<Vec<CommandDescriptor>, DomainError> {
        Ok(vec![
            CommandDescriptor::builder("ping")
                .help("Answer with pong")
                .handler(|_| Ok(None))?,
        ])
    }

    fn broken_app() -> Result<Vec<CommandDescriptor>, DomainError> {
        // Duplicate argument name: the builder rejects this and the error
        // propagates out of the provider.
        let cmd = CommandDescriptor::builder("dup")
            .arg(ArgSpec::required("x", validators::string(), ""))?
            .arg(ArgSpec::required("x", validators::string(), ""))?
            .handler(|_| Ok(None))?;
        Ok(vec![cmd])
    }

    #[test]
    fn resolves_registered_apps() {
        let source = StaticCommandSource::new().register("net", sample_app);

        let descriptors = source.descriptors(&AppId::from("net")).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name(), "ping");
    }

    #[test]
    fn unknown_app_is_distinguished_from_broken_declarations() {
        let source = StaticCommandSource::new()
            .register("net", sample_app)
            .register("bad", broken_app);

        assert!(matches!(
            source.descriptors(&AppId::from("ghost")),
            Err(SourceError::UnknownApp(_))
        ));
        match source.descriptors(&AppId::from("bad")) {
            Err(SourceError::Declaration { reason }) => {
                assert!(reason.contains("twice"), "got: {reason}");
            }
            other => panic!("expected declaration error, got {other:?}"),
        }
    }

    #[test]
    fn re_registering_an_identifier_replaces_the_provider() {
        let source = StaticCommandSource::new()
            .register("net", broken_app)
            .register("net", sample_app);

        assert_eq!(source.len(), 1);
        assert!(source.descriptors(&AppId::from("net")).is_ok());
    }

    #[test]
    fn known_apps_are_sorted() {
        let source = StaticCommandSource::new()
            .register("zeta", sample_app)
            .register("alpha", sample_app);

        let names: Vec<String> = source
            .known_apps()
            .into_iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }
}
