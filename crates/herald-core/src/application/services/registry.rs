//! App Registry - builds the command table from configured apps.
//!
//! The registry runs exactly once per process, before any dispatch. It asks
//! the [`CommandSource`] port for each configured app's descriptors, in
//! settings order, and folds them into one [`CommandTable`]. Name
//! collisions are resolved last-registration-wins so operators can override
//! built-in commands by app ordering; a collision is logged, never an
//! error. Any app that cannot be located or evaluated fails the whole load.

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        descriptor::CommandDescriptor,
        ports::{CommandSource, SourceError},
    },
    domain::AppId,
};

/// The process-wide command table: name → descriptor.
///
/// Built once during the startup load phase, read-only thereafter - there
/// is deliberately no mutation API on the finished value.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandTable {
    /// Build a table directly from descriptors, without app loading.
    ///
    /// Collisions resolve last-wins, same as the registry. This keeps the
    /// table (and the dispatcher) testable from a fixed descriptor list.
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        let mut table = Self::default();
        for descriptor in descriptors {
            table.insert(descriptor);
        }
        table
    }

    fn insert(&mut self, descriptor: CommandDescriptor) {
        let name = descriptor.name().to_string();
        if self.commands.insert(name.clone(), descriptor).is_some() {
            debug!(command = %name, "command overridden by later registration");
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted for stable display.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Descriptors in sorted-name order, for listings.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &CommandDescriptor> {
        let mut entries: Vec<&CommandDescriptor> = self.commands.values().collect();
        entries.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Structural equality against another table: same names, same command
    /// shapes. Handlers are opaque and excluded.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.commands.iter().all(|(name, descriptor)| {
                other
                    .get(name)
                    .is_some_and(|o| descriptor.same_shape(o))
            })
    }
}

/// Builds the command table from the configured app list.
pub struct AppRegistry {
    source: Box<dyn CommandSource>,
}

impl AppRegistry {
    pub fn new(source: Box<dyn CommandSource>) -> Self {
        Self { source }
    }

    /// Load every configured app, in order, into one table.
    ///
    /// Later apps overwrite earlier ones on command-name collisions. Fails
    /// with [`ApplicationError::AppLoad`] on the first app that cannot be
    /// located or whose declarations cannot be evaluated - the process
    /// cannot proceed without its table.
    #[instrument(skip_all, fields(apps = app_ids.len()))]
    pub fn load(&self, app_ids: &[AppId]) -> Result<CommandTable, ApplicationError> {
        let mut table = CommandTable::default();

        for app_id in app_ids {
            let descriptors = self.source.descriptors(app_id).map_err(|e| {
                let cause = match &e {
                    SourceError::UnknownApp(_) => "unknown app".to_string(),
                    SourceError::Declaration { reason } => reason.clone(),
                };
                ApplicationError::AppLoad {
                    identifier: app_id.to_string(),
                    cause,
                }
            })?;

            debug!(app = %app_id, commands = descriptors.len(), "app loaded");
            for descriptor in descriptors {
                if table.contains(descriptor.name()) {
                    warn!(
                        command = descriptor.name(),
                        app = %app_id,
                        "command overridden by later app"
                    );
                }
                table.insert(descriptor);
            }
        }

        info!(commands = table.len(), "command table built");
        Ok(table)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::descriptor::HandlerResult;
    use crate::application::context::Context;
    use std::collections::HashMap as Map;

    /// Hand-rolled fake source: app id → descriptor factory.
    struct FakeSource {
        apps: Map<AppId, Vec<fn() -> CommandDescriptor>>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self { apps: Map::new() }
        }

        fn with_app(mut self, id: &str, factories: Vec<fn() -> CommandDescriptor>) -> Self {
            self.apps.insert(AppId::from(id), factories);
            self
        }
    }

    impl CommandSource for FakeSource {
        fn descriptors(&self, app: &AppId) -> Result<Vec<CommandDescriptor>, SourceError> {
            self.apps
                .get(app)
                .map(|factories| factories.iter().map(|f| f()).collect())
                .ok_or_else(|| SourceError::UnknownApp(app.clone()))
        }

        fn known_apps(&self) -> Vec<AppId> {
            self.apps.keys().cloned().collect()
        }
    }

    fn noop(_ctx: Context) -> HandlerResult {
        Ok(None)
    }

    fn hello() -> CommandDescriptor {
        CommandDescriptor::builder("hello")
            .help("from app one")
            .handler(noop)
            .unwrap()
    }

    fn goodbye() -> CommandDescriptor {
        CommandDescriptor::builder("goodbye")
            .handler(noop)
            .unwrap()
    }

    fn hello_override() -> CommandDescriptor {
        CommandDescriptor::builder("hello")
            .help("from app two")
            .handler(noop)
            .unwrap()
    }

    #[test]
    fn load_collects_the_union_of_all_commands() {
        let source = FakeSource::new()
            .with_app("one", vec![hello])
            .with_app("two", vec![goodbye]);
        let registry = AppRegistry::new(Box::new(source));

        let table = registry
            .load(&[AppId::from("one"), AppId::from("two")])
            .unwrap();

        assert_eq!(table.names(), ["goodbye", "hello"]);
    }

    #[test]
    fn later_app_wins_on_name_collision() {
        let source = FakeSource::new()
            .with_app("one", vec![hello])
            .with_app("two", vec![hello_override]);
        let registry = AppRegistry::new(Box::new(source));

        let table = registry
            .load(&[AppId::from("one"), AppId::from("two")])
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("hello").unwrap().help(), "from app two");
    }

    #[test]
    fn collision_winner_follows_configured_order_not_declaration() {
        let source = FakeSource::new()
            .with_app("one", vec![hello])
            .with_app("two", vec![hello_override]);
        let registry = AppRegistry::new(Box::new(source));

        // Reversed order: "one" now loads last and wins.
        let table = registry
            .load(&[AppId::from("two"), AppId::from("one")])
            .unwrap();

        assert_eq!(table.get("hello").unwrap().help(), "from app one");
    }

    #[test]
    fn unknown_app_fails_the_whole_load() {
        let source = FakeSource::new().with_app("one", vec![hello]);
        let registry = AppRegistry::new(Box::new(source));

        let err = registry
            .load(&[AppId::from("one"), AppId::from("ghost")])
            .unwrap_err();

        match err {
            ApplicationError::AppLoad { identifier, .. } => assert_eq!(identifier, "ghost"),
            other => panic!("expected AppLoad, got {other:?}"),
        }
    }

    #[test]
    fn declaration_failure_carries_its_reason() {
        struct BrokenSource;
        impl CommandSource for BrokenSource {
            fn descriptors(
                &self,
                _app: &AppId,
            ) -> Result<Vec<CommandDescriptor>, SourceError> {
                Err(SourceError::Declaration {
                    reason: "duplicate argument 'email'".into(),
                })
            }
            fn known_apps(&self) -> Vec<AppId> {
                vec![]
            }
        }

        let registry = AppRegistry::new(Box::new(BrokenSource));
        let err = registry.load(&[AppId::from("bad")]).unwrap_err();
        assert!(err.to_string().contains("duplicate argument 'email'"));
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let make = || {
            FakeSource::new()
                .with_app("one", vec![hello, goodbye])
                .with_app("two", vec![hello_override])
        };
        let apps = [AppId::from("one"), AppId::from("two")];

        let first = AppRegistry::new(Box::new(make())).load(&apps).unwrap();
        let second = AppRegistry::new(Box::new(make())).load(&apps).unwrap();

        assert!(first.same_shape(&second));
    }

    #[test]
    fn from_descriptors_matches_registry_collision_policy() {
        let table = CommandTable::from_descriptors([hello(), hello_override()]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("hello").unwrap().help(), "from app two");
    }
}
