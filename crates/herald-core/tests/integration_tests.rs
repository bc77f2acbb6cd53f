//! Integration tests for herald-core: registry → table → dispatcher,
//! driven through the ports with in-test fakes.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use herald_core::application::{
    AppRegistry, Dispatcher,
    descriptor::{CommandDescriptor, HandlerResult},
    ports::{CommandSource, Presenter, SourceError, Spinner},
};
use herald_core::domain::{AppId, ArgSpec, validators};

// ── fakes ─────────────────────────────────────────────────────────────────────

type AppFactory = Arc<dyn Fn() -> Vec<CommandDescriptor> + Send + Sync>;

/// Command source backed by a map of descriptor-list factories.
#[derive(Default)]
struct MapSource {
    apps: HashMap<AppId, AppFactory>,
}

impl MapSource {
    fn new() -> Self {
        Self::default()
    }

    fn with_app<F>(mut self, id: &str, factory: F) -> Self
    where
        F: Fn() -> Vec<CommandDescriptor> + Send + Sync + 'static,
    {
        self.apps.insert(AppId::from(id), Arc::new(factory));
        self
    }
}

impl CommandSource for MapSource {
    fn descriptors(&self, app: &AppId) -> Result<Vec<CommandDescriptor>, SourceError> {
        self.apps
            .get(app)
            .map(|f| f())
            .ok_or_else(|| SourceError::UnknownApp(app.clone()))
    }

    fn known_apps(&self) -> Vec<AppId> {
        self.apps.keys().cloned().collect()
    }
}

/// Presenter that records everything written through it.
#[derive(Default)]
struct CapturingUi {
    lines: Mutex<Vec<String>>,
}

struct NoSpinner;
impl Spinner for NoSpinner {
    fn set_message(&mut self, _message: &str) {}
}

impl CapturingUi {
    fn push(&self, prefix: &str, msg: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(format!("{prefix}{msg}"));
        Ok(())
    }

    fn contains(&self, needle: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l.contains(needle))
    }
}

impl Presenter for CapturingUi {
    fn write(&self, text: &str) -> io::Result<()> {
        self.push("", text)
    }
    fn success(&self, msg: &str) -> io::Result<()> {
        self.push("ok: ", msg)
    }
    fn error(&self, msg: &str) -> io::Result<()> {
        self.push("error: ", msg)
    }
    fn warning(&self, msg: &str) -> io::Result<()> {
        self.push("warn: ", msg)
    }
    fn info(&self, msg: &str) -> io::Result<()> {
        self.push("info: ", msg)
    }
    fn header(&self, title: &str, _subtitle: Option<&str>) -> io::Result<()> {
        self.push("header: ", title)
    }
    fn table(&self, _columns: &[&str], rows: &[Vec<String>], _title: Option<&str>) -> io::Result<()> {
        self.push("table: ", &format!("{} rows", rows.len()))
    }
    fn ask(&self, _question: &str, default: Option<&str>) -> io::Result<String> {
        Ok(default.unwrap_or_default().to_string())
    }
    fn confirm(&self, _question: &str, default: bool) -> io::Result<bool> {
        Ok(default)
    }
    fn spinner(&self, _message: &str) -> Box<dyn Spinner> {
        Box::new(NoSpinner)
    }
}

// ── fixture apps ──────────────────────────────────────────────────────────────

fn add_user(calls: Arc<AtomicUsize>) -> CommandDescriptor {
    CommandDescriptor::builder("add_user")
        .help("Register a new user by email")
        .arg(ArgSpec::required(
            "email",
            validators::email(),
            "email address of the new user",
        ))
        .unwrap()
        .handler(move |ctx| -> HandlerResult {
            calls.fetch_add(1, Ordering::SeqCst);
            let email = ctx.str("email").expect("validated argument is present");
            ctx.ui.success(&format!("user {email} added"))?;
            Ok(None)
        })
        .unwrap()
}

fn list_users() -> CommandDescriptor {
    CommandDescriptor::builder("list_users")
        .help("Print known users")
        .handler(|ctx| -> HandlerResult {
            ctx.ui.table(
                &["ID", "Email"],
                &[vec!["1".into(), "a@b.com".into()]],
                Some("Users"),
            )?;
            Ok(None)
        })
        .unwrap()
}

fn add_user_stub() -> CommandDescriptor {
    CommandDescriptor::builder("add_user")
        .help("Overriding declaration")
        .handler(|_| Ok(Some(42)))
        .unwrap()
}

struct Fixture {
    calls: Arc<AtomicUsize>,
    source: MapSource,
}

fn fixture() -> Fixture {
    let calls = Arc::new(AtomicUsize::new(0));
    let handler_calls = Arc::clone(&calls);
    let source = MapSource::new()
        .with_app("users", move || {
            vec![add_user(Arc::clone(&handler_calls)), list_users()]
        })
        .with_app("override", || vec![add_user_stub()]);
    Fixture { calls, source }
}

fn ids(names: &[&str]) -> Vec<AppId> {
    names.iter().map(|n| AppId::from(*n)).collect()
}

// ── scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn add_user_scenario_valid_email() {
    let Fixture { calls, source } = fixture();
    let table = AppRegistry::new(Box::new(source)).load(&ids(&["users"])).unwrap();
    let ui = Arc::new(CapturingUi::default());
    let dispatcher = Dispatcher::new(Arc::clone(&ui) as Arc<dyn Presenter>);

    let code = dispatcher.dispatch(&table, "add_user", &["contact@example.com".to_string()]);

    assert_eq!(code, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(ui.contains("user contact@example.com added"));
}

#[test]
fn add_user_scenario_invalid_email_never_reaches_handler() {
    let Fixture { calls, source } = fixture();
    let table = AppRegistry::new(Box::new(source)).load(&ids(&["users"])).unwrap();
    let ui = Arc::new(CapturingUi::default());
    let dispatcher = Dispatcher::new(Arc::clone(&ui) as Arc<dyn Presenter>);

    let code = dispatcher.dispatch(&table, "add_user", &["not-an-email".to_string()]);

    assert_eq!(code, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(ui.contains("invalid email format"));
}

#[test]
fn unknown_command_is_reported_with_exit_two() {
    let Fixture { calls, source } = fixture();
    let table = AppRegistry::new(Box::new(source)).load(&ids(&["users"])).unwrap();
    let ui = Arc::new(CapturingUi::default());
    let dispatcher = Dispatcher::new(Arc::clone(&ui) as Arc<dyn Presenter>);

    let code = dispatcher.dispatch(&table, "drop_users", &[]);

    assert_eq!(code, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(ui.contains("unknown command 'drop_users'"));
}

#[test]
fn later_app_overrides_and_its_handler_runs() {
    let Fixture { calls, source } = fixture();
    let table = AppRegistry::new(Box::new(source))
        .load(&ids(&["users", "override"]))
        .unwrap();
    let ui = Arc::new(CapturingUi::default());
    let dispatcher = Dispatcher::new(Arc::clone(&ui) as Arc<dyn Presenter>);

    // The override declares no arguments and exits 42; the original
    // handler must not run.
    let code = dispatcher.dispatch(&table, "add_user", &[]);
    assert_eq!(code, 42);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn table_is_the_union_of_all_apps() {
    let Fixture { source, .. } = fixture();
    let table = AppRegistry::new(Box::new(source)).load(&ids(&["users"])).unwrap();
    assert_eq!(table.names(), ["add_user", "list_users"]);
}

#[test]
fn loading_the_same_list_twice_yields_the_same_shape() {
    let first = AppRegistry::new(Box::new(fixture().source))
        .load(&ids(&["users", "override"]))
        .unwrap();
    let second = AppRegistry::new(Box::new(fixture().source))
        .load(&ids(&["users", "override"]))
        .unwrap();
    assert!(first.same_shape(&second));
}

#[test]
fn handlers_report_through_the_presenter_port() {
    let Fixture { source, .. } = fixture();
    let table = AppRegistry::new(Box::new(source)).load(&ids(&["users"])).unwrap();
    let ui = Arc::new(CapturingUi::default());
    let dispatcher = Dispatcher::new(Arc::clone(&ui) as Arc<dyn Presenter>);

    let code = dispatcher.dispatch(&table, "list_users", &[]);

    assert_eq!(code, 0);
    assert!(ui.contains("table: 1 rows"));
}
