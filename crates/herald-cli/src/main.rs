//! # Herald CLI
//!
//! Declarative command runner: assembles an application out of the apps
//! listed in settings and dispatches exactly one invocation.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load settings (file + env + defaults).
//! 4. Build the console presenter.
//! 5. Load the command table from the configured apps (once, before any
//!    dispatch — the table is read-only afterwards).
//! 6. Dispatch the invocation, or list commands when none was given.
//!
//! ## Exit codes
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | Success                          |
//! |  1   | Validation / handler failure     |
//! |  2   | Unknown command / bad arguments  |
//! |  3   | App load failure                 |
//! |  4   | Settings error                   |

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};

use herald_core::application::{AppRegistry, CommandTable, Dispatcher, ports::Presenter};

use crate::{
    apps::builtin_source,
    cli::Cli,
    error::{CliError, CliResult},
    logging::init_logging,
    output::ConsoleUi,
    settings::Settings,
};

mod apps;
mod cli;
mod error;
mod logging;
mod output;
mod settings;

fn main() -> ExitCode {
    // Load .env before anything else — including tracing init — so flags
    // like HERALD_APPS are visible everywhere. Silently ignored if absent.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    // clap handles --help / --version and exits automatically; errors here
    // are argument-parse failures (exit 2).
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e.render().ansi());
            return ExitCode::from(2);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load settings ──────────────────────────────────────────────────
    let settings = match Settings::load(cli.global.config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => return handle_error(e, cli.global.verbose > 0),
    };

    // ── 4. Build presenter ────────────────────────────────────────────────
    let ui: Arc<dyn Presenter> = Arc::new(ConsoleUi::new(&cli.global, &settings));

    // ── 5. Load the command table ─────────────────────────────────────────
    let table = match load_table(&settings) {
        Ok(table) => table,
        Err(e) => return handle_error(e, cli.global.verbose > 0),
    };

    // ── 6. Dispatch ───────────────────────────────────────────────────────
    match cli.command {
        Some(name) => {
            let code = Dispatcher::new(ui).dispatch(&table, &name, &cli.args);
            info!(command = %name, code, "invocation finished");
            ExitCode::from(clamp_code(code))
        }
        None => match list_commands(&table, ui.as_ref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => handle_error(e.into(), cli.global.verbose > 0),
        },
    }
}

/// Build the command table from the configured app list.
///
/// Runs exactly once per process, strictly before any dispatch.
fn load_table(settings: &Settings) -> CliResult<CommandTable> {
    let registry = AppRegistry::new(Box::new(builtin_source()));
    let table = registry.load(&settings.app_ids())?;
    Ok(table)
}

/// No command given: show what the installed apps provide.
fn list_commands(table: &CommandTable, ui: &dyn Presenter) -> std::io::Result<()> {
    ui.header("herald", Some("Available commands"))?;

    let rows: Vec<Vec<String>> = table
        .iter_sorted()
        .map(|d| vec![d.usage(), d.help().to_string()])
        .collect();
    ui.table(&["Command", "Description"], &rows, None)?;
    ui.write("Run 'herald <command> [args...]' to invoke one.")?;
    Ok(())
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// This is the single place where structured startup errors become
/// human-readable output and OS exit codes.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    // 1. Emit a structured log event at the right severity.
    err.log();

    // 2. Print a user-friendly message.  We write directly to stderr so the
    //    message appears even when stdout is redirected.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

/// Clamp a dispatcher exit code into the OS range.
fn clamp_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

// ── tests ─────────────────────────────────────────────────────────────────────
