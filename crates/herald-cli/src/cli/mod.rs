//! CLI argument definitions using the clap derive API.
//!
//! Clap only parses the *global* surface here. The command name and its
//! positional arguments are passed through raw: which commands exist is
//! decided by the installed apps at runtime, and their arguments are
//! validated by the dispatcher, not by clap.

use clap::Parser;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "herald",
    bin_name = "herald",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f4ef} Declarative command runner",
    long_about = "Herald assembles a command-line application out of the \
                  apps listed in your settings. Each app declares named, \
                  documented commands with validated arguments.",
    after_help = "EXAMPLES:\n\
        \x20 herald                       # list available commands\n\
        \x20 herald startproject my-tool  # scaffold a new project\n\
        \x20 herald add_user a@b.com      # run a command an app declared\n\
        \x20 herald -vv add_user a@b.com  # same, with debug logging"
)]
pub struct Cli {
    /// Flags available on every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command registered by an installed app.
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Raw positional arguments for the command, validated by the dispatcher.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

// ── tests ─────────────────────────────────────────────────────────────────────
