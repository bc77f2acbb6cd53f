//! Console implementation of the Presentation Engine port.
//!
//! This is the production [`Presenter`]: everything a handler (or the
//! dispatcher) shows the user goes through here. Quiet mode suppresses all
//! non-error output; errors must always be visible.

use std::io::{self, IsTerminal, Write as _};
use std::time::Duration;

use console::Term;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use herald_core::application::ports::{Presenter, Spinner};

use crate::cli::GlobalArgs;
use crate::settings::Settings;

/// Terminal-backed presenter.
pub struct ConsoleUi {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl ConsoleUi {
    /// Build a `ConsoleUi` from parsed CLI flags and loaded settings.
    pub fn new(args: &GlobalArgs, settings: &Settings) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || settings.output.no_color,
            term: Term::stdout(),
        }
    }

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn line(&self, plain: String, colored: String) -> io::Result<()> {
        if self.no_color {
            self.term.write_line(&plain)
        } else {
            self.term.write_line(&colored)
        }
    }
}

impl Presenter for ConsoleUi {
    /// Generic message; suppressed in quiet mode.
    fn write(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(text)
    }

    /// Success indicator: `✓ <msg>`.
    fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(
            format!("\u{2713} {msg}"),
            format!("{} {}", "\u{2713}".green().bold(), msg.green()),
        )
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode — errors
    /// must always be visible. Written to stderr so the message appears
    /// even when stdout is redirected.
    fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{line}")
    }

    /// Warning indicator: `⚠ <msg>`.
    fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(
            format!("\u{26a0} {msg}"),
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow()),
        )
    }

    /// Informational indicator: `ℹ <msg>`.
    fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(
            format!("\u{2139} {msg}"),
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue()),
        )
    }

    /// Upper-cased header line with an optional dimmed subtitle.
    fn header(&self, title: &str, subtitle: Option<&str>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let title = title.to_uppercase();
        self.line(
            format!("== {title} =="),
            format!("{}", title.cyan().bold()),
        )?;
        if let Some(sub) = subtitle {
            self.line(format!("{sub}"), format!("{}", sub.dimmed()))?;
        }
        self.term.write_line("")
    }

    /// Width-aligned table with a header row.
    fn table(&self, columns: &[&str], rows: &[Vec<String>], title: Option<&str>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        if let Some(title) = title {
            self.line(
                format!("{title}"),
                format!("{}", title.cyan().bold()),
            )?;
        }

        // Column widths: max of header and every cell.
        let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        let header = columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        self.line(header.clone(), format!("{}", header.bold()))?;

        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");
        self.term.write_line(&rule)?;

        for row in rows {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let width = widths.get(i).copied().unwrap_or(0);
                    format!("{:<width$}", cell, width = width)
                })
                .collect::<Vec<_>>()
                .join("  ");
            self.term.write_line(&line)?;
        }
        self.term.write_line("")
    }

    fn ask(&self, question: &str, default: Option<&str>) -> io::Result<String> {
        // Quiet mode means non-interactive: answer with the default.
        if self.quiet {
            return Ok(default.unwrap_or_default().to_string());
        }
        prompt_line(question, default)
    }

    fn confirm(&self, question: &str, default: bool) -> io::Result<bool> {
        if self.quiet {
            return Ok(default);
        }
        prompt_confirm(question, default)
    }

    /// Animated spinner; a silent stub when quiet or not on a terminal.
    ///
    /// The returned guard clears the line when dropped, which covers early
    /// returns and unwinding handler failures alike.
    fn spinner(&self, message: &str) -> Box<dyn Spinner> {
        if self.quiet || !io::stdout().is_terminal() {
            return Box::new(SilentSpinner);
        }
        let bar = ProgressBar::new_spinner();
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Box::new(ConsoleSpinner { bar })
    }
}

// ── spinners ──────────────────────────────────────────────────────────────────

struct ConsoleSpinner {
    bar: ProgressBar,
}

impl Spinner for ConsoleSpinner {
    fn set_message(&mut self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}

impl Drop for ConsoleSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

struct SilentSpinner;

impl Spinner for SilentSpinner {
    fn set_message(&mut self, _message: &str) {}
}

// ── prompts ───────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn prompt_line(question: &str, default: Option<&str>) -> io::Result<String> {
    let mut input = dialoguer::Input::<String>::new().with_prompt(question);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    input.interact_text().map_err(io::Error::other)
}

#[cfg(feature = "interactive")]
fn prompt_confirm(question: &str, default: bool) -> io::Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()
        .map_err(io::Error::other)
}

#[cfg(not(feature = "interactive"))]
fn prompt_line(question: &str, default: Option<&str>) -> io::Result<String> {
    let mut stderr = io::stderr().lock();
    match default {
        Some(d) => write!(stderr, "{question} [{d}]: ")?,
        None => write!(stderr, "{question}: ")?,
    }
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(answer.to_string())
    }
}

#[cfg(not(feature = "interactive"))]
fn prompt_confirm(question: &str, default: bool) -> io::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    let answer = prompt_line(&format!("{question} [{hint}]"), None)?;
    match answer.to_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        _ => Ok(false),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn make_ui(quiet: bool, no_color: bool) -> ConsoleUi {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        ConsoleUi::new(&args, &Settings::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let ui = make_ui(true, true);
        assert!(ui.write("hello").is_ok());
        assert!(ui.is_quiet());
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        // error() must always write — calling it in quiet mode should not
        // silently drop the message.
        let ui = make_ui(true, true);
        assert!(ui.error("something went wrong").is_ok());
    }

    #[test]
    fn settings_no_color_flows_through() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
        };
        let settings = Settings {
            output: crate::settings::OutputSettings { no_color: true },
            ..Settings::default()
        };
        let ui = ConsoleUi::new(&args, &settings);
        assert!(!ui.supports_color());
    }

    #[test]
    fn quiet_prompts_answer_with_defaults() {
        let ui = make_ui(true, true);
        assert_eq!(ui.ask("name?", Some("bob")).unwrap(), "bob");
        assert!(ui.confirm("sure?", true).unwrap());
        assert!(!ui.confirm("sure?", false).unwrap());
    }

    #[test]
    fn quiet_spinner_is_silent_and_droppable() {
        let ui = make_ui(true, true);
        let mut spinner = ui.spinner("working");
        spinner.set_message("still working");
        drop(spinner);
    }

    #[test]
    fn table_handles_ragged_rows() {
        let ui = make_ui(true, true); // quiet: exercises the early return
        let rows = vec![vec!["only-one-cell".to_string()]];
        assert!(ui.table(&["A", "B"], &rows, Some("T")).is_ok());
    }
}
