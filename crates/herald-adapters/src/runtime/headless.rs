//! Headless stand-in for the Interactive View Runtime.
//!
//! Real dashboards own the terminal's event loop; in tests the handoff
//! contract is all that matters: a single blocking call that returns the
//! dashboard's final exit signal. This fake counts its runs and returns a
//! configured code.

use std::io;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use herald_core::application::ports::InteractiveRuntime;

/// Fake dashboard runtime for testing handoff wiring.
#[derive(Debug, Default)]
pub struct HeadlessRuntime {
    exit_code: AtomicI32,
    runs: AtomicUsize,
}

impl HeadlessRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit code `run` will report.
    pub fn with_exit_code(exit_code: i32) -> Self {
        Self {
            exit_code: AtomicI32::new(exit_code),
            runs: AtomicUsize::new(0),
        }
    }

    /// How many times the dashboard was entered.
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl InteractiveRuntime for HeadlessRuntime {
    fn run(&self) -> io::Result<i32> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(self.exit_code.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_configured_exit_code_and_counts_runs() {
        let runtime = HeadlessRuntime::with_exit_code(3);
        assert_eq!(runtime.run().unwrap(), 3);
        assert_eq!(runtime.run().unwrap(), 3);
        assert_eq!(runtime.runs(), 2);
    }
}
