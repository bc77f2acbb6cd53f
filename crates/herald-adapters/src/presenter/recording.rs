//! Recording presenter for testing.
//!
//! Captures every event sent through the [`Presenter`] port, including
//! spinner lifecycles, so tests can assert on what a handler showed the
//! user without a terminal. Prompts answer with their defaults (or with
//! scripted responses queued in advance).

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use herald_core::application::ports::{Presenter, Spinner};

/// One recorded presentation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write(String),
    Success(String),
    Error(String),
    Warning(String),
    Info(String),
    Header(String),
    Table { title: Option<String>, rows: usize },
    Ask(String),
    Confirm(String),
    SpinnerStarted(String),
    SpinnerStopped,
}

#[derive(Debug, Default)]
struct Recorded {
    events: Vec<Event>,
    ask_answers: VecDeque<String>,
    confirm_answers: VecDeque<bool>,
}

/// In-memory presenter for testing.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next `ask` call.
    pub fn answer_next_ask(&self, answer: impl Into<String>) {
        self.inner
            .lock()
            .unwrap()
            .ask_answers
            .push_back(answer.into());
    }

    /// Queue an answer for the next `confirm` call.
    pub fn answer_next_confirm(&self, answer: bool) {
        self.inner
            .lock()
            .unwrap()
            .confirm_answers
            .push_back(answer);
    }

    /// All recorded events, in order.
    pub fn events(&self) -> Vec<Event> {
        self.inner.lock().unwrap().events.clone()
    }

    /// Whether any event's text contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.events().iter().any(|e| match e {
            Event::Write(s)
            | Event::Success(s)
            | Event::Error(s)
            | Event::Warning(s)
            | Event::Info(s)
            | Event::Header(s)
            | Event::Ask(s)
            | Event::Confirm(s)
            | Event::SpinnerStarted(s) => s.contains(needle),
            _ => false,
        })
    }

    /// Recorded error lines only.
    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: Event) {
        self.inner.lock().unwrap().events.push(event);
    }
}

struct RecordedSpinner {
    inner: Arc<Mutex<Recorded>>,
}

impl Spinner for RecordedSpinner {
    fn set_message(&mut self, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .events
            .push(Event::SpinnerStarted(message.to_string()));
    }
}

impl Drop for RecordedSpinner {
    fn drop(&mut self) {
        // Drop-based release mirrors the production spinner: the stop event
        // is recorded on every exit path, unwinding included.
        self.inner.lock().unwrap().events.push(Event::SpinnerStopped);
    }
}

impl Presenter for RecordingPresenter {
    fn write(&self, text: &str) -> io::Result<()> {
        self.record(Event::Write(text.to_string()));
        Ok(())
    }

    fn success(&self, msg: &str) -> io::Result<()> {
        self.record(Event::Success(msg.to_string()));
        Ok(())
    }

    fn error(&self, msg: &str) -> io::Result<()> {
        self.record(Event::Error(msg.to_string()));
        Ok(())
    }

    fn warning(&self, msg: &str) -> io::Result<()> {
        self.record(Event::Warning(msg.to_string()));
        Ok(())
    }

    fn info(&self, msg: &str) -> io::Result<()> {
        self.record(Event::Info(msg.to_string()));
        Ok(())
    }

    fn header(&self, title: &str, _subtitle: Option<&str>) -> io::Result<()> {
        self.record(Event::Header(title.to_string()));
        Ok(())
    }

    fn table(&self, _columns: &[&str], rows: &[Vec<String>], title: Option<&str>) -> io::Result<()> {
        self.record(Event::Table {
            title: title.map(str::to_string),
            rows: rows.len(),
        });
        Ok(())
    }

    fn ask(&self, question: &str, default: Option<&str>) -> io::Result<String> {
        self.record(Event::Ask(question.to_string()));
        let mut inner = self.inner.lock().unwrap();
        Ok(inner
            .ask_answers
            .pop_front()
            .or_else(|| default.map(str::to_string))
            .unwrap_or_default())
    }

    fn confirm(&self, question: &str, default: bool) -> io::Result<bool> {
        self.record(Event::Confirm(question.to_string()));
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.confirm_answers.pop_front().unwrap_or(default))
    }

    fn spinner(&self, message: &str) -> Box<dyn Spinner> {
        self.record(Event::SpinnerStarted(message.to_string()));
        Box::new(RecordedSpinner {
            inner: Arc::clone(&self.inner),
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
