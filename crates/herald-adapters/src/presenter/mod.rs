//! Presenter adapters.

mod recording;

pub use recording::{Event, RecordingPresenter};
