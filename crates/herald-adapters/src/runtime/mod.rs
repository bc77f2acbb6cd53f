//! Interactive runtime adapters.

mod headless;

pub use headless::HeadlessRuntime;
