//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `herald-adapters` (and the
//! console presenter in `herald-cli`) implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CommandSource`: app discovery (identifier → command descriptors)
//!   - `Presenter`: the Presentation Engine handle carried by the context
//!   - `InteractiveRuntime`: full-screen dashboard handoff
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandSource, InteractiveRuntime, Presenter, SourceError, Spinner};
