// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Herald.
//!
//! This module contains the validation vocabulary of the framework: typed
//! argument values, the validator contract and its built-ins, argument
//! specifications, and app identifiers.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No terminal I/O**: Presentation is a port in the application layer
//!   (the file-existence check inside the File/Path validators is the one
//!   sanctioned, idempotent filesystem read)
//! - **Immutable values**: Argument specs and values are Clone
//!
pub mod app;
pub mod error;
pub mod spec;
pub mod validators;

// Re-exports for convenience
pub use app::AppId;
pub use error::{DomainError, ErrorCategory};
pub use spec::ArgSpec;
pub use validators::{ArgValue, Validator};
