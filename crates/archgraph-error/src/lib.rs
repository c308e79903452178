//! # archgraph-error
//!
//! Unified error handling for archgraph.
//!
//! ## Design
//!
//! - **ErrorKind**: what went wrong (e.g. `DanglingEdgeReference`, `RenderEngine`)
//! - **ErrorCategory**: which phase it belongs to (configuration, validation,
//!   resource, engine), derived from the kind
//! - **Error Context**: key/value pairs naming the failing key, path or program
//! - **Error Source**: the underlying error, kept without leaking its raw type
//!
//! ## Usage
//!
//! ```rust
//! use archgraph_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::DanglingEdgeReference, "edge target 'Z' is not declared")
//!         .with_operation("graph::validate")
//!         .with_context("to_key", "Z"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, archgraph_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Engine diagnostics are stored verbatim as the message
//! - Nothing is retried; every error goes straight back to the caller

mod category;
mod error;
mod kind;

pub use category::ErrorCategory;
pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using archgraph Error
pub type Result<T> = std::result::Result<T, Error>;
