//! Configuration rendering subsystem.
//!
//! # Data Flow
//! ```text
//! template file
//!     → compiler.rs (read + parse once, helpers bound)
//!     → TemplateHandle (immutable, shared via Arc)
//!
//! Per render cycle:
//!     configuration object (Serialize)
//!     → renderer.rs (evaluate into raw scratch buffer)
//!     → normalizer.rs (drop blank lines into formatted buffer)
//!     → artifact bytes returned to the caller
//! ```
//!
//! # Design Decisions
//! - Helpers are registered into each Tera instance; there is no global table
//! - Template compile errors are startup errors, render errors are per-cycle
//! - A render cycle is linear: no retries, no partial artifact on failure

pub mod compiler;
pub mod filters;
pub mod helpers;
pub mod normalizer;
pub mod renderer;
pub mod size;

pub use compiler::{TemplateError, TemplateHandle};
pub use normalizer::{normalize, CommandNormalizer, NormalizeError, Normalizer};
pub use renderer::{RenderError, Renderer};

use std::error::Error;

/// Flatten an error and its sources into one line.
///
/// Tera nests the useful message (missing variable, bad filter argument)
/// a few levels below the top-level "failed to render" error.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
