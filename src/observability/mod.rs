//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! compiler / renderer / helpers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (render counters, duration histogram, artifact size)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Helpers report degraded input through tracing, never by aborting a render
//! - Metrics go through the `metrics` facade; no exporter is bundled
//! - RUST_LOG overrides the configured log level

pub mod logging;
pub mod metrics;
