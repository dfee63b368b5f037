//! Renderer settings subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RenderSettings (validated, immutable)
//!     → template path/name, Normalizer, logging setup
//! ```
//!
//! # Design Decisions
//! - Settings are read once at startup
//! - All fields have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks

pub mod document;
pub mod loader;
pub mod schema;
pub mod validation;

pub use document::{load_document, DocumentError};
pub use loader::{load_settings, SettingsError};
pub use schema::RenderSettings;
pub use schema::{LogFormat, LoggingSettings, NormalizerMode, NormalizerSettings, TemplateSettings};
