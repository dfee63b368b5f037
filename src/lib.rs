//! Proxy configuration rendering library.
//!
//! Compiles a Tera template once, binds the hostname/size/hash helpers into
//! it, and renders serializable configuration objects into blank-line-free
//! proxy configuration artifacts.

pub mod config;
pub mod observability;
pub mod template;

pub use config::RenderSettings;
pub use template::{Normalizer, RenderError, Renderer, TemplateError, TemplateHandle};
