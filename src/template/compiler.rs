//! Template compilation.
//!
//! # Responsibilities
//! - Read the template source exactly once
//! - Bind the helper library and parse the source
//! - Hand out an immutable handle shared by all renderers
//!
//! # Design Decisions
//! - Fail fast: read and parse errors are returned, never degraded
//! - Autoescaping is off; the output is proxy config, not HTML
//! - Every handle owns its own Tera instance and helper table

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use thiserror::Error;

use super::error_chain;
use super::filters;

/// Errors raised while compiling a template source.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("cannot read template file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template source failed to parse.
    #[error("cannot parse template '{name}': {}", error_chain(.source))]
    Parse {
        name: String,
        #[source]
        source: tera::Error,
    },
}

/// A compiled template bound to the helper library.
#[derive(Debug)]
pub struct TemplateHandle {
    name: String,
    tera: Tera,
}

impl TemplateHandle {
    /// Read and compile the template at `path` under `name`.
    pub fn compile(name: &str, path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let handle = Self::compile_str(name, &source)?;
        tracing::info!(
            template = %name,
            path = %path.display(),
            bytes = source.len(),
            "Template compiled"
        );
        Ok(handle)
    }

    /// Compile an in-memory template source under `name`.
    pub fn compile_str(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        filters::register(&mut tera);

        tera.add_raw_template(name, source)
            .map_err(|source| TemplateError::Parse {
                name: name.to_string(),
                source,
            })?;

        Ok(Self {
            name: name.to_string(),
            tera,
        })
    }

    /// The name the template was compiled under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn render_to(&self, context: &Context, out: impl Write) -> tera::Result<()> {
        self.tera.render_to(&self.name, context, out)
    }
}
