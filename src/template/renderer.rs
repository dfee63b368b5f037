//! Per-cycle rendering.
//!
//! # Responsibilities
//! - Evaluate the compiled template against a configuration object
//! - Run the normalizer over the raw output
//! - Record render outcome, duration and artifact size
//!
//! # Design Decisions
//! - Scratch buffers are owned per instance and cleared on every call
//! - `&mut self` keeps one render in flight per instance; concurrent callers
//!   each own a `Renderer` over the same `Arc<TemplateHandle>`
//! - Errors are returned as-is; the caller decides whether to retry the cycle

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tera::Context;
use thiserror::Error;

use super::compiler::TemplateHandle;
use super::error_chain;
use super::normalizer::{NormalizeError, Normalizer};
use crate::observability::metrics::{self, RenderOutcome};

/// Initial capacity of each scratch buffer.
const SCRATCH_CAPACITY: usize = 16 * 1024;

/// Errors from a single render cycle.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The configuration object cannot be used as a template context.
    #[error("configuration object is not a map: {}", error_chain(.0))]
    Context(#[source] tera::Error),

    /// Template evaluation failed (undefined data, helper type mismatch).
    #[error("cannot evaluate template '{template}': {}", error_chain(.source))]
    Evaluate {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Blank-line normalization failed.
    #[error("template cleaning has failed: {0}")]
    Normalize(#[from] NormalizeError),
}

impl RenderError {
    fn outcome(&self) -> RenderOutcome {
        match self {
            RenderError::Context(_) => RenderOutcome::ContextError,
            RenderError::Evaluate { .. } => RenderOutcome::EvaluateError,
            RenderError::Normalize(_) => RenderOutcome::NormalizeError,
        }
    }
}

/// Renders one compiled template into proxy configuration artifacts.
#[derive(Debug)]
pub struct Renderer {
    handle: Arc<TemplateHandle>,
    normalizer: Normalizer,
    raw: Vec<u8>,
    formatted: Vec<u8>,
}

impl Renderer {
    /// Create a renderer with its own scratch buffers.
    pub fn new(handle: Arc<TemplateHandle>, normalizer: Normalizer) -> Self {
        Self {
            handle,
            normalizer,
            raw: Vec::with_capacity(SCRATCH_CAPACITY),
            formatted: Vec::with_capacity(SCRATCH_CAPACITY),
        }
    }

    /// The template this renderer evaluates.
    pub fn handle(&self) -> &Arc<TemplateHandle> {
        &self.handle
    }

    /// Render `config` into a normalized artifact.
    ///
    /// The top-level fields of `config` become template variables.
    pub async fn render<T>(&mut self, config: &T) -> Result<Vec<u8>, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let start = Instant::now();
        let result = self.render_cycle(config).await;

        match &result {
            Ok(artifact) => {
                metrics::record_render(RenderOutcome::Ok, start, artifact.len());
                tracing::debug!(
                    template = %self.handle.name(),
                    raw_bytes = self.raw.len(),
                    bytes = artifact.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Configuration rendered"
                );
            }
            Err(e) => {
                metrics::record_render(e.outcome(), start, 0);
                tracing::error!(template = %self.handle.name(), error = %e, "Render failed");
            }
        }
        result
    }

    async fn render_cycle<T>(&mut self, config: &T) -> Result<Vec<u8>, RenderError>
    where
        T: Serialize + ?Sized,
    {
        self.raw.clear();
        self.formatted.clear();

        let context = Context::from_serialize(config).map_err(RenderError::Context)?;
        self.handle
            .render_to(&context, &mut self.raw)
            .map_err(|source| RenderError::Evaluate {
                template: self.handle.name().to_string(),
                source,
            })?;

        self.normalizer
            .normalize_into(&self.raw, &mut self.formatted)
            .await?;
        Ok(self.formatted.clone())
    }
}
