//! Render metrics.
//!
//! # Metrics
//! - `render_cycles_total` (counter): render cycles by `outcome`
//! - `render_duration_seconds` (histogram): wall time of a render cycle
//! - `rendered_artifact_bytes` (gauge): size of the last good artifact

use std::time::Instant;

/// Result label for a render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Ok,
    ContextError,
    EvaluateError,
    NormalizeError,
}

impl RenderOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderOutcome::Ok => "ok",
            RenderOutcome::ContextError => "context_error",
            RenderOutcome::EvaluateError => "evaluate_error",
            RenderOutcome::NormalizeError => "normalize_error",
        }
    }
}

/// Record one finished render cycle.
pub fn record_render(outcome: RenderOutcome, start: Instant, artifact_bytes: usize) {
    metrics::counter!("render_cycles_total", "outcome" => outcome.as_str()).increment(1);
    metrics::histogram!("render_duration_seconds").record(start.elapsed().as_secs_f64());
    if outcome == RenderOutcome::Ok {
        metrics::gauge!("rendered_artifact_bytes").set(artifact_bytes as f64);
    }
}
