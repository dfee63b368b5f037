//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check value ranges (timeouts > 0, known log levels)
//! - Check mode-dependent fields (command mode needs a program)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RenderSettings → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted at startup

use thiserror::Error;

use crate::config::schema::{NormalizerMode, RenderSettings};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("template.name must not be empty")]
    EmptyTemplateName,

    #[error("template.path must not be empty")]
    EmptyTemplatePath,

    #[error("normalizer.program must be set when mode = \"command\"")]
    MissingNormalizerProgram,

    #[error("normalizer.timeout_ms must be greater than zero")]
    ZeroNormalizerTimeout,

    #[error("unknown logging.level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate settings, collecting every problem found.
pub fn validate_settings(settings: &RenderSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.template.name.trim().is_empty() {
        errors.push(ValidationError::EmptyTemplateName);
    }
    if settings.template.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyTemplatePath);
    }

    if settings.normalizer.mode == NormalizerMode::Command {
        if settings.normalizer.program.trim().is_empty() {
            errors.push(ValidationError::MissingNormalizerProgram);
        }
        if settings.normalizer.timeout_ms == 0 {
            errors.push(ValidationError::ZeroNormalizerTimeout);
        }
    }

    let level = settings.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(settings.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
