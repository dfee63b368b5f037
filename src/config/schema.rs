//! Settings schema definitions.
//!
//! Settings describe how the renderer runs (which template, which normalizer,
//! how to log). The configuration object being rendered is not described
//! here; it is any serializable value supplied per render call.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::template::{CommandNormalizer, Normalizer};

/// Root settings for the renderer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RenderSettings {
    /// Template source location.
    pub template: TemplateSettings,

    /// Normalization strategy.
    pub normalizer: NormalizerSettings,

    /// Logging output.
    pub logging: LoggingSettings,
}

impl RenderSettings {
    /// Apply command-line overrides for the template path and name.
    pub fn apply_overrides(&mut self, path: Option<PathBuf>, name: Option<String>) {
        if let Some(path) = path {
            self.template.path = path;
        }
        if let Some(name) = name {
            self.template.name = name;
        }
    }
}

/// Template source settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Name the template is compiled under.
    pub name: String,

    /// Path to the template file.
    pub path: PathBuf,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            name: "haproxy".to_string(),
            path: PathBuf::from("/etc/haproxy/template/haproxy.tmpl"),
        }
    }
}

/// Which normalizer to run after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerMode {
    /// In-process blank-line filter.
    #[default]
    Lines,
    /// External filter program.
    Command,
}

/// Normalizer settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizerSettings {
    pub mode: NormalizerMode,

    /// Program run in `command` mode.
    pub program: String,

    /// Arguments passed to `program`.
    pub args: Vec<String>,

    /// Upper bound on the external program's run time.
    pub timeout_ms: u64,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            mode: NormalizerMode::Lines,
            program: "sed".to_string(),
            args: vec!["/^ *$/d".to_string()],
            timeout_ms: 5_000,
        }
    }
}

impl From<&NormalizerSettings> for Normalizer {
    fn from(settings: &NormalizerSettings) -> Self {
        match settings.mode {
            NormalizerMode::Lines => Normalizer::Lines,
            NormalizerMode::Command => Normalizer::Command(CommandNormalizer {
                program: settings.program.clone(),
                args: settings.args.clone(),
                timeout: Duration::from_millis(settings.timeout_ms),
            }),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level for this crate's events (trace, debug, info, warn, error).
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
