//! Configuration objects read from disk for the CLI.
//!
//! Library callers pass any `Serialize` value to the renderer directly; the
//! binary needs a file format, so it accepts JSON or TOML chosen by extension.

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Read a configuration object. `.toml` files are parsed as TOML, anything
/// else as JSON.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: display.clone(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).map_err(|source| DocumentError::Toml { path: display, source })
    } else {
        serde_json::from_str(&content).map_err(|source| DocumentError::Json { path: display, source })
    }
}
