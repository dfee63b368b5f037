//! Blank-line normalization of rendered output.
//!
//! # Responsibilities
//! - Drop every empty or whitespace-only line
//! - Keep the remaining lines in order, each terminated by `\n`
//! - Optionally delegate to an external filter program, bounded by a timeout
//!
//! # Design Decisions
//! - In-process line filter is the default; no process spawn on the hot path
//! - A failed normalization never yields a partial artifact
//! - The external child is killed when the timeout fires (`kill_on_drop`)

use std::io;
use std::process::{ExitStatus, Stdio};
use std::str::Utf8Error;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Errors from the normalization step.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Rendered output is not valid UTF-8.
    #[error("rendered output is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),

    /// The external filter could not be started.
    #[error("cannot start normalizer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Piping data to or from the external filter failed.
    #[error("normalizer I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The external filter exited unsuccessfully.
    #[error("normalizer '{program}' exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The external filter did not finish in time.
    #[error("normalizer '{program}' timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

/// Strategy used to clean up raw template output.
#[derive(Debug, Clone, Default)]
pub enum Normalizer {
    /// In-process blank-line filter.
    #[default]
    Lines,
    /// Pipe through an external program (e.g. `sed '/^ *$/d'`).
    Command(CommandNormalizer),
}

/// An external filter program fed on stdin, read from stdout.
#[derive(Debug, Clone)]
pub struct CommandNormalizer {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Normalizer {
    /// Normalize `raw` into `out`. `out` is left empty on failure.
    pub async fn normalize_into(&self, raw: &[u8], out: &mut Vec<u8>) -> Result<(), NormalizeError> {
        let result = match self {
            Normalizer::Lines => strip_blank_lines(raw, out),
            Normalizer::Command(cmd) => cmd.run(raw, out).await,
        };
        if result.is_err() {
            out.clear();
        }
        result
    }
}

/// Remove blank and whitespace-only lines from `raw`.
///
/// `"a\n\nb\n   \nc\n"` becomes `"a\nb\nc\n"`.
pub fn normalize(raw: &[u8]) -> Result<Vec<u8>, NormalizeError> {
    let mut out = Vec::with_capacity(raw.len());
    strip_blank_lines(raw, &mut out)?;
    Ok(out)
}

fn strip_blank_lines(raw: &[u8], out: &mut Vec<u8>) -> Result<(), NormalizeError> {
    let text = std::str::from_utf8(raw)?;
    for line in text.split('\n').filter(|line| !line.trim().is_empty()) {
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
    }
    Ok(())
}

impl CommandNormalizer {
    async fn run(&self, raw: &[u8], out: &mut Vec<u8>) -> Result<(), NormalizeError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| NormalizeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "normalizer stdin unavailable"))?;

        // Feed stdin while draining stdout so a large artifact cannot fill both pipes.
        let feed = async move {
            stdin.write_all(raw).await?;
            stdin.shutdown().await
        };
        let exchange = async move {
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            fed?;
            output
        };

        let output = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| NormalizeError::Timeout {
                program: self.program.clone(),
                timeout: self.timeout,
            })??;

        if !output.status.success() {
            return Err(NormalizeError::Exit {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        out.extend_from_slice(&output.stdout);
        Ok(())
    }
}
