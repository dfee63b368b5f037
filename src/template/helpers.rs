//! Hostname and naming helpers used by proxy templates.
//!
//! # Responsibilities
//! - Synthesize anchored host-matching regexes for proxy ACLs
//! - Classify hostnames (wildcard, user-supplied regex)
//! - Derive stable backend names from endpoint identifiers
//!
//! # Design Decisions
//! - Plain `&str` in, owned value out; no state, no I/O
//! - Type checks on template values happen in filters.rs, not here

use sha2::{Digest, Sha256};

/// Optional `:<port>` suffix appended to every synthesized host regex.
const PORT_SUFFIX: &str = "(:[0-9]+)?";

/// Capture group substituted for every `*` wildcard label.
const WILDCARD_LABEL: &str = r"([^\.]+)";

/// Number of digest bytes kept in a backend hash (16 hex characters).
const BACKEND_HASH_BYTES: usize = 8;

/// Stable, deterministic name fragment for a backend endpoint.
pub fn backend_hash(identifier: &str) -> String {
    let digest = Sha256::digest(identifier.as_bytes());
    hex::encode(&digest[..BACKEND_HASH_BYTES])
}

/// Anchored regex for a hostname, expanding each `*` to one label.
///
/// `*.example.com` becomes `^([^\.]+)\.example\.com(:[0-9]+)?$`.
pub fn hostname_regex(hostname: &str) -> String {
    let pattern = escape_dots(hostname).replace('*', WILDCARD_LABEL);
    format!("^{}{}$", pattern, PORT_SUFFIX)
}

/// Anchored regex for a hostname alias. No wildcard expansion.
pub fn alias_regex(hostname: &str) -> String {
    format!("^{}{}$", escape_dots(hostname), PORT_SUFFIX)
}

/// True if the leftmost label is the `*` wildcard.
pub fn is_wildcard_hostname(identifier: &str) -> bool {
    identifier.starts_with("*.")
}

/// True unless the identifier is a non-empty plain hostname (`[a-zA-Z0-9-.]+`).
pub fn is_regex_hostname(identifier: &str) -> bool {
    identifier.is_empty() || !identifier.chars().all(is_hostname_char)
}

fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.'
}

fn escape_dots(hostname: &str) -> String {
    hostname.replace('.', r"\.")
}
