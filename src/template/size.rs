//! Human-readable size expressions (`512`, `64k`, `10m`, `1G`).

use thiserror::Error;

/// Errors from parsing a size expression.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    /// The numeric part is not an integer.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// The trailing unit is not one of k, m, g.
    #[error("invalid suffix '{0}'")]
    InvalidSuffix(char),

    /// The byte count does not fit in an i64.
    #[error("size '{0}' overflows a 64-bit byte count")]
    Overflow(String),
}

/// Parse a size expression into a byte count.
///
/// Units are binary: `k` = 1024, `m` = 1024², `g` = 1024³ (case-insensitive).
/// An empty expression is zero bytes.
pub fn parse_size(size: &str) -> Result<i64, SizeError> {
    if size.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = size.parse::<i64>() {
        return Ok(value);
    }

    let mut chars = size.chars();
    let suffix = match chars.next_back() {
        Some(c) => c,
        None => return Ok(0),
    };
    let digits = chars.as_str();
    let value: i64 = digits
        .parse()
        .map_err(|_| SizeError::InvalidNumber(digits.to_string()))?;

    let multiplier: i64 = match suffix {
        'k' | 'K' => 1 << 10,
        'm' | 'M' => 1 << 20,
        'g' | 'G' => 1 << 30,
        other => return Err(SizeError::InvalidSuffix(other)),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| SizeError::Overflow(size.to_string()))
}
