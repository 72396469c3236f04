//! Byte count validation
//!
//! Accepts a plain number of bytes or a number of KiB with a `k`/`K` suffix
//! (`512`, `2k`, `128K`).

use thiserror::Error;

use crate::MAX_BYTE_COUNT;

/// Multiplier for the `k` suffix
pub const KIBIBYTE: u64 = 1024;

/// Validation error for byte counts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ByteCountError {
    /// Empty input
    #[error("byte count is empty")]
    Empty,
    /// Not a number (after removing the suffix)
    #[error("byte count '{0}' is not a number")]
    NotANumber(String),
    /// Zero bytes
    #[error("byte count must be greater than zero")]
    Zero,
    /// Does not fit in the control frame
    #[error("byte count '{0}' exceeds the 48-bit frame limit")]
    TooLarge(String),
}

/// Parse a byte count with optional `k`/`K` suffix
///
/// # Errors
///
/// Returns a `ByteCountError` for empty, non-numeric, zero, or oversized input.
pub fn parse_byte_count(input: &str) -> Result<u64, ByteCountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ByteCountError::Empty);
    }

    let (digits, multiplier) = match trimmed.strip_suffix(['k', 'K']) {
        Some(rest) => (rest, KIBIBYTE),
        None => (trimmed, 1),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ByteCountError::NotANumber(trimmed.to_string()));
    }

    let value: u64 = digits
        .parse()
        .map_err(|_| ByteCountError::TooLarge(trimmed.to_string()))?;
    let count = value
        .checked_mul(multiplier)
        .ok_or_else(|| ByteCountError::TooLarge(trimmed.to_string()))?;

    if count == 0 {
        return Err(ByteCountError::Zero);
    }
    if count > MAX_BYTE_COUNT {
        return Err(ByteCountError::TooLarge(trimmed.to_string()));
    }

    Ok(count)
}
