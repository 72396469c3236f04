//! Output format validation

use thiserror::Error;

use crate::OutputFormat;

/// Validation error for output format codes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Code other than `a`, `d` or `h`
    #[error("invalid output format '{0}', expected a, d or h")]
    Invalid(String),
}

/// Validate an output format code from the command line
///
/// Unlike [`OutputFormat::from_code`], unknown codes are rejected here so the
/// operator learns about a typo before the transfer starts.
///
/// # Errors
///
/// Returns `FormatError::Invalid` for anything but `a`, `d` or `h`.
pub fn validate_format(input: &str) -> Result<OutputFormat, FormatError> {
    match input {
        "a" => Ok(OutputFormat::Ascii),
        "d" => Ok(OutputFormat::Decimal),
        "h" => Ok(OutputFormat::Hex),
        other => Err(FormatError::Invalid(other.to_string())),
    }
}
