//! Print option validation

use thiserror::Error;

/// Validation error for the print option
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintOptionError {
    #[error("invalid print option '{0}', expected y/yes or n/no")]
    Invalid(String),
}

/// Parse a yes/no print option
///
/// # Errors
///
/// Returns `PrintOptionError::Invalid` for anything but y, yes, n or no
/// (case-insensitive).
pub fn parse_print_option(input: &str) -> Result<bool, PrintOptionError> {
    match input.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(PrintOptionError::Invalid(input.to_string())),
    }
}
