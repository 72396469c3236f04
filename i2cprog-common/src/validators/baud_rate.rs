//! Baud rate validation

use thiserror::Error;

/// Standard rates the programmer can be configured for
pub const SUPPORTED_BAUD_RATES: &[u32] = &[
    50, 75, 110, 134, 150, 200, 300, 600, 1200, 1800, 2400, 4800, 9600, 19200, 38400, 57600,
    115_200, 230_400,
];

/// Validation error for baud rates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaudRateError {
    /// Not one of the standard rates
    #[error("unsupported baud rate {0}")]
    Unsupported(u32),
}

/// Validate a baud rate
///
/// # Errors
///
/// Returns `BaudRateError::Unsupported` unless the rate is listed in
/// [`SUPPORTED_BAUD_RATES`].
pub fn validate_baud_rate(rate: u32) -> Result<(), BaudRateError> {
    if SUPPORTED_BAUD_RATES.contains(&rate) {
        Ok(())
    } else {
        Err(BaudRateError::Unsupported(rate))
    }
}
