//! Device type validation

use thiserror::Error;

use crate::DeviceType;

/// Validation error for device type codes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceTypeError {
    /// Not a number
    #[error("device type must be a number")]
    NotANumber,
    /// Number outside the known codes
    #[error("unknown device type {0}, expected 0, 1 or 2")]
    Unknown(u32),
}

/// Parse a device type code
///
/// # Errors
///
/// Returns a `DeviceTypeError` if the input is not one of the known codes.
pub fn parse_device_type(input: &str) -> Result<DeviceType, DeviceTypeError> {
    let code: u32 = input
        .trim()
        .parse()
        .map_err(|_| DeviceTypeError::NotANumber)?;
    u8::try_from(code)
        .ok()
        .and_then(DeviceType::from_code)
        .ok_or(DeviceTypeError::Unknown(code))
}
