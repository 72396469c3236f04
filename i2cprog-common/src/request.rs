//! Validated transfer request

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{DeviceType, MAX_BYTE_COUNT, OutputFormat};

/// Transfer direction, seen from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// EEPROM to local file
    Read,
    /// Local file to EEPROM
    Write,
}

impl Direction {
    /// Whether the write flag is set in the control byte
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write)
    }
}

/// Reasons a transfer request is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("byte count must be greater than zero")]
    ZeroByteCount,
    #[error("byte count {0} exceeds the 48-bit frame limit")]
    ByteCountTooLarge(u64),
    #[error("device type {device_type} addresses at most {max} bytes, {requested} requested")]
    ExceedsDeviceCapacity {
        device_type: DeviceType,
        max: u64,
        requested: u64,
    },
    #[error("file path is empty")]
    EmptyPath,
}

/// Everything the engine needs to run one transfer
///
/// Only constructed through [`TransferRequest::new`], so every instance
/// satisfies the byte count and device capacity invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    direction: Direction,
    byte_count: u64,
    device_type: DeviceType,
    format: OutputFormat,
    print_enabled: bool,
    file_path: PathBuf,
}

impl TransferRequest {
    /// Build a request, checking its invariants
    ///
    /// # Errors
    ///
    /// Returns a `RequestError` if the byte count is zero, does not fit in
    /// 48 bits, exceeds the device type's capacity, or the path is empty.
    pub fn new(
        direction: Direction,
        byte_count: u64,
        device_type: DeviceType,
        format: OutputFormat,
        print_enabled: bool,
        file_path: impl Into<PathBuf>,
    ) -> Result<Self, RequestError> {
        let file_path = file_path.into();

        if byte_count == 0 {
            return Err(RequestError::ZeroByteCount);
        }
        if byte_count > MAX_BYTE_COUNT {
            return Err(RequestError::ByteCountTooLarge(byte_count));
        }
        if let Some(max) = device_type.max_capacity()
            && byte_count > max
        {
            return Err(RequestError::ExceedsDeviceCapacity {
                device_type,
                max,
                requested: byte_count,
            });
        }
        if file_path.as_os_str().is_empty() {
            return Err(RequestError::EmptyPath);
        }

        Ok(Self {
            direction,
            byte_count,
            device_type,
            format,
            print_enabled,
            file_path,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn print_enabled(&self) -> bool {
        self.print_enabled
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
