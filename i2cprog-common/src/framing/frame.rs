//! The control frame type

use crate::{DeviceType, Direction, MAX_BYTE_COUNT};

use super::error::FrameError;
use super::{COUNT_FIELD_LENGTH, DEVICE_TYPE_MASK, FRAME_LENGTH, WRITE_FLAG};

/// Control frame announcing a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFrame {
    byte_count: u64,
    device_type: DeviceType,
    direction: Direction,
}

impl ControlFrame {
    /// Create a control frame
    ///
    /// # Errors
    ///
    /// Returns `FrameError::ZeroByteCount` or `FrameError::ByteCountTooLarge`
    /// if the count cannot be carried by the 48-bit field. Counts are never
    /// truncated.
    pub fn new(
        byte_count: u64,
        device_type: DeviceType,
        direction: Direction,
    ) -> Result<Self, FrameError> {
        if byte_count == 0 {
            return Err(FrameError::ZeroByteCount);
        }
        if byte_count > MAX_BYTE_COUNT {
            return Err(FrameError::ByteCountTooLarge(byte_count));
        }
        Ok(Self {
            byte_count,
            device_type,
            direction,
        })
    }

    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The control byte: device type code with the write flag in bit 7
    #[must_use]
    pub fn control_byte(&self) -> u8 {
        let write_flag = if self.direction.is_write() {
            WRITE_FLAG
        } else {
            0
        };
        self.device_type.code() | write_flag
    }

    /// Encode to wire format
    #[must_use]
    pub fn to_bytes(&self) -> [u8; FRAME_LENGTH] {
        let mut bytes = [0u8; FRAME_LENGTH];
        bytes[..COUNT_FIELD_LENGTH]
            .copy_from_slice(&self.byte_count.to_le_bytes()[..COUNT_FIELD_LENGTH]);
        bytes[COUNT_FIELD_LENGTH] = self.control_byte();
        bytes
    }

    /// Decode from wire format (the device side of the link)
    ///
    /// # Errors
    ///
    /// Returns an error if the count is zero or the device type code is unknown.
    pub fn from_bytes(bytes: &[u8; FRAME_LENGTH]) -> Result<Self, FrameError> {
        let mut count = [0u8; 8];
        count[..COUNT_FIELD_LENGTH].copy_from_slice(&bytes[..COUNT_FIELD_LENGTH]);
        let byte_count = u64::from_le_bytes(count);

        let control = bytes[COUNT_FIELD_LENGTH];
        let code = control & DEVICE_TYPE_MASK;
        let device_type = DeviceType::from_code(code).ok_or(FrameError::UnknownDeviceType(code))?;
        let direction = if control & WRITE_FLAG != 0 {
            Direction::Write
        } else {
            Direction::Read
        };

        Self::new(byte_count, device_type, direction)
    }
}
