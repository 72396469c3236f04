//! Control frame errors

use std::io;

use thiserror::Error;

use super::FRAME_LENGTH;

/// Errors building, decoding, or sending a control frame
#[derive(Debug, Error)]
pub enum FrameError {
    /// Byte count does not fit in the 48-bit count field
    #[error("byte count {0} does not fit in the 48-bit count field")]
    ByteCountTooLarge(u64),

    /// Byte count of zero
    #[error("byte count must be greater than zero")]
    ZeroByteCount,

    /// Control byte carries an unknown device type code
    #[error("unknown device type code {0}")]
    UnknownDeviceType(u8),

    /// The channel accepted only part of the frame
    #[error("control frame truncated: sent {written} of {} bytes", FRAME_LENGTH)]
    ShortWrite { written: usize },

    /// I/O error while sending the frame
    #[error("failed to send control frame: {0}")]
    Io(#[from] io::Error),
}
