//! Control frame encoding and transmission
//!
//! Every session starts with a single 7-byte control frame:
//!
//! ```text
//! | count[0] | count[1] | count[2] | count[3] | count[4] | count[5] | control |
//! ```
//!
//! The first six bytes carry the byte count, little-endian. The control byte
//! holds the device type code in its low bits and the write flag in bit 7.
//! After the frame the link carries raw bytes only (see [`crate::protocol`]).

mod error;
mod frame;
mod writer;

pub use error::FrameError;
pub use frame::ControlFrame;
pub use writer::FrameWriter;

/// Total control frame length in bytes
pub const FRAME_LENGTH: usize = 7;

/// Width of the little-endian byte count field
pub const COUNT_FIELD_LENGTH: usize = 6;

/// Bit in the control byte selecting write mode
pub const WRITE_FLAG: u8 = 0x80;

/// Mask for the device type code in the control byte
pub const DEVICE_TYPE_MASK: u8 = 0x7f;
