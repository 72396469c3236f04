//! i2cprog Common Library
//!
//! Wire protocol, shared types, and validation for the i2cprog EEPROM
//! programmer. Everything here is free of serial-port and console concerns so
//! it can be shared by the host tool and by simulated devices in tests.

mod device;
mod format;
pub mod framing;
pub mod hash;
pub mod protocol;
mod request;
pub mod validators;

pub use device::{DeviceType, device_catalog};
pub use format::OutputFormat;
pub use request::{Direction, RequestError, TransferRequest};

/// Default baud rate of the programmer sketch
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Output file used for reads when none is given
pub const DEFAULT_OUTPUT_FILE: &str = "eeprom.bin";

/// Largest byte count the control frame can carry (48 bits)
pub const MAX_BYTE_COUNT: u64 = (1 << 48) - 1;

/// Capacity limit for restricted-capacity (type 1) addressing
pub const MAX_TYPE1_BYTES: u64 = 2048;

/// Buffer size for SHA-256 hashing operations
pub const HASH_BUFFER_SIZE: usize = 64 * 1024;
