//! Byte stream protocol after the control frame
//!
//! Reads are a plain stream of `byte_count` bytes from the device. Writes are
//! strictly alternating: the host sends one byte, the device answers with two
//! echo bytes (low byte of the address it wrote, value it received). There is
//! no pipelining and no resynchronization: a bad echo ends the session.

use thiserror::Error;

/// Number of echo bytes the device sends for each written byte
pub const ECHO_LENGTH: usize = 2;

/// Device acknowledgement of one written byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Echo {
    /// Low byte of the address the device wrote
    pub address: u8,
    /// Value the device received
    pub value: u8,
}

impl Echo {
    /// Build an echo from its wire bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; ECHO_LENGTH]) -> Self {
        Self {
            address: bytes[0],
            value: bytes[1],
        }
    }

    /// The echo a correctly behaving device sends for `sent` at `offset`
    #[must_use]
    pub fn expected(offset: u64, sent: u8) -> Self {
        Self {
            address: address_low(offset),
            value: sent,
        }
    }

    /// Encode to wire format
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ECHO_LENGTH] {
        [self.address, self.value]
    }
}

/// Echo that does not match what was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "verification failed at offset 0x{offset:06x}: sent 0x{sent:02x}, device echoed 0x{value_echo:02x} at address 0x{address_echo:02x}"
)]
pub struct EchoMismatch {
    pub offset: u64,
    pub sent: u8,
    pub value_echo: u8,
    pub address_echo: u8,
}

/// Low byte of a transfer offset, as echoed by the device
#[must_use]
pub fn address_low(offset: u64) -> u8 {
    (offset & 0xff) as u8
}

/// Check the device's echo for the byte sent at `offset`
///
/// # Errors
///
/// Returns `EchoMismatch` unless the address echo equals `offset mod 256`
/// and the value echo equals `sent`.
pub fn verify_echo(offset: u64, sent: u8, echo: Echo) -> Result<(), EchoMismatch> {
    if echo.address == address_low(offset) && echo.value == sent {
        return Ok(());
    }
    Err(EchoMismatch {
        offset,
        sent,
        value_echo: echo.value,
        address_echo: echo.address,
    })
}
