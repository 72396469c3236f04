//! EEPROM addressing types and the part catalog
//!
//! The operator picks the addressing type from the part's datasheet. The
//! programmer firmware needs it to build the I2C device/word address for each
//! byte; the host only forwards it in the control frame.

use std::fmt;

use strum::{EnumIter, IntoEnumIterator};

use crate::MAX_TYPE1_BYTES;

/// Addressing scheme of the target EEPROM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum DeviceType {
    /// Two-byte word address, no block bits in the device address
    #[default]
    Default,
    /// One-byte word address with block-select bits in the device address
    Type1,
    /// Two-byte word address with the A16 block bit in the device address
    Type2,
}

impl DeviceType {
    /// Wire code carried in the low bits of the control byte
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Type1 => 1,
            Self::Type2 => 2,
        }
    }

    /// Parse a wire code
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Default),
            1 => Some(Self::Type1),
            2 => Some(Self::Type2),
            _ => None,
        }
    }

    /// Largest number of bytes addressable with this scheme, if limited
    #[must_use]
    pub fn max_capacity(&self) -> Option<u64> {
        match self {
            Self::Type1 => Some(MAX_TYPE1_BYTES),
            Self::Default | Self::Type2 => None,
        }
    }

    /// Device address bit layout as printed in datasheets
    #[must_use]
    pub fn addressing(&self) -> &'static str {
        match self {
            Self::Default => "1 | 0 | 1 | 0 | A2 | A1 | A0       (16-bit word address)",
            Self::Type1 => "1 | 0 | 1 | 0 | A2/B2 | A1/B1 | B0 (8-bit word address)",
            Self::Type2 => "1 | 0 | 1 | 0 | A2 | A1 | B0/A16   (16-bit word address)",
        }
    }

    /// Representative parts using this addressing scheme
    #[must_use]
    pub fn parts(&self) -> &'static [&'static str] {
        match self {
            Self::Default => &["24LC32", "24LC64", "24LC128", "24LC256", "24LC512", "AT24C256"],
            Self::Type1 => &["24C01", "24C02", "24C04", "24C08", "24C16", "AT24C02"],
            Self::Type2 => &["24XX1026", "CAT24M01", "AT24CM01", "M24M01"],
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Render the part catalog shown by `--list-devices`
#[must_use]
pub fn device_catalog() -> String {
    let mut out = String::from(
        "Read the datasheet of the EEPROM and pick the matching addressing type.\n",
    );
    for device_type in DeviceType::iter() {
        out.push('\n');
        out.push_str(&format!("{}  =>  -d {}\n", device_type.addressing(), device_type));
        if let Some(max) = device_type.max_capacity() {
            out.push_str(&format!("    Capacity: up to {} bytes\n", max));
        }
        out.push_str("    Devices:\n");
        for part in device_type.parts() {
            out.push_str(&format!("        {}\n", part));
        }
    }
    out
}
