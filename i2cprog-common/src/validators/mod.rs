//! Input validation functions
//!
//! Validators for operator-supplied values. Each returns a typed error so the
//! command line layer can report exactly what was wrong.

mod baud_rate;
mod byte_count;
mod device_type;
mod format;
mod print_option;

pub use baud_rate::{BaudRateError, SUPPORTED_BAUD_RATES, validate_baud_rate};
pub use byte_count::{ByteCountError, KIBIBYTE, parse_byte_count};
pub use device_type::{DeviceTypeError, parse_device_type};
pub use format::{FormatError, validate_format};
pub use print_option::{PrintOptionError, parse_print_option};
