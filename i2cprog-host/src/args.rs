//! Command-line argument parsing

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use i2cprog_common::validators::{
    parse_byte_count, parse_device_type, parse_print_option, validate_baud_rate, validate_format,
};
use i2cprog_common::{
    DEFAULT_BAUD_RATE, DEFAULT_OUTPUT_FILE, DeviceType, Direction, OutputFormat, RequestError,
    TransferRequest,
};
use thiserror::Error;

use i2cprog_host::SessionConfig;
use i2cprog_host::constants::{
    DEFAULT_SETTLE_MS, MSG_DEFAULT_BAUD, MSG_DEFAULT_FORMAT, MSG_DEFAULT_OUTPUT, MSG_DEFAULT_PRINT,
};

/// Read or write an I2C EEPROM through a serial programmer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
    i2cprog -t /dev/ttyACM0 -n 2k\n  \
    i2cprog -t /dev/ttyACM0 -n 512 -o dump.bin\n  \
    i2cprog -t /dev/ttyACM0 -n 2k -d 1 -i image.bin -p n")]
pub struct Args {
    /// Serial device the programmer is connected to (e.g. /dev/ttyACM0)
    #[arg(short, long, required_unless_present = "list_devices")]
    pub tty: Option<PathBuf>,

    /// Baud rate of the serial device (default: 115200)
    #[arg(short, long, value_parser = parse_baud_rate)]
    pub baudrate: Option<u32>,

    /// Number of bytes, or KiB with a k suffix (e.g. 512, 2k, 128K)
    #[arg(
        short = 'n',
        long = "num-bytes",
        value_parser = parse_byte_count,
        required_unless_present = "list_devices"
    )]
    pub num_bytes: Option<u64>,

    /// EEPROM addressing type, see --list-devices
    #[arg(short = 'd', long = "dev-type", value_parser = parse_device_type, default_value = "0")]
    pub dev_type: DeviceType,

    /// Read the EEPROM into FILE (default: eeprom.bin)
    #[arg(short, long = "output-file", value_name = "FILE", conflicts_with = "input_file")]
    pub output_file: Option<PathBuf>,

    /// Write FILE into the EEPROM
    #[arg(short, long = "input-file", value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Per-byte output format: a = ascii, d = decimal, h = hex (default: h)
    #[arg(short, long, value_parser = validate_format)]
    pub format: Option<OutputFormat>,

    /// Print every byte (y/n); with n a progress percentage is shown instead (default: y)
    #[arg(short, long, value_parser = parse_print_option)]
    pub print: Option<bool>,

    /// Milliseconds to wait after opening the port while the board resets
    #[arg(long, default_value_t = DEFAULT_SETTLE_MS)]
    pub settle_ms: u64,

    /// List supported addressing types and parts, then exit
    #[arg(long, default_value = "false")]
    pub list_devices: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

fn parse_baud_rate(input: &str) -> Result<u32, String> {
    let rate: u32 = input
        .parse()
        .map_err(|_| format!("'{}' is not a number", input))?;
    validate_baud_rate(rate).map_err(|e| e.to_string())?;
    Ok(rate)
}

/// Errors turning arguments into a transfer plan
#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("no serial device given (--tty)")]
    MissingTty,
    #[error("no byte count given (--num-bytes)")]
    MissingByteCount,
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Everything needed to run, derived from the arguments
#[derive(Debug)]
pub struct Plan {
    pub request: TransferRequest,
    pub session: SessionConfig,
    /// Defaults that were applied, announced before the transfer starts
    pub notices: Vec<String>,
}

impl Args {
    /// Resolve defaults and validate the transfer request
    ///
    /// # Errors
    ///
    /// Returns an `ArgsError` if a required value is missing or the request
    /// breaks an invariant (e.g. too many bytes for a type 1 device).
    pub fn plan(&self) -> Result<Plan, ArgsError> {
        let tty = self.tty.clone().ok_or(ArgsError::MissingTty)?;
        let byte_count = self.num_bytes.ok_or(ArgsError::MissingByteCount)?;
        let mut notices = Vec::new();

        let baud_rate = self.baudrate.unwrap_or_else(|| {
            notices.push(format!("{}{}", MSG_DEFAULT_BAUD, DEFAULT_BAUD_RATE));
            DEFAULT_BAUD_RATE
        });

        let (direction, file_path) = match (&self.input_file, &self.output_file) {
            (Some(input), _) => (Direction::Write, input.clone()),
            (None, Some(output)) => (Direction::Read, output.clone()),
            (None, None) => {
                notices.push(format!("{}\"{}\"", MSG_DEFAULT_OUTPUT, DEFAULT_OUTPUT_FILE));
                (Direction::Read, PathBuf::from(DEFAULT_OUTPUT_FILE))
            }
        };

        let format = self.format.unwrap_or_else(|| {
            notices.push(MSG_DEFAULT_FORMAT.to_string());
            OutputFormat::Hex
        });

        let print_enabled = self.print.unwrap_or_else(|| {
            notices.push(MSG_DEFAULT_PRINT.to_string());
            true
        });

        let request = TransferRequest::new(
            direction,
            byte_count,
            self.dev_type,
            format,
            print_enabled,
            file_path,
        )?;

        let mut session = SessionConfig::new(tty, baud_rate);
        session.settle = Duration::from_millis(self.settle_ms);

        Ok(Plan {
            request,
            session,
            notices,
        })
    }
}
