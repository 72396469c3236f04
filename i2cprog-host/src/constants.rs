//! Host constants and user-facing messages

use std::time::Duration;

// =============================================================================
// Timing
// =============================================================================

/// Serial read timeout; a pending read notices cancellation within this time
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Delay after opening the port while the board resets
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// `--settle-ms` default, matching [`DEFAULT_SETTLE_DELAY`]
pub const DEFAULT_SETTLE_MS: u64 = 3000;

// =============================================================================
// Exit codes
// =============================================================================

/// Exit code for a fatal error
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for a transfer stopped by the operator (128 + SIGINT)
pub const EXIT_CANCELLED: u8 = 130;

// =============================================================================
// Messages
// =============================================================================

pub const MSG_BANNER: &str = "i2cprog v";
pub const MSG_DEFAULT_BAUD: &str = "No baud rate given, defaulting to ";
pub const MSG_DEFAULT_OUTPUT: &str = "No output file given, defaulting to ";
pub const MSG_DEFAULT_FORMAT: &str = "No output format given, defaulting to h = hexadecimal";
pub const MSG_DEFAULT_PRINT: &str = "No print option given, defaulting to yes";
pub const MSG_OPENED: &str = " opened";
pub const MSG_STARTING_READ: &str = "Starting to read";
pub const MSG_STARTING_WRITE: &str = "Starting to write";
pub const MSG_INTERRUPTED: &str = "Interrupted by CTRL^C";
pub const MSG_READ_COMPLETE: &str = "Read complete: ";
pub const MSG_WRITE_COMPLETE: &str = "Write complete: ";
pub const MSG_REMOVING_PARTIAL: &str = "Removing incomplete output file ";
pub const MSG_KEEPING_PARTIAL: &str = "Keeping partial output file ";

pub const ERR_INVALID_ARGUMENTS: &str = "Invalid arguments: ";
pub const ERR_OPEN_SERIAL: &str = "Error opening ";
pub const ERR_INTERRUPT_HANDLER: &str = "Failed to install interrupt handler: ";
pub const ERR_REMOVE_PARTIAL: &str = "Unable to delete ";
pub const ERR_RELEASE_SERIAL: &str = "Error while releasing ";
pub const ERR_TRANSFER_FAILED: &str = "Transfer failed: ";
pub const ERR_DIGEST: &str = "Could not compute image digest: ";
