//! i2cprog Host Library
//!
//! Transfer engine, serial session, and console reporting for the i2cprog
//! host tool. Exposed as a library for integration testing against simulated
//! devices.

pub mod cancel;
pub mod constants;
pub mod engine;
pub mod error;
pub mod logging;
pub mod progress;
pub mod session;

pub use cancel::{CancelToken, install_interrupt_handler};
pub use engine::{PreparedTransfer, TransferEngine, TransferOutcome, TransferState, TransferStatus};
pub use error::TransferError;
pub use session::{SerialSession, SessionConfig};
