//! Serial session to the programmer
//!
//! Owns the open serial port for the duration of a run. The port is opened in
//! raw 8N1 mode with a short read timeout so that blocking byte reads can be
//! interleaved with cancellation checks (see `engine::link`). The port is
//! released on every exit path: explicitly through [`SerialSession::close`],
//! or by `Drop` if the session goes out of scope first.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_DELAY};

/// Serial port configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Device path, e.g. `/dev/ttyACM0`
    pub path: PathBuf,
    /// Line speed
    pub baud_rate: u32,
    /// Read timeout; bounds how long a pending read ignores cancellation
    pub poll_interval: Duration,
    /// Pause after opening, while the board resets
    pub settle: Duration,
}

impl SessionConfig {
    pub fn new(path: impl Into<PathBuf>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
            poll_interval: DEFAULT_POLL_INTERVAL,
            settle: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// An open, configured serial port
pub struct SerialSession {
    port: Option<Box<dyn SerialPort>>,
    path: PathBuf,
}

impl SerialSession {
    /// Open and configure the port, then wait for the board to settle
    ///
    /// Opening the port toggles DTR, which resets most Arduino-style boards;
    /// bytes sent before the bootloader hands over are lost, hence the delay.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be opened or configured.
    pub fn open(config: &SessionConfig) -> Result<Self, serialport::Error> {
        let path = config.path.to_string_lossy();
        let port = serialport::new(path.as_ref(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.poll_interval)
            .open()?;

        debug!(
            "{} configured: {} baud, 8N1, poll {:?}",
            config.path.display(),
            config.baud_rate,
            config.poll_interval
        );

        if !config.settle.is_zero() {
            debug!("Waiting {:?} for the board to settle", config.settle);
            thread::sleep(config.settle);
        }

        let session = Self {
            port: Some(port),
            path: config.path.clone(),
        };
        // Anything the bootloader printed during reset is not ours
        session.clear_input();
        Ok(session)
    }

    /// Path of the serial device
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush pending output, drop unread input, and release the port
    ///
    /// # Errors
    ///
    /// Returns an error if pending output could not be flushed. The port is
    /// released either way.
    pub fn close(mut self) -> io::Result<()> {
        self.release()
    }

    fn clear_input(&self) {
        if let Some(port) = self.port.as_ref()
            && let Err(e) = port.clear(ClearBuffer::Input)
        {
            warn!("Failed to clear input on {}: {}", self.path.display(), e);
        }
    }

    fn release(&mut self) -> io::Result<()> {
        let Some(mut port) = self.port.take() else {
            return Ok(());
        };
        let flushed = port.flush();
        if let Err(e) = port.clear(ClearBuffer::Input) {
            debug!("Failed to clear input on {}: {}", self.path.display(), e);
        }
        drop(port);
        debug!("{} released", self.path.display());
        flushed
    }

    fn port_mut(&mut self) -> io::Result<&mut Box<dyn SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial session closed"))
    }
}

impl Read for SerialSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port_mut()?.read(buf)
    }
}

impl Write for SerialSession {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port_mut()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port_mut()?.flush()
    }
}

impl Drop for SerialSession {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("Failed to flush {} on release: {}", self.path.display(), e);
        }
    }
}
