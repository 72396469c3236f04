//! Byte-at-a-time access to the serial channel
//!
//! The serial session is opened with a short read timeout. A byte read keeps
//! retrying on timeout and checks the cancellation token between attempts,
//! so a silent device never keeps the engine from noticing an interrupt.

use std::io::{self, Read, Write};

use i2cprog_common::protocol::{ECHO_LENGTH, Echo};

use crate::cancel::CancelToken;

/// Byte-level view of a channel
pub(crate) struct ByteLink<'a, C> {
    channel: &'a mut C,
}

impl<'a, C: Read + Write> ByteLink<'a, C> {
    pub(crate) fn new(channel: &'a mut C) -> Self {
        Self { channel }
    }

    pub(crate) fn channel_mut(&mut self) -> &mut C {
        self.channel
    }

    /// Read one byte, waiting as long as it takes
    ///
    /// Returns `Ok(None)` if cancellation is observed while no byte has
    /// arrived yet.
    pub(crate) fn read_byte(&mut self, cancel: &CancelToken) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.channel.read(&mut buf) {
                Ok(1) => return Ok(Some(buf[0])),
                Ok(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "device closed the connection",
                    ));
                }
                Err(e) if is_idle(&e) => {
                    if cancel.is_cancelled() {
                        return Ok(None);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Read the two-byte echo for a written byte
    pub(crate) fn read_echo(&mut self, cancel: &CancelToken) -> io::Result<Option<Echo>> {
        let mut bytes = [0u8; ECHO_LENGTH];
        for slot in bytes.iter_mut() {
            match self.read_byte(cancel)? {
                Some(byte) => *slot = byte,
                None => return Ok(None),
            }
        }
        Ok(Some(Echo::from_bytes(bytes)))
    }

    /// Send one byte and push it out of any host-side buffer
    pub(crate) fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.channel.write_all(&[byte])?;
        self.channel.flush()
    }
}

/// Errors that only mean "nothing arrived yet"
fn is_idle(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}
