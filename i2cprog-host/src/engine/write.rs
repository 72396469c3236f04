//! File to EEPROM loop with echo verification

use std::io::{Read, Write};

use i2cprog_common::protocol::verify_echo;
use tracing::debug;

use crate::error::TransferError;

use super::TransferEngine;

impl<C: Read + Write, W: Write> TransferEngine<'_, C, W> {
    /// Send source bytes one at a time, verifying each echo before the next
    pub(super) fn write_loop<S: Read>(&mut self, source: &mut S) -> Result<(), TransferError> {
        let total = self.request.byte_count();
        let mut buf = [0u8; 1];

        while self.state.offset() < total {
            if self.observe_cancel() {
                debug!("Write cancelled at offset {}", self.state.offset());
                return Ok(());
            }

            let offset = self.state.offset();
            source
                .read_exact(&mut buf)
                .map_err(|source| TransferError::SourceRead { offset, source })?;
            let sent = buf[0];

            self.link
                .write_byte(sent)
                .map_err(|source| TransferError::Session { offset, source })?;

            let echo = match self.link.read_echo(&self.cancel) {
                Ok(Some(echo)) => echo,
                Ok(None) => {
                    // Byte is on the wire but unverified; it does not count
                    self.state.mark_cancelled();
                    debug!("Write cancelled while waiting for echo at offset {}", offset);
                    return Ok(());
                }
                Err(source) => return Err(TransferError::Session { offset, source }),
            };

            verify_echo(offset, sent, echo)?;

            self.reporter.record(offset, sent);
            self.state.advance();
        }

        Ok(())
    }
}
