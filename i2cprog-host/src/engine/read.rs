//! EEPROM to file loop

use std::io::{Read, Write};

use tracing::debug;

use crate::error::TransferError;

use super::TransferEngine;

impl<C: Read + Write, W: Write> TransferEngine<'_, C, W> {
    /// Receive bytes until the request's count is reached or the token is set
    ///
    /// The sink is flushed on success and on cancellation, so a cancelled
    /// read leaves exactly the bytes received so far.
    pub(super) fn read_loop<S: Write>(&mut self, sink: &mut S) -> Result<(), TransferError> {
        let total = self.request.byte_count();

        while self.state.offset() < total {
            if self.observe_cancel() {
                debug!("Read cancelled at offset {}", self.state.offset());
                break;
            }

            let offset = self.state.offset();
            let byte = match self.link.read_byte(&self.cancel) {
                Ok(Some(byte)) => byte,
                Ok(None) => {
                    self.state.mark_cancelled();
                    debug!("Read cancelled while waiting for offset {}", offset);
                    break;
                }
                Err(source) => return Err(TransferError::Session { offset, source }),
            };

            sink.write_all(&[byte])
                .map_err(|source| TransferError::OutputWrite { offset, source })?;

            self.reporter.record(offset, byte);
            self.state.advance();
        }

        let offset = self.state.offset();
        sink.flush()
            .map_err(|source| TransferError::OutputWrite { offset, source })
    }
}
