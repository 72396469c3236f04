//! Frame writer for sending the control frame to a channel

use std::io::{self, Write};

use super::error::FrameError;
use super::frame::ControlFrame;
use super::FRAME_LENGTH;

/// Writes control frames to a blocking writer
pub struct FrameWriter<W> {
    writer: W,
}

impl<W> FrameWriter<W> {
    /// Create a new frame writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the frame writer and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameWriter<W> {
    /// Write a control frame in a single write call, then flush
    ///
    /// The frame is never split across writes: if the channel accepts fewer
    /// than [`FRAME_LENGTH`] bytes the frame is considered lost.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::ShortWrite` on a partial write and
    /// `FrameError::Io` if the channel fails.
    pub fn write_frame(&mut self, frame: &ControlFrame) -> Result<(), FrameError> {
        let bytes = frame.to_bytes();
        let written = loop {
            match self.writer.write(&bytes) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(FrameError::Io(e)),
            }
        };
        if written != FRAME_LENGTH {
            return Err(FrameError::ShortWrite { written });
        }
        self.writer.flush()?;
        Ok(())
    }
}
