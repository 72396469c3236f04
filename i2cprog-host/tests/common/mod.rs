//! Shared test utilities: a simulated programmer on the far end of the link

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use i2cprog_common::framing::{ControlFrame, FRAME_LENGTH};
use i2cprog_common::protocol::Echo;
use i2cprog_common::{Direction, TransferRequest};
use i2cprog_host::CancelToken;

/// Simulated programmer firmware
///
/// Decodes the control frame, then either streams `memory` (read) or stores
/// incoming bytes and answers each with an echo (write).
pub struct SimulatedDevice {
    memory: Vec<u8>,
    frame_bytes: Vec<u8>,
    frame: Option<ControlFrame>,
    /// Data bytes received after the frame, in order
    pub written: Vec<u8>,
    pending: VecDeque<u8>,
    served: u64,
    echoes_completed: u64,
    corrupt_value_at: Option<u64>,
    corrupt_address_at: Option<u64>,
    cancel_after: Option<(u64, CancelToken)>,
    watched: Option<CancelToken>,
    /// Channel calls made after the watched token was set
    pub calls_after_cancel: usize,
    /// Channel read calls, including idle polls
    pub read_calls: usize,
    idle_polls: usize,
    fail_reads_at: Option<u64>,
    fail_writes_at: Option<u64>,
    /// Accept at most this many bytes of the frame
    frame_write_limit: Option<usize>,
}

impl SimulatedDevice {
    pub fn new(memory: Vec<u8>) -> Self {
        Self {
            memory,
            frame_bytes: Vec::new(),
            frame: None,
            written: Vec::new(),
            pending: VecDeque::new(),
            served: 0,
            echoes_completed: 0,
            corrupt_value_at: None,
            corrupt_address_at: None,
            cancel_after: None,
            watched: None,
            calls_after_cancel: 0,
            read_calls: 0,
            idle_polls: 0,
            fail_reads_at: None,
            fail_writes_at: None,
            frame_write_limit: None,
        }
    }

    /// Device with no readable content, for writes
    pub fn blank() -> Self {
        Self::new(Vec::new())
    }

    /// Echo a wrong value for the byte at `offset`
    pub fn corrupt_value_at(mut self, offset: u64) -> Self {
        self.corrupt_value_at = Some(offset);
        self
    }

    /// Echo a wrong address for the byte at `offset`
    pub fn corrupt_address_at(mut self, offset: u64) -> Self {
        self.corrupt_address_at = Some(offset);
        self
    }

    /// Set `token` once `count` bytes have been completed
    ///
    /// For reads a byte is complete when delivered; for writes when its
    /// second echo byte has been read back.
    pub fn cancel_after(mut self, count: u64, token: CancelToken) -> Self {
        self.watched = Some(token.clone());
        self.cancel_after = Some((count, token));
        self
    }

    /// Report timeouts for the first `polls` reads before serving anything
    pub fn idle_polls(mut self, polls: usize) -> Self {
        self.idle_polls = polls;
        self
    }

    /// Fail with a hard I/O error when byte `offset` (read) or the echo for
    /// byte `offset` (write) is requested
    pub fn fail_reads_at(mut self, offset: u64) -> Self {
        self.fail_reads_at = Some(offset);
        self
    }

    /// Reject data byte `offset` with a hard I/O error
    pub fn fail_writes_at(mut self, offset: u64) -> Self {
        self.fail_writes_at = Some(offset);
        self
    }

    /// Accept only `limit` bytes of the control frame
    pub fn frame_write_limit(mut self, limit: usize) -> Self {
        self.frame_write_limit = Some(limit);
        self
    }

    /// Raw bytes received for the control frame
    pub fn frame_bytes(&self) -> &[u8] {
        &self.frame_bytes
    }

    pub fn frame(&self) -> Option<&ControlFrame> {
        self.frame.as_ref()
    }

    /// Bytes delivered to the host in read mode
    pub fn served(&self) -> u64 {
        self.served
    }

    fn note_call(&mut self) {
        if self.watched.as_ref().is_some_and(|t| t.is_cancelled()) {
            self.calls_after_cancel += 1;
        }
    }

    fn maybe_cancel(&mut self, completed: u64) {
        if let Some((count, token)) = &self.cancel_after
            && *count == completed
        {
            token.cancel();
        }
    }

    fn receive_data(&mut self, byte: u8) {
        let offset = self.written.len() as u64;
        self.written.push(byte);

        let mut echo = Echo::expected(offset, byte);
        if self.corrupt_value_at == Some(offset) {
            echo.value = byte ^ 0xff;
        }
        if self.corrupt_address_at == Some(offset) {
            echo.address = echo.address.wrapping_add(1);
        }
        self.pending.extend(echo.to_bytes());
    }
}

impl Read for SimulatedDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.note_call();
        self.read_calls += 1;

        if self.idle_polls > 0 {
            self.idle_polls -= 1;
            return Err(io::Error::from(io::ErrorKind::TimedOut));
        }

        let Some(frame) = self.frame else {
            return Err(io::Error::from(io::ErrorKind::TimedOut));
        };

        match frame.direction() {
            Direction::Read => {
                if self.fail_reads_at == Some(self.served) {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"));
                }
                let limit = frame.byte_count().min(self.memory.len() as u64);
                if self.served >= limit {
                    return Ok(0);
                }
                buf[0] = self.memory[self.served as usize];
                self.served += 1;
                let served = self.served;
                self.maybe_cancel(served);
                Ok(1)
            }
            Direction::Write if self.fail_reads_at == Some(self.echoes_completed) => Err(
                io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"),
            ),
            Direction::Write => match self.pending.pop_front() {
                Some(byte) => {
                    buf[0] = byte;
                    if self.pending.is_empty() {
                        self.echoes_completed += 1;
                        let completed = self.echoes_completed;
                        self.maybe_cancel(completed);
                    }
                    Ok(1)
                }
                None => Ok(0),
            },
        }
    }
}

impl Write for SimulatedDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.note_call();

        if self.frame.is_none() {
            let room = FRAME_LENGTH - self.frame_bytes.len();
            let limit = self.frame_write_limit.unwrap_or(room).min(room);
            let take = buf.len().min(limit);
            self.frame_bytes.extend_from_slice(&buf[..take]);
            if self.frame_bytes.len() == FRAME_LENGTH {
                let mut bytes = [0u8; FRAME_LENGTH];
                bytes.copy_from_slice(&self.frame_bytes);
                self.frame = Some(
                    ControlFrame::from_bytes(&bytes)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
                );
            }
            return Ok(take);
        }

        for &byte in buf {
            if self.fail_writes_at == Some(self.written.len() as u64) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"));
            }
            self.receive_data(byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Deterministic test image
pub fn test_image(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

/// Request with per-byte printing in hex
pub fn request(direction: Direction, count: u64, path: &std::path::Path) -> TransferRequest {
    TransferRequest::new(
        direction,
        count,
        i2cprog_common::DeviceType::Default,
        i2cprog_common::OutputFormat::Hex,
        true,
        path,
    )
    .expect("valid request")
}
