//! Transfer engine - streams an EEPROM image over the serial channel
//!
//! A transfer is prepared before the serial session is opened (so a missing
//! source file never costs a control frame), then executed against any
//! blocking `Read + Write` channel:
//!
//! 1. Send the control frame
//! 2. Read path: receive `byte_count` bytes into the output file
//! 3. Write path: send each source byte and verify the device's echo
//!
//! The cancellation token is checked at the top of every iteration, before
//! any I/O for that byte is issued.
//!
//! ## Module Structure
//!
//! - `link` - Byte reads that stay responsive to cancellation
//! - `read` - EEPROM to file loop
//! - `write` - File to EEPROM loop with echo verification

mod link;
mod read;
mod write;

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use i2cprog_common::framing::{ControlFrame, FrameWriter};
use i2cprog_common::{Direction, TransferRequest};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::TransferError;
use crate::progress::ProgressReporter;

use link::ByteLink;

// =============================================================================
// Status and State
// =============================================================================

/// Terminal status of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// Every byte transferred (and verified, for writes)
    Success,
    /// Stopped by the operator
    Cancelled,
    /// Channel or file I/O failure, including a lost control frame
    IoError,
    /// Device echo mismatch during a write
    VerificationError,
}

impl TransferStatus {
    /// Returns true for the error statuses
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::IoError | Self::VerificationError)
    }
}

/// Progress of a running transfer
///
/// The offset only ever moves forward, one byte at a time. Once a status
/// is set the state no longer changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferState {
    offset: u64,
    cancelled: bool,
    status: Option<TransferStatus>,
}

impl TransferState {
    /// Bytes fully processed so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn status(&self) -> Option<TransferStatus> {
        self.status
    }

    fn advance(&mut self) {
        debug_assert!(self.status.is_none());
        self.offset += 1;
    }

    fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    fn finish(&mut self, status: TransferStatus) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Result of executing a transfer
#[derive(Debug)]
pub struct TransferOutcome {
    /// Terminal status
    pub status: TransferStatus,
    /// Bytes fully processed before the transfer ended
    pub bytes_transferred: u64,
    /// The error behind a fatal status
    pub error: Option<TransferError>,
    discard: Option<PathBuf>,
}

impl TransferOutcome {
    fn from_state(state: &TransferState, error: Option<TransferError>, discard: Option<PathBuf>) -> Self {
        let status = state.status().unwrap_or(TransferStatus::Success);
        Self {
            status,
            bytes_transferred: state.offset(),
            error,
            discard,
        }
    }

    /// Outcome of a transfer that failed before any byte moved
    fn failed(error: TransferError, discard: Option<PathBuf>) -> Self {
        let mut state = TransferState::default();
        state.finish(error.status());
        Self::from_state(&state, Some(error), discard)
    }

    pub fn is_success(&self) -> bool {
        self.status == TransferStatus::Success
    }

    /// Output file left incomplete by a failed read, which should be deleted
    pub fn partial_output(&self) -> Option<&Path> {
        self.discard.as_deref()
    }

    /// Delete the incomplete output file, if any
    ///
    /// Returns `Ok(true)` if a file was removed.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file exists but could not be removed.
    pub fn discard_partial_output(&self) -> io::Result<bool> {
        let Some(path) = self.partial_output() else {
            return Ok(false);
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Drives one transfer over a borrowed channel
pub struct TransferEngine<'a, C, W> {
    link: ByteLink<'a, C>,
    request: &'a TransferRequest,
    cancel: CancelToken,
    reporter: ProgressReporter<W>,
    state: TransferState,
}

impl<'a, C: Read + Write, W: Write> TransferEngine<'a, C, W> {
    pub fn new(
        channel: &'a mut C,
        request: &'a TransferRequest,
        cancel: CancelToken,
        console: W,
    ) -> Self {
        Self {
            link: ByteLink::new(channel),
            request,
            cancel,
            reporter: ProgressReporter::for_request(console, request),
            state: TransferState::default(),
        }
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    /// Build the control frame for the request and send it
    ///
    /// # Errors
    ///
    /// Returns `TransferError::Frame` if the frame is rejected or not fully sent.
    pub fn send_control_frame(&mut self) -> Result<(), TransferError> {
        let frame = ControlFrame::new(
            self.request.byte_count(),
            self.request.device_type(),
            self.request.direction(),
        )?;
        debug!("Sending control frame {:02x?}", frame.to_bytes());
        FrameWriter::new(self.link.channel_mut()).write_frame(&frame)?;
        Ok(())
    }

    /// Receive the EEPROM contents into `sink`
    pub fn read_into<S: Write>(mut self, sink: &mut S) -> (TransferState, Option<TransferError>) {
        let result = self.read_loop(sink);
        self.conclude(result)
    }

    /// Send `source` to the EEPROM, verifying every byte
    pub fn write_from<S: Read>(mut self, source: &mut S) -> (TransferState, Option<TransferError>) {
        let result = self.write_loop(source);
        self.conclude(result)
    }

    /// Check the token before starting an iteration
    fn observe_cancel(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.state.mark_cancelled();
            return true;
        }
        false
    }

    fn conclude(
        mut self,
        result: Result<(), TransferError>,
    ) -> (TransferState, Option<TransferError>) {
        self.reporter.finish();
        let error = match result {
            Ok(()) if self.state.is_cancelled() => {
                self.state.finish(TransferStatus::Cancelled);
                None
            }
            Ok(()) => {
                self.state.finish(TransferStatus::Success);
                None
            }
            Err(e) => {
                self.state.finish(e.status());
                Some(e)
            }
        };
        (self.state, error)
    }
}

// =============================================================================
// Prepared Transfer
// =============================================================================

/// Local file side of a transfer, opened before the serial session
enum LocalFile {
    Source(BufReader<File>),
    /// Opened for writing but not truncated until the control frame is out
    Destination { file: File, existed: bool },
}

/// A transfer whose local file is open and checked
pub struct PreparedTransfer {
    request: TransferRequest,
    file: LocalFile,
}

impl PreparedTransfer {
    /// Open the request's local file
    ///
    /// Writes open the source read-only and check it holds at least
    /// `byte_count` bytes. Reads open the output file for writing, creating
    /// it if needed; an existing file keeps its contents until the device
    /// has accepted the control frame.
    ///
    /// # Errors
    ///
    /// Returns `Source`, `SourceTooShort` or `Output` errors.
    pub fn prepare(request: TransferRequest) -> Result<Self, TransferError> {
        let path = request.file_path().to_path_buf();
        let file = match request.direction() {
            Direction::Write => {
                let file = File::open(&path).map_err(|source| TransferError::Source {
                    path: path.clone(),
                    source,
                })?;
                let actual = file
                    .metadata()
                    .map_err(|source| TransferError::Source {
                        path: path.clone(),
                        source,
                    })?
                    .len();
                if actual < request.byte_count() {
                    return Err(TransferError::SourceTooShort {
                        path,
                        actual,
                        expected: request.byte_count(),
                    });
                }
                LocalFile::Source(BufReader::new(file))
            }
            Direction::Read => {
                let (file, existed) = open_destination(&path)
                    .map_err(|source| TransferError::Output { path, source })?;
                LocalFile::Destination { file, existed }
            }
        };
        Ok(Self { request, file })
    }

    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    /// Give up before execution
    ///
    /// An output file created by `prepare` is removed; one that existed
    /// before is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the created file could not be removed.
    pub fn abandon(self) -> io::Result<()> {
        let Self { request, file } = self;
        if let LocalFile::Destination {
            file,
            existed: false,
        } = file
        {
            drop(file);
            fs::remove_file(request.file_path())?;
        }
        Ok(())
    }

    /// Run the transfer over `channel`
    ///
    /// The local file is closed before this returns. A read that fails after
    /// the control frame went out flags the output file for deletion through
    /// [`TransferOutcome::partial_output`]; a cancelled read keeps it. If the
    /// frame itself is lost, only an output file created by this run is
    /// flagged.
    pub fn execute<C, W>(self, channel: &mut C, cancel: CancelToken, console: W) -> TransferOutcome
    where
        C: Read + Write,
        W: Write,
    {
        let Self { request, file } = self;

        // Interrupted before anything was sent: leave the device untouched
        if cancel.is_cancelled() {
            let mut state = TransferState::default();
            state.mark_cancelled();
            state.finish(TransferStatus::Cancelled);
            return TransferOutcome::from_state(&state, None, None);
        }

        let mut engine = TransferEngine::new(channel, &request, cancel, console);

        if let Err(e) = engine.send_control_frame() {
            let created = matches!(file, LocalFile::Destination { existed: false, .. });
            drop(file);
            return TransferOutcome::failed(e, created.then(|| request.file_path().to_path_buf()));
        }

        let (state, error) = match file {
            LocalFile::Source(mut source) => engine.write_from(&mut source),
            LocalFile::Destination { mut file, .. } => {
                if let Err(source) = file.set_len(0) {
                    let error = TransferError::Output {
                        path: request.file_path().to_path_buf(),
                        source,
                    };
                    return TransferOutcome::failed(error, None);
                }
                engine.read_into(&mut file)
            }
        };

        let discard = (request.direction() == Direction::Read
            && state.status().is_some_and(|s| s.is_fatal()))
        .then(|| request.file_path().to_path_buf());

        TransferOutcome::from_state(&state, error, discard)
    }
}

/// Open `path` for writing without truncating it
///
/// Returns the file and whether it existed before.
fn open_destination(path: &Path) -> io::Result<(File, bool)> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => Ok((file, false)),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            let file = OpenOptions::new().write(true).open(path)?;
            Ok((file, true))
        }
        Err(e) => Err(e),
    }
}
