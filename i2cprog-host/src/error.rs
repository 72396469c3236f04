//! Transfer error types

use std::io;
use std::path::PathBuf;

use i2cprog_common::framing::FrameError;
use i2cprog_common::protocol::EchoMismatch;
use thiserror::Error;

use crate::engine::TransferStatus;

/// Unrecoverable transfer failure
///
/// None of these are retried. Each maps to a terminal [`TransferStatus`]
/// through [`TransferError::status`].
#[derive(Debug, Error)]
pub enum TransferError {
    /// Control frame could not be sent
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Serial channel read or write failed
    #[error("serial I/O error at offset 0x{offset:06x}: {source}")]
    Session {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// Source file missing or unreadable
    #[error("cannot open source file {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Source file holds fewer bytes than requested
    #[error("source file {} holds {actual} bytes, {expected} requested", path.display())]
    SourceTooShort {
        path: PathBuf,
        actual: u64,
        expected: u64,
    },

    /// Reading the source file failed mid-transfer
    #[error("error reading source file at offset 0x{offset:06x}: {source}")]
    SourceRead {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// Output file could not be created
    #[error("cannot create output file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the output file failed mid-transfer
    #[error("error writing output file at offset 0x{offset:06x}: {source}")]
    OutputWrite {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// Device echo did not match the byte sent
    #[error(transparent)]
    Verification(#[from] EchoMismatch),
}

impl TransferError {
    /// Terminal status for a transfer ending with this error
    #[must_use]
    pub fn status(&self) -> TransferStatus {
        match self {
            Self::Verification(_) => TransferStatus::VerificationError,
            _ => TransferStatus::IoError,
        }
    }
}
