//! SHA-256 digests of EEPROM images
//!
//! Used to report a fingerprint of every completed transfer so repeated
//! dumps of the same part can be compared at a glance.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::HASH_BUFFER_SIZE;

/// Compute the SHA-256 of the first `limit` bytes of a file
///
/// Fewer bytes are hashed if the file is shorter than `limit`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn sha256_file_prefix(path: &Path, limit: u64) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file).take(limit);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compute the SHA-256 of a whole file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn sha256_file(path: &Path) -> io::Result<String> {
    sha256_file_prefix(path, u64::MAX)
}

/// Compute the SHA-256 of an in-memory image
#[must_use]
pub fn sha256_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
