//! Streaming content hashing
//!
//! Files are read in fixed-size chunks so arbitrarily large audio files
//! never get buffered whole.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// Stream a file through SHA-256 and return the lowercase hex digest
///
/// # Errors
/// Returns an error if the file disappears or becomes unreadable mid-read.
/// The reconciler records this as a skipped file rather than aborting the
/// scan.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
