//! Transparent unwrapping of zip-packaged messages.
//!
//! Some providers ship large messages as a zip archive holding a single
//! file. The archive is detected by its signature and the first member is
//! streamed to the reader directly, without a temporary file.

use std::io::{self, Read, Seek, SeekFrom};
use thiserror::Error;
use zip::ZipArchive;

/// Local file header signature.
const LOCAL_HEADER_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// End of central directory signature; an archive with no members starts with it.
const EMPTY_ARCHIVE_MAGIC: &[u8; 4] = b"PK\x05\x06";

/// Errors that can occur while opening a container.
#[derive(Error, Debug)]
pub enum ContainerError {
    /// Reading or seeking the source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive is corrupt or uses an unsupported feature.
    #[error("Invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The archive holds no members.
    #[error("Zip archive is empty")]
    EmptyArchive,
}

/// Returns true if `source` starts with a zip signature at its current position.
///
/// The position is restored before returning, whatever the outcome of the probe.
///
/// # Errors
///
/// Returns an error if the source cannot be read or seeked.
pub fn is_zip<R: Read + Seek>(source: &mut R) -> io::Result<bool> {
    let start = source.stream_position()?;

    let mut header = Vec::with_capacity(LOCAL_HEADER_MAGIC.len());
    let probe = source
        .by_ref()
        .take(LOCAL_HEADER_MAGIC.len() as u64)
        .read_to_end(&mut header);

    source.seek(SeekFrom::Start(start))?;
    probe?;

    Ok(header.as_slice() == LOCAL_HEADER_MAGIC || header.as_slice() == EMPTY_ARCHIVE_MAGIC)
}

/// Hands `read` a stream over the message in `source`.
///
/// If `source` is a zip archive, the stream is its first member; otherwise
/// it is `source` itself, positioned where it was when passed in. `source`
/// is dropped before this function returns on every path.
///
/// # Errors
///
/// Returns an error if probing fails, the archive cannot be opened, or it is empty.
pub fn read_unwrapped<R, T, F>(mut source: R, read: F) -> Result<T, ContainerError>
where
    R: Read + Seek,
    F: FnOnce(&mut dyn Read) -> T,
{
    if !is_zip(&mut source)? {
        return Ok(read(&mut source));
    }

    let mut archive = ZipArchive::new(source)?;
    if archive.len() == 0 {
        return Err(ContainerError::EmptyArchive);
    }
    if archive.len() > 1 {
        tracing::warn!(members = archive.len(), "Zip archive has several members, reading the first");
    }

    let mut member = archive.by_index(0)?;
    tracing::info!(member = member.name(), "Reading message from zip archive");
    Ok(read(&mut member))
}
