//! Whole-file frame reads
//!
//! A frame is either read completely or not at all. The size is taken by
//! seeking to the end before reading, so a file that shrinks while being
//! read fails with `UnexpectedEof` instead of yielding a partial frame.

use std::fs;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::registry::File;

/// Read the full contents of `path` as the file for `frame`
pub fn read_frame(path: &Path, frame: u64) -> io::Result<File> {
    let mut handle = fs::File::open(path)?;
    if !handle.metadata()?.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "frame path is not a regular file",
        ));
    }

    let size = handle.seek(SeekFrom::End(0))?;
    let size = usize::try_from(size)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "frame too large for memory"))?;
    handle.seek(SeekFrom::Start(0))?;

    let mut data = vec![0u8; size];
    handle.read_exact(&mut data)?;

    Ok(File::new(frame, path, data))
}
