//! Whole-file reader: loads a file into an owned, immutable buffer.

use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use crate::error::ReadError;

/// Owned bytes of a whole input file.
///
/// The slice length marks the end of data; there is no in-band sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBuffer {
    data: Box<[u8]>,
}

impl RawBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Deref for RawBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for RawBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }
}

/// Read the whole file at `path` into memory.
///
/// A file larger than the address space fails with `OutOfMemory` instead of
/// being truncated.
pub fn read_whole_file(path: impl AsRef<Path>) -> Result<RawBuffer, ReadError> {
    let path = path.as_ref();
    let fail = |e| ReadError::from_io(path.to_path_buf(), e);

    let mut file = File::open(path).map_err(fail)?;
    let size = file.metadata().map_err(fail)?.len();
    let size = usize::try_from(size).map_err(|_| ReadError::OutOfMemory {
        path: path.to_path_buf(),
    })?;

    let mut data = Vec::new();
    data.try_reserve_exact(size)
        .map_err(|_| ReadError::OutOfMemory {
            path: path.to_path_buf(),
        })?;
    file.read_to_end(&mut data).map_err(fail)?;

    Ok(RawBuffer::from(data))
}
