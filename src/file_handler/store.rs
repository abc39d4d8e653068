//! Immutable byte storage for the viewed file.

use memmap2::Mmap;
use std::path::{Path, PathBuf};

/// Internal byte source strategy for [`ByteStore`]
#[derive(Debug)]
pub enum ByteSource {
    /// Content loaded entirely into memory
    InMemory(Vec<u8>),
    /// Content accessed via memory mapping (large files)
    MemoryMapped(Mmap),
}

impl ByteSource {
    /// Get the underlying bytes as a slice regardless of storage strategy
    fn as_bytes(&self) -> &[u8] {
        match self {
            ByteSource::InMemory(vec) => vec.as_slice(),
            ByteSource::MemoryMapped(mmap) => &mmap[..],
        }
    }

    /// Short strategy label used in log output
    pub fn strategy_name(&self) -> &'static str {
        match self {
            ByteSource::InMemory(_) => "in-memory",
            ByteSource::MemoryMapped(_) => "memory-mapped",
        }
    }
}

/// Whole-file content with clamped, never-failing slicing.
///
/// The size is fixed when the store is built. Every range request is clamped to
/// `[0, len)` so callers can ask for windows that run past the end of the file.
#[derive(Debug)]
pub struct ByteStore {
    pub(crate) source: ByteSource,
    path: PathBuf,
}

impl ByteStore {
    /// Create a store from an already prepared byte source
    pub fn new(source: ByteSource, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: path.into(),
        }
    }

    /// Create an in-memory store that is not backed by a file on disk
    pub fn from_bytes(content: impl Into<Vec<u8>>) -> Self {
        Self::new(ByteSource::InMemory(content.into()), PathBuf::new())
    }

    /// Path the content was loaded from (empty for in-memory stores)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of bytes
    pub fn len(&self) -> u64 {
        self.as_bytes().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Entire content as one slice
    pub fn as_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    /// Return the bytes in `[start, end)` after clamping both bounds.
    ///
    /// `start` is clamped to `[0, len]` and `end` to `[start, len]`, so the result is
    /// empty rather than an error when the range lies outside the file.
    pub fn slice(&self, start: u64, end: u64) -> &[u8] {
        let bytes = self.as_bytes();
        let len = bytes.len();
        let start = (start.min(len as u64)) as usize;
        let end = (end.min(len as u64) as usize).max(start);
        &bytes[start..end]
    }

    /// Single byte at `offset`, if it lies inside the file
    pub fn byte_at(&self, offset: u64) -> Option<u8> {
        usize::try_from(offset)
            .ok()
            .and_then(|idx| self.as_bytes().get(idx).copied())
    }
}
