//! Factory for creating ByteStore instances.
//!
//! The factory validates the path and picks the storage strategy from the file size.
//!
//! # Strategy Selection
//! - Files < 50MB: In-memory (`ByteSource::InMemory`)
//! - Files ≥ 50MB: Memory mapping (`ByteSource::MemoryMapped`)

use crate::error::{Result, RlhexError};
use crate::file_handler::store::{ByteSource, ByteStore};
use crate::file_handler::validation::validate_file_path;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub struct ByteStoreFactory;

impl ByteStoreFactory {
    /// Size threshold for choosing between in-memory and memory-mapped strategies
    const MEMORY_THRESHOLD: u64 = 50 * 1024 * 1024; // 50MB

    /// Load the file at `path` with the strategy suited to its size
    ///
    /// # Errors
    /// * File validation errors (non-existent, directory, not readable)
    /// * Read or memory mapping failures
    pub fn open(path: &Path) -> Result<ByteStore> {
        validate_file_path(path)?;

        let file = File::open(path).map_err(|e| {
            RlhexError::file_error(format!("Failed to open file: {}", path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| RlhexError::file_error("Failed to get file metadata", e))?
            .len();

        let source = if file_size < Self::MEMORY_THRESHOLD {
            Self::read_into_memory(file)?
        } else {
            Self::map_file(&file, path)?
        };

        log::info!(
            "opened {} ({} bytes, {})",
            path.display(),
            file_size,
            source.strategy_name()
        );

        Ok(ByteStore::new(source, path))
    }

    /// Load with an explicit strategy, bypassing the size threshold
    #[cfg(test)]
    pub fn open_with_strategy(path: &Path, force_mmap: bool) -> Result<ByteStore> {
        validate_file_path(path)?;

        let file = File::open(path).map_err(|e| {
            RlhexError::file_error(format!("Failed to open file: {}", path.display()), e)
        })?;

        let source = if force_mmap {
            Self::map_file(&file, path)?
        } else {
            Self::read_into_memory(file)?
        };
        Ok(ByteStore::new(source, path))
    }

    fn read_into_memory(mut file: File) -> Result<ByteSource> {
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| RlhexError::file_error("Failed to read file", e))?;
        Ok(ByteSource::InMemory(content))
    }

    fn map_file(file: &File, path: &Path) -> Result<ByteSource> {
        // SAFETY: the mapping is read-only and the viewer never writes to the file.
        let mmap = unsafe {
            Mmap::map(file).map_err(|e| {
                RlhexError::memory_mapping(format!(
                    "Failed to memory map file {}: {}",
                    path.display(),
                    e
                ))
            })?
        };
        Ok(ByteSource::MemoryMapped(mmap))
    }
}
