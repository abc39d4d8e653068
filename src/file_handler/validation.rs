//! File validation utilities for ensuring a path can be loaded.

use crate::error::{Result, RlhexError};
use std::fs::File;
use std::path::Path;

/// Validate that a file path is accessible and suitable for viewing
///
/// # Validations Performed
/// - Path exists and is a regular file (not a directory)
/// - File is readable by the current process
///
/// Empty files are accepted: the viewer shows an empty dump for them.
pub fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RlhexError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| RlhexError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(RlhexError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    File::open(path).map_err(|e| RlhexError::file_error("Cannot open file for reading", e))?;

    Ok(())
}
