//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::physical::Physical`] backend that implements the
//! [`crate::file::Backend`] trait for files on disk. The file is mapped read-only into the
//! address space, so large data forks are never copied up front.
//!
//! # Integration
//!
//! [`crate::file::Source::DataFork`] uses this backend to treat the primary content of a file
//! as a resource fork.

use super::Backend;
use crate::{Error, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for efficient access to files on disk.
///
/// The mapping is read-only and lives as long as the backend.
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the file on disk
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceUnavailable`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let path = path.as_ref();
        let unavailable = |source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = fs::File::open(path).map_err(unavailable)?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(unavailable)?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
