//! Acquiring the bytes of a resource fork.
//!
//! This module abstracts over the places a resource fork can come from and hands the decoder a
//! single contiguous byte buffer, whatever the origin.
//!
//! # Architecture
//!
//! - **Acquisition strategies** - [`crate::file::Source`] is a tagged union of the three ways to
//!   obtain fork bytes
//! - **Backend system** - [`crate::file::Backend`] implementations hold the bytes (memory-mapped
//!   files, owned buffers)
//! - **File abstraction** - [`crate::file::File`] owns one backend and exposes its bytes
//!
//! # Key Components
//!
//! ## Core Types
//! - [`crate::file::File`] - Loaded fork bytes
//! - [`crate::file::Source`] - Acquisition strategy
//! - [`crate::file::Backend`] - Trait for different data holders
//!
//! ## Parsing Infrastructure
//! - [`crate::file::parser::Parser`] - Bounds-checked cursor used by the decoder
//! - [`crate::file::io`] - Big-endian primitive reads
//! - [`crate::file::forks`] - Named fork and AppleDouble lookup
//!
//! # Examples
//!
//! ```rust,no_run
//! use rsrcfork::{File, ResourceFork, Source};
//! use std::path::Path;
//!
//! // A bare fork that was saved as a regular file
//! let file = File::from_data_fork(Path::new("Application.rsrc"))?;
//! println!("Fork is {} bytes", file.len());
//!
//! // The same, decoded in one go
//! let fork = ResourceFork::from_source(Source::DataFork(Path::new("Application.rsrc")))?;
//! # Ok::<(), rsrcfork::Error>(())
//! ```

pub mod forks;
pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::Result;
use memory::Memory;
use physical::Physical;

/// Backend for holding fork bytes.
pub trait Backend: Send + Sync {
    /// Returns the complete data.
    fn data(&self) -> &[u8];

    /// Returns the length of the data.
    fn len(&self) -> usize;

    /// Returns true if there is no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where the bytes of a resource fork come from.
///
/// Each strategy converges on the same contract: a byte buffer handed to the decoder. No
/// strategy retries or caches.
#[derive(Debug)]
pub enum Source<'a> {
    /// The side-channel resource fork of a file: the named fork on macOS, otherwise an
    /// AppleDouble `._` sidecar
    ResourceFork(&'a Path),
    /// The primary content of a file, used as-is
    DataFork(&'a Path),
    /// An in-memory buffer, used as-is
    Memory(Vec<u8>),
}

impl Source<'_> {
    /// Acquire the bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceUnavailable`] if a file-based source cannot be read.
    pub fn load(self) -> Result<File> {
        match self {
            Source::ResourceFork(path) => File::from_resource_fork(path),
            Source::DataFork(path) => File::from_data_fork(path),
            Source::Memory(data) => Ok(File::from_mem(data)),
        }
    }
}

/// The loaded bytes of a resource fork.
pub struct File {
    data: Box<dyn Backend>,
}

impl File {
    /// Load the side-channel resource fork of the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceUnavailable`] if the file has no resource fork.
    pub fn from_resource_fork(path: &Path) -> Result<File> {
        let data = forks::read_resource_fork(path)?;
        Ok(Self::load(Memory::new(data)))
    }

    /// Map the primary content of the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceUnavailable`] if the file cannot be opened or mapped.
    pub fn from_data_fork(path: &Path) -> Result<File> {
        let input = Physical::new(path)?;
        Ok(Self::load(input))
    }

    /// Wrap an in-memory buffer.
    #[must_use]
    pub fn from_mem(data: Vec<u8>) -> File {
        Self::load(Memory::new(data))
    }

    fn load<T: Backend + 'static>(data: T) -> File {
        log::debug!("Loaded {} fork bytes", data.len());
        File {
            data: Box::new(data),
        }
    }

    /// Returns the size of the fork in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the fork is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the complete fork bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn memory_source() {
        let file = Source::Memory(vec![1, 2, 3]).load().unwrap();
        assert_eq!(file.len(), 3);
        assert_eq!(file.data(), &[1, 2, 3]);
        assert!(!file.is_empty());

        assert!(Source::Memory(Vec::new()).load().unwrap().is_empty());
    }

    #[test]
    fn data_fork_source() {
        let temp_path = std::env::temp_dir().join("rsrcfork_file_data_fork.rsrc");
        std::fs::write(&temp_path, b"fork").unwrap();

        let file = Source::DataFork(&temp_path).load().unwrap();
        assert_eq!(file.data(), b"fork");

        std::fs::remove_file(&temp_path).unwrap();
    }

    #[test]
    fn unavailable_sources() {
        let missing = Path::new("/nonexistent/path/Document");

        assert!(matches!(
            Source::DataFork(missing).load(),
            Err(Error::SourceUnavailable { .. })
        ));
        assert!(matches!(
            Source::ResourceFork(missing).load(),
            Err(Error::SourceUnavailable { .. })
        ));
    }
}
