//! Locating the side-channel resource fork of a file.
//!
//! A file's resource fork is not part of its ordinary content. Depending on where the file
//! lives, the fork is found in one of these places:
//!
//! - **Named fork** (macOS only) - HFS+ and APFS expose the fork at `<path>/..namedfork/rsrc`
//! - **AppleDouble sidecar** - Non-Mac filesystems, archives and network shares store the fork
//!   in a `._<name>` file next to the original, wrapped in an AppleDouble container
//!
//! Both places are tried in that order. A fork that exists but is empty counts as absent.
//!
//! # AppleDouble Layout
//!
//! ```text
//! Magic number (0x00051607, or 0x00051600 for AppleSingle)   u32
//! Version                                                    u32
//! Filler                                                     16 bytes
//! Number of entries                                          u16
//! Entry descriptors, each:
//!   Entry ID (2 = resource fork)                             u32
//!   Offset of entry data                                     u32
//!   Length of entry data                                     u32
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{file::parser::Parser, Error, Result};

/// Magic number of an AppleDouble header file.
pub const APPLE_DOUBLE_MAGIC: u32 = 0x0005_1607;

/// Magic number of an AppleSingle file.
pub const APPLE_SINGLE_MAGIC: u32 = 0x0005_1600;

/// AppleDouble entry ID of the resource fork.
const RESOURCE_FORK_ENTRY: u32 = 2;

/// Read the resource fork of the file at `path`.
///
/// # Errors
/// Returns [`Error::SourceUnavailable`] if neither a named fork nor an AppleDouble sidecar
/// with a resource fork entry exists, or if the sidecar is malformed.
pub fn read_resource_fork(path: &Path) -> Result<Vec<u8>> {
    let unavailable = |source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    if let Some(data) = read_named_fork(path).map_err(unavailable)? {
        return Ok(data);
    }

    let Some(sidecar) = apple_double_path(path) else {
        return Err(unavailable(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path has no file name",
        )));
    };

    log::debug!(
        "No named resource fork for {}, trying {}",
        path.display(),
        sidecar.display()
    );

    let container = match fs::read(&sidecar) {
        Ok(container) => container,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::NotFound,
                "file has no resource fork",
            )));
        }
        Err(error) => return Err(unavailable(error)),
    };

    match extract_apple_double_fork(&container) {
        Ok(Some(data)) => Ok(data.to_vec()),
        Ok(None) => Err(unavailable(io::Error::new(
            io::ErrorKind::NotFound,
            "AppleDouble file has no resource fork entry",
        ))),
        Err(error) => {
            log::warn!("Malformed AppleDouble file {}: {}", sidecar.display(), error);
            Err(unavailable(io::Error::new(
                io::ErrorKind::InvalidData,
                error.to_string(),
            )))
        }
    }
}

#[cfg(target_os = "macos")]
fn read_named_fork(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path.join("..namedfork").join("rsrc")) {
        Ok(data) if !data.is_empty() => Ok(Some(data)),
        Ok(_) => Ok(None),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            // Missing named fork is only conclusive if the file itself is missing
            fs::metadata(path)?;
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

#[cfg(not(target_os = "macos"))]
fn read_named_fork(path: &Path) -> io::Result<Option<Vec<u8>>> {
    fs::metadata(path)?;
    Ok(None)
}

/// Returns the `._<name>` sidecar path for `path`.
#[must_use]
pub fn apple_double_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let mut sidecar = std::ffi::OsString::from("._");
    sidecar.push(name);
    Some(path.with_file_name(sidecar))
}

/// Borrow the resource fork entry of an AppleDouble or AppleSingle container.
///
/// Returns `Ok(None)` if the container is well-formed but has no non-empty resource fork.
///
/// # Errors
/// Returns [`Error::InvalidHeader`] for an unknown magic number and [`Error::OutOfRange`] if an
/// entry descriptor or the entry data lies outside `data`.
pub fn extract_apple_double_fork(data: &[u8]) -> Result<Option<&[u8]>> {
    let mut parser = Parser::new(data);

    let magic = parser.read_be::<u32>()?;
    if magic != APPLE_DOUBLE_MAGIC && magic != APPLE_SINGLE_MAGIC {
        return Err(invalid_header_error!(
            "Invalid AppleDouble magic: 0x{:08X}",
            magic
        ));
    }
    let _version = parser.read_be::<u32>()?;
    parser.advance_by(16)?;

    let entry_count = parser.read_be::<u16>()?;
    for _ in 0..entry_count {
        let id = parser.read_be::<u32>()?;
        let offset = parser.read_be::<u32>()? as usize;
        let length = parser.read_be::<u32>()? as usize;

        if id == RESOURCE_FORK_ENTRY {
            if length == 0 {
                return Ok(None);
            }

            let mut entry = Parser::new(data);
            entry.seek(offset)?;
            return Ok(Some(entry.read_bytes(length)?));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple_double(entries: &[(u32, &[u8])]) -> Vec<u8> {
        let mut container = Vec::new();
        container.extend_from_slice(&APPLE_DOUBLE_MAGIC.to_be_bytes());
        container.extend_from_slice(&0x0002_0000_u32.to_be_bytes());
        container.extend_from_slice(&[0; 16]);
        container.extend_from_slice(&(entries.len() as u16).to_be_bytes());

        let mut offset = 26 + 12 * entries.len();
        for (id, payload) in entries {
            container.extend_from_slice(&id.to_be_bytes());
            container.extend_from_slice(&(offset as u32).to_be_bytes());
            container.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            offset += payload.len();
        }
        for (_, payload) in entries {
            container.extend_from_slice(payload);
        }
        container
    }

    #[test]
    fn sidecar_path() {
        assert_eq!(
            apple_double_path(Path::new("/tmp/folder/Application")).unwrap(),
            PathBuf::from("/tmp/folder/._Application")
        );
        assert_eq!(
            apple_double_path(Path::new("Notes.txt")).unwrap(),
            PathBuf::from("._Notes.txt")
        );
        assert!(apple_double_path(Path::new("/")).is_none());
    }

    #[test]
    fn extract_resource_entry() {
        let finder_info = [0u8; 32];
        let container = apple_double(&[(9, &finder_info), (2, b"fork bytes")]);

        assert_eq!(
            extract_apple_double_fork(&container).unwrap(),
            Some(&b"fork bytes"[..])
        );
    }

    #[test]
    fn missing_or_empty_entry() {
        let container = apple_double(&[(9, &[0u8; 32])]);
        assert_eq!(extract_apple_double_fork(&container).unwrap(), None);

        let container = apple_double(&[(2, b"")]);
        assert_eq!(extract_apple_double_fork(&container).unwrap(), None);
    }

    #[test]
    fn malformed_containers() {
        assert!(matches!(
            extract_apple_double_fork(b"not an AppleDouble file at all"),
            Err(Error::InvalidHeader { .. })
        ));

        let mut container = apple_double(&[(2, b"fork bytes")]);
        container.truncate(container.len() - 1);
        assert!(matches!(
            extract_apple_double_fork(&container),
            Err(Error::OutOfRange)
        ));

        assert!(extract_apple_double_fork(&[]).is_err());
    }

    #[test]
    fn read_from_sidecar() {
        let dir = std::env::temp_dir().join("rsrcfork_forks_sidecar");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Document");
        std::fs::write(&path, b"data fork").unwrap();
        std::fs::write(
            dir.join("._Document"),
            apple_double(&[(2, b"resource fork")]),
        )
        .unwrap();

        assert_eq!(read_resource_fork(&path).unwrap(), b"resource fork");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn no_resource_fork() {
        let dir = std::env::temp_dir().join("rsrcfork_forks_none");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Plain");
        std::fs::write(&path, b"only data").unwrap();

        match read_resource_fork(&path) {
            Err(Error::SourceUnavailable { path: failed, source }) => {
                assert_eq!(failed, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("Expected SourceUnavailable, got {other:?}"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_resource_fork(Path::new("/nonexistent/path/Document")),
            Err(Error::SourceUnavailable { .. })
        ));
    }
}
