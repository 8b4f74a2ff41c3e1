use std::path::PathBuf;

use thiserror::Error;

use crate::rsrc::TypeCode;

macro_rules! invalid_header_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidHeader {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidHeader {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_range_error {
    () => {
        crate::Error::OutOfRange
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant is terminal for the decode that produced it: the decoder never returns a
/// partial list of resources, and never retries. Callers should treat any error as "this input
/// cannot be browsed".
///
/// # Error Categories
///
/// ## Container Structure Errors
/// - [`Error::TruncatedHeader`] - Fewer than 16 bytes were provided
/// - [`Error::InvalidHeader`] - Header or map values are inconsistent
/// - [`Error::OutOfRange`] - A read or seek went past the end of the buffer
/// - [`Error::DataOutOfRange`] - A payload extends beyond the data section
/// - [`Error::DuplicateResource`] - Two entries share the same type and ID
///
/// ## Acquisition Errors
/// - [`Error::SourceUnavailable`] - The bytes of a fork could not be obtained
///
/// # Examples
///
/// ```rust,no_run
/// use rsrcfork::{Error, ResourceFork};
/// use std::path::Path;
///
/// match ResourceFork::from_resource_fork(Path::new("Application")) {
///     Ok(fork) => println!("{} resources", fork.len()),
///     Err(Error::SourceUnavailable { path, .. }) => {
///         eprintln!("{} has no resource fork", path.display());
///     }
///     Err(Error::InvalidHeader { message, file, line }) => {
///         eprintln!("Invalid header: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The buffer is too short to hold the 16-byte fork header.
    ///
    /// The associated value is the number of bytes that were available.
    #[error("Resource fork header is truncated - {0} bytes available, 16 required")]
    TruncatedHeader(usize),

    /// The header or resource map is self-inconsistent.
    ///
    /// Raised when the data or map section described by the header does not fit into the
    /// buffer, or when a stored count uses the reserved `0xFFFF` encoding. The error includes
    /// the source location where the inconsistency was detected.
    #[error("Invalid header - {file}:{line}: {message}")]
    InvalidHeader {
        /// Description of the inconsistency
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the fork.
    #[error("Out of range read would have occurred!")]
    OutOfRange,

    /// A resource's payload, or its length prefix, lies outside the data section.
    #[error("Data of resource {type_code} #{id} ends at {end}, beyond the data section end {limit}")]
    DataOutOfRange {
        /// Type of the offending resource
        type_code: TypeCode,
        /// ID of the offending resource
        id: i16,
        /// Absolute offset one past the last byte the resource would occupy
        end: u64,
        /// Absolute offset one past the last byte of the data section
        limit: u64,
    },

    /// Two reference entries share the same type and ID.
    #[error("Duplicate resource {type_code} #{id}")]
    DuplicateResource {
        /// Shared type code
        type_code: TypeCode,
        /// Shared ID
        id: i16,
    },

    /// The bytes of the fork could not be acquired.
    ///
    /// Wraps the I/O error of the acquisition step, e.g. a missing file, a file without a
    /// resource fork, or an unreadable AppleDouble sidecar.
    #[error("Resource fork of {} is unavailable: {source}", .path.display())]
    SourceUnavailable {
        /// The file whose fork was requested
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}
