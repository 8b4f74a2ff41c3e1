// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # rsrcfork
//!
//! A decoder for Classic Mac OS resource forks. A resource fork bundles typed, numbered and
//! optionally named binary blobs (icons, strings, code fragments, ...) alongside a file's
//! primary content. This crate turns the bytes of such a fork into a flat list of
//! [`Resource`] values, in the order their payloads are stored on disk.
//!
//! # Architecture
//!
//! - **Acquisition** - [`file`] obtains the fork bytes from a file's side-channel fork, from a
//!   file's primary content, or from memory
//! - **Decoding** - [`rsrc`] parses header, map, type list, reference lists, name list and data
//!   section with bounds checks on every read
//! - **Container** - [`ResourceFork`] holds the decoded resources and offers lookups
//!
//! Decoding is a pure, synchronous function of an immutable buffer. Any structural problem
//! aborts the decode with a single [`Error`]; there are no partial results.
//!
//! # Examples
//!
//! ## Decoding a buffer
//!
//! ```rust,no_run
//! use rsrcfork::parse_resource_fork;
//!
//! let data = std::fs::read("Application.rsrc")?;
//! for resource in parse_resource_fork(&data)? {
//!     println!(
//!         "{:<6} {:>6} {:<20} {} bytes",
//!         resource.type_code().printable_form(),
//!         resource.id(),
//!         resource.name().unwrap_or("-"),
//!         resource.data().len()
//!     );
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reading a file's resource fork
//!
//! ```rust,no_run
//! use rsrcfork::{ResourceFork, TypeCode};
//! use std::path::Path;
//!
//! let fork = ResourceFork::from_resource_fork(Path::new("Application"))?;
//! for code in fork.of_type(TypeCode::new(*b"CODE")) {
//!     println!("CODE {} is {} bytes", code.id(), code.data().len());
//! }
//! # Ok::<(), rsrcfork::Error>(())
//! ```

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// ```rust,no_run
/// use rsrcfork::prelude::*;
///
/// let fork = ResourceFork::from_data_fork(std::path::Path::new("Application.rsrc"))?;
/// # Ok::<(), rsrcfork::Error>(())
/// ```
pub mod prelude;

/// Acquisition of fork bytes and the bounds-checked cursor they are read through.
///
/// # Key Types
///
/// - [`file::Source`] - Tagged union of acquisition strategies
/// - [`file::File`] - Loaded fork bytes
/// - [`file::parser::Parser`] - Bounds-checked big-endian cursor
pub mod file;

/// Resource fork decoding.
///
/// # Key Types
///
/// - [`rsrc::ResourceFork`] - Decoded container
/// - [`rsrc::Resource`] - One resource
/// - [`rsrc::TypeCode`] - Four-byte type identifier
/// - [`rsrc::ResourceForkParser`] - Low-level header and map access
pub mod rsrc;

/// `rsrcfork` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `rsrcfork` Error type
///
/// # Examples
///
/// ```rust
/// use rsrcfork::{parse_resource_fork, Error};
///
/// match parse_resource_fork(&[0x00, 0x00, 0x01, 0x00]) {
///     Err(Error::TruncatedHeader(len)) => assert_eq!(len, 4),
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
pub use error::Error;

/// Main entry points for decoding.
pub use rsrc::{
    parse_resource_fork, MapAttributes, Resource, ResourceAttributes, ResourceFork,
    ResourceForkParser, TypeCode,
};

/// Low-level access to fork bytes.
pub use file::{parser::Parser, File, Source};
