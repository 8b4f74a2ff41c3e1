//! Resource fork decoding and the decoded resource container.
//!
//! This module provides the types and logic for turning the bytes of a Classic Mac OS resource
//! fork into an ordered list of resources.
//!
//! # Key Types
//! - [`ResourceFork`] - Container for all resources decoded from one fork
//! - [`Resource`] - One decoded resource
//! - [`TypeCode`] - Four-byte resource type identifier
//! - [`ResourceForkParser`] - Low-level decoder exposing header and map details
//!
//! # Examples
//!
//! ```rust,no_run
//! use rsrcfork::{ResourceFork, TypeCode};
//! use std::path::Path;
//!
//! let fork = ResourceFork::from_resource_fork(Path::new("Application"))?;
//! for resource in &fork {
//!     println!("{} #{} {:?}", resource.type_code(), resource.id(), resource.name());
//! }
//!
//! if let Some(code) = fork.get(TypeCode::new(*b"CODE"), 1) {
//!     println!("CODE 1 is {} bytes", code.data().len());
//! }
//! # Ok::<(), rsrcfork::Error>(())
//! ```
mod parser;
mod types;

pub use parser::{parse_resource_fork, Header, ResourceForkParser, TypeEntry, HEADER_SIZE};
pub use types::*;

use std::path::Path;

use crate::{file::Source, Result};

/// Container for all resources of a resource fork, in on-disk data order.
///
/// The container owns its resources; it does not keep the buffer it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceFork {
    /// Attribute word of the resource map
    attributes: MapAttributes,
    /// All resources, sorted by payload offset
    resources: Vec<Resource>,
}

impl ResourceFork {
    /// Acquire the fork bytes through `source` and decode them.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceUnavailable`] if the bytes cannot be acquired, or any
    /// decoding error of [`parse_resource_fork`].
    pub fn from_source(source: Source<'_>) -> Result<Self> {
        let file = source.load()?;
        Self::from_slice(file.data())
    }

    /// Decode the resource fork of the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceUnavailable`] if the file has no resource fork.
    pub fn from_resource_fork(path: &Path) -> Result<Self> {
        Self::from_source(Source::ResourceFork(path))
    }

    /// Decode the primary content of the file at `path` as if it were a resource fork.
    ///
    /// This is the right mode for bare `.rsrc` files and forks copied off their original
    /// filesystem.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceUnavailable`] if the file cannot be read.
    pub fn from_data_fork(path: &Path) -> Result<Self> {
        Self::from_source(Source::DataFork(path))
    }

    /// Decode a fork that is already in memory.
    ///
    /// # Errors
    /// Returns any decoding error of [`parse_resource_fork`].
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        Self::from_source(Source::Memory(data))
    }

    /// Decode a borrowed fork image.
    ///
    /// # Errors
    /// Returns any decoding error of [`parse_resource_fork`].
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let parser = ResourceForkParser::parse(data)?;
        let resources = parser.read_resources(data)?;

        log::debug!("Decoded {} resources", resources.len());

        Ok(ResourceFork {
            attributes: parser.attributes,
            resources,
        })
    }

    /// Returns the attribute word of the resource map.
    #[must_use]
    pub fn attributes(&self) -> MapAttributes {
        self.attributes
    }

    /// Returns all resources in on-disk data order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Consumes the container and returns the resources in on-disk data order.
    #[must_use]
    pub fn into_resources(self) -> Vec<Resource> {
        self.resources
    }

    /// Gets a resource by type and ID.
    #[must_use]
    pub fn get(&self, type_code: TypeCode, id: i16) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|resource| resource.type_code() == type_code && resource.id() == id)
    }

    /// Iterates over the resources of one type, in on-disk data order.
    pub fn of_type(&self, type_code: TypeCode) -> impl Iterator<Item = &Resource> {
        self.resources
            .iter()
            .filter(move |resource| resource.type_code() == type_code)
    }

    /// Returns the distinct type codes, in the order their first resource appears on disk.
    #[must_use]
    pub fn types(&self) -> Vec<TypeCode> {
        let mut types: Vec<TypeCode> = Vec::new();
        for resource in &self.resources {
            if !types.contains(&resource.type_code()) {
                types.push(resource.type_code());
            }
        }
        types
    }

    /// Returns the number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if there are no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Get an iterator over all resources.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }
}

impl<'a> IntoIterator for &'a ResourceFork {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ResourceFork {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}
