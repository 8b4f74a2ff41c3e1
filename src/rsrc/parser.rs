//! Resource fork container decoding.
//!
//! This module implements the decoder for the Classic Mac OS resource fork format. A fork is
//! made of a fixed header, a data section holding the payloads, and a resource map that
//! describes which resources exist and where their payloads live.
//!
//! # Format Overview
//!
//! All values are big-endian. Offsets in the header are relative to the start of the fork;
//! offsets inside the map are relative to the map, the type list or the name list as noted.
//!
//! ```text
//! Header (16 bytes)
//!   Offset of data section                                u32
//!   Offset of resource map                                u32
//!   Length of data section                                u32
//!   Length of resource map                                u32
//!
//! Resource map
//!   Reserved copy of the header                           16 bytes
//!   Reserved handle to next map                           u32
//!   Reserved file reference number                        u16
//!   Map attributes                                        u16
//!   Offset from map to type list                          u16
//!   Offset from map to name list                          u16
//!   Number of types minus one                             u16
//!
//! Type list entry (8 bytes)
//!   Type code                                             4 bytes
//!   Number of resources of this type minus one            u16
//!   Offset from type list to reference list               u16
//!
//! Reference list entry (12 bytes)
//!   Resource ID                                           i16
//!   Offset from name list to name, 0xFFFF for none        u16
//!   Attributes (top 8 bits) and data offset (low 24 bits) u32
//!   Reserved handle                                       u32
//!
//! Name list entry
//!   Length                                                u8
//!   Characters                                            n bytes
//!
//! Data section entry
//!   Length of payload                                     u32
//!   Payload                                               n bytes
//! ```
//!
//! # Decoding Phases
//!
//! Decoding happens in two explicit phases. [`ResourceForkParser::parse`] reads the header,
//! the map and the type list. [`ResourceForkParser::read_resources`] then walks every type's
//! reference list in map order, resolves names and payloads, rejects duplicate identities and
//! finally sorts the resources by payload offset. The map groups resources by type, while the
//! data section stores them in whatever order they were written, and the published order is
//! the latter.
//!
//! # Usage
//!
//! ```rust,no_run
//! use rsrcfork::parse_resource_fork;
//!
//! let data = std::fs::read("Application.rsrc")?;
//! for resource in parse_resource_fork(&data)? {
//!     println!("{} #{} - {} bytes", resource.type_code(), resource.id(), resource.data().len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashSet;

use crate::{
    file::parser::Parser,
    rsrc::{MapAttributes, Resource, TypeCode, NO_NAME},
    Error, Result,
};

/// Size of the fork header.
pub const HEADER_SIZE: usize = 16;

/// Bytes at the start of the map that precede the attribute word.
const MAP_RESERVED_SIZE: usize = 16 + 4 + 2;

/// Offset of the type count word from the start of the map.
const MAP_TYPE_COUNT_OFFSET: usize = MAP_RESERVED_SIZE + 2 + 2 + 2;

/// Stored count value that cannot be incremented within 16 bits.
const COUNT_OVERFLOW: u16 = 0xFFFF;

/// Decode a complete resource fork into its resources, in on-disk data order.
///
/// This is the primary entry point of the decoder. It is a pure function of `data`; the
/// returned resources own copies of their names and payloads.
///
/// # Errors
///
/// Returns an error if:
/// - `data` is shorter than the 16-byte header ([`Error::TruncatedHeader`])
/// - the header describes sections that do not fit, or a count uses the reserved `0xFFFF`
///   encoding ([`Error::InvalidHeader`])
/// - any structure of the map lies outside the buffer ([`Error::OutOfRange`])
/// - a payload extends beyond the data section ([`Error::DataOutOfRange`])
/// - two entries share a type and ID ([`Error::DuplicateResource`])
pub fn parse_resource_fork(data: &[u8]) -> Result<Vec<Resource>> {
    let parser = ResourceForkParser::parse(data)?;
    parser.read_resources(data)
}

/// The fixed header at the start of every resource fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Offset of the data section from the start of the fork
    pub data_offset: u32,
    /// Offset of the resource map from the start of the fork
    pub map_offset: u32,
    /// Length of the data section
    pub data_length: u32,
    /// Length of the resource map
    pub map_length: u32,
}

impl Header {
    /// Read and validate the header against the buffer length.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedHeader`] if fewer than 16 bytes are available, and
    /// [`Error::InvalidHeader`] if either section extends past the end of `data`.
    pub fn read(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::TruncatedHeader(data.len()));
        }

        let mut parser = Parser::new(data);
        let header = Header {
            data_offset: parser.read_be::<u32>()?,
            map_offset: parser.read_be::<u32>()?,
            data_length: parser.read_be::<u32>()?,
            map_length: parser.read_be::<u32>()?,
        };

        let available = data.len() as u64;
        if header.data_end() > available {
            return Err(invalid_header_error!(
                "Data section {}+{} exceeds the fork length {}",
                header.data_offset,
                header.data_length,
                available
            ));
        }
        if u64::from(header.map_offset) + u64::from(header.map_length) > available {
            return Err(invalid_header_error!(
                "Resource map {}+{} exceeds the fork length {}",
                header.map_offset,
                header.map_length,
                available
            ));
        }

        Ok(header)
    }

    /// Absolute offset one past the last byte of the data section.
    #[must_use]
    pub fn data_end(&self) -> u64 {
        u64::from(self.data_offset) + u64::from(self.data_length)
    }
}

/// One entry of the type list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry {
    /// Type shared by all resources in the reference list
    pub type_code: TypeCode,
    /// Number of resources of this type, already incremented
    pub count: u32,
    /// Offset of the reference list from the start of the type list
    pub reference_list_offset: u16,
}

/// One entry of a reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReferenceEntry {
    id: i16,
    name_offset: u16,
    attributes: u8,
    data_offset: u32,
}

impl ReferenceEntry {
    fn read(parser: &mut Parser<'_>) -> Result<Self> {
        let id = parser.read_be::<i16>()?;
        let name_offset = parser.read_be::<u16>()?;
        // Attributes and data offset share one word
        let packed = parser.read_be::<u32>()?;
        let _handle = parser.read_be::<u32>()?;

        Ok(ReferenceEntry {
            id,
            name_offset,
            attributes: (packed >> 24) as u8,
            data_offset: packed & 0x00FF_FFFF,
        })
    }
}

/// Low-level resource fork decoder that exposes the header and map.
///
/// [`ResourceForkParser::parse`] decodes everything up to and including the type list;
/// [`ResourceForkParser::read_resources`] resolves the individual resources. Most callers want
/// [`parse_resource_fork`] or [`crate::ResourceFork`] instead.
///
/// # Examples
///
/// ```rust,no_run
/// use rsrcfork::ResourceForkParser;
///
/// let data = std::fs::read("Application.rsrc")?;
/// let parser = ResourceForkParser::parse(&data)?;
///
/// println!("Data section: {} bytes at {}", parser.header.data_length, parser.header.data_offset);
/// for entry in &parser.types {
///     println!("{}: {} resources", entry.type_code, entry.count);
/// }
///
/// let resources = parser.read_resources(&data)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceForkParser {
    /// The fork header
    pub header: Header,
    /// Attribute word of the map
    pub attributes: MapAttributes,
    /// Absolute offset of the type list; reference list offsets are relative to it
    pub type_list_offset: usize,
    /// Absolute offset of the name list
    pub name_list_offset: usize,
    /// The type list, in map order
    pub types: Vec<TypeEntry>,
}

impl ResourceForkParser {
    /// Parse the header, the resource map and the type list.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedHeader`], [`Error::InvalidHeader`] or [`Error::OutOfRange`]
    /// when the header or the map are truncated or inconsistent.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = Header::read(data)?;
        let map_offset = header.map_offset as usize;

        let mut parser = Parser::new(data);
        parser.seek(map_offset)?;
        parser.advance_by(MAP_RESERVED_SIZE)?;

        let attributes = MapAttributes::from_bits_retain(parser.read_be::<u16>()?);
        let type_list_offset = map_offset + usize::from(parser.read_be::<u16>()?);
        let name_list_offset = map_offset + usize::from(parser.read_be::<u16>()?);
        let type_count = expand_count(parser.read_be::<u16>()?, "type")?;

        log::debug!(
            "Resource fork: data {}+{}, map {}+{}, {} types",
            header.data_offset,
            header.data_length,
            header.map_offset,
            header.map_length,
            type_count
        );

        parser.seek(type_list_offset)?;
        // The canonical layout starts the type list with the count word read above
        if type_list_offset == map_offset + MAP_TYPE_COUNT_OFFSET {
            parser.advance_by(2)?;
        }

        let mut types = Vec::with_capacity(type_count as usize);
        for _ in 0..type_count {
            let type_code = TypeCode::new(parser.read_be::<u32>()?.to_be_bytes());
            let count = expand_count(parser.read_be::<u16>()?, "resource")?;
            let reference_list_offset = parser.read_be::<u16>()?;

            types.push(TypeEntry {
                type_code,
                count,
                reference_list_offset,
            });
        }

        Ok(ResourceForkParser {
            header,
            attributes,
            type_list_offset,
            name_list_offset,
            types,
        })
    }

    /// Resolve every resource named by the type list and return them in on-disk data order.
    ///
    /// `data` must be the same buffer that was passed to [`ResourceForkParser::parse`].
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] for reference lists or names outside the buffer,
    /// [`Error::DataOutOfRange`] for payloads outside the data section and
    /// [`Error::DuplicateResource`] for repeated identities.
    pub fn read_resources(&self, data: &[u8]) -> Result<Vec<Resource>> {
        let mut parser = Parser::new(data);
        let mut seen = HashSet::new();
        let mut resources = Vec::new();

        for entry in &self.types {
            let Some(reference_list) =
                self.type_list_offset.checked_add(usize::from(entry.reference_list_offset))
            else {
                return Err(out_of_range_error!());
            };
            parser.seek(reference_list)?;

            let mut references = Vec::with_capacity(entry.count as usize);
            for _ in 0..entry.count {
                references.push(ReferenceEntry::read(&mut parser)?);
            }

            for reference in references {
                if !seen.insert((entry.type_code, reference.id)) {
                    return Err(Error::DuplicateResource {
                        type_code: entry.type_code,
                        id: reference.id,
                    });
                }

                let resource = self.read_resource(&mut parser, entry.type_code, reference)?;
                log::trace!(
                    "Resource {} #{} at {}: {} bytes",
                    resource.type_code(),
                    resource.id(),
                    resource.data_offset(),
                    resource.data().len()
                );
                resources.push(resource);
            }
        }

        // Map order is type-grouped, the published order is the data section's
        resources.sort_by_key(Resource::data_offset);
        Ok(resources)
    }

    fn read_resource(
        &self,
        parser: &mut Parser<'_>,
        type_code: TypeCode,
        reference: ReferenceEntry,
    ) -> Result<Resource> {
        let name = if reference.name_offset == NO_NAME {
            None
        } else {
            parser.seek(self.name_list_offset + usize::from(reference.name_offset))?;
            Some(parser.read_pascal_string()?)
        };

        let limit = self.header.data_end();
        let prefix_start = u64::from(self.header.data_offset) + u64::from(reference.data_offset);
        let payload_start = prefix_start + 4;
        let out_of_range = |end: u64| Error::DataOutOfRange {
            type_code,
            id: reference.id,
            end,
            limit,
        };

        if payload_start > limit {
            return Err(out_of_range(payload_start));
        }
        parser.seek(prefix_start as usize)?;
        let length = parser.read_be::<u32>()?;

        let payload_end = payload_start + u64::from(length);
        if payload_end > limit {
            return Err(out_of_range(payload_end));
        }
        let payload = parser.read_bytes(length as usize)?;

        Ok(Resource::new(
            type_code,
            reference.id,
            name,
            reference.attributes,
            payload.to_vec(),
        )
        .with_data_offset(payload_start as usize))
    }
}

/// Turn a stored "count minus one" into the real count.
fn expand_count(stored: u16, what: &str) -> Result<u32> {
    if stored == COUNT_OVERFLOW {
        return Err(invalid_header_error!(
            "The {} count uses the reserved value 0x{:04X}",
            what,
            stored
        ));
    }

    Ok(u32::from(stored) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::ForkBuilder;

    #[test]
    fn header_fields() {
        let data = ForkBuilder::new()
            .resource(*b"STR ", 128, None, 0, b"abc")
            .build();
        let parser = ResourceForkParser::parse(&data).unwrap();

        assert_eq!(parser.header.data_offset, 256);
        assert_eq!(parser.header.data_length, 7);
        assert_eq!(parser.header.map_offset, 263);
        assert_eq!(parser.header.map_length as usize, data.len() - 263);
        assert_eq!(parser.types.len(), 1);
        assert_eq!(parser.types[0].type_code, TypeCode::new(*b"STR "));
        assert_eq!(parser.types[0].count, 1);
    }

    #[test]
    fn truncated_header() {
        for len in 0..HEADER_SIZE {
            let data = vec![0u8; len];
            assert!(matches!(
                parse_resource_fork(&data),
                Err(Error::TruncatedHeader(n)) if n == len
            ));
        }
    }

    #[test]
    fn header_sections_must_fit() {
        let mut data = ForkBuilder::new()
            .resource(*b"STR ", 1, None, 0, b"x")
            .build();
        let len = data.len() as u32;

        // Data length reaching past the end
        data[8..12].copy_from_slice(&len.to_be_bytes());
        assert!(matches!(
            parse_resource_fork(&data),
            Err(Error::InvalidHeader { .. })
        ));

        // Map length reaching past the end
        let mut data = ForkBuilder::new()
            .resource(*b"STR ", 1, None, 0, b"x")
            .build();
        data[12..16].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            parse_resource_fork(&data),
            Err(Error::InvalidHeader { .. })
        ));

        // Offsets that overflow 32 bits
        let mut data = vec![0u8; 16];
        data[0..4].copy_from_slice(&u32::MAX.to_be_bytes());
        data[8..12].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            parse_resource_fork(&data),
            Err(Error::InvalidHeader { .. })
        ));
    }

    #[test]
    fn map_outside_buffer() {
        // A zero-length map at the very end leaves nothing to read
        let mut data = vec![0u8; 32];
        data[4..8].copy_from_slice(&32_u32.to_be_bytes());
        assert!(matches!(parse_resource_fork(&data), Err(Error::OutOfRange)));
    }

    #[test]
    fn reserved_type_count() {
        let mut data = ForkBuilder::new()
            .resource(*b"STR ", 1, None, 0, b"x")
            .build();
        let map = u32::from_be_bytes(data[4..8].try_into().unwrap()) as usize;
        data[map + 28..map + 30].copy_from_slice(&[0xFF, 0xFF]);

        assert!(matches!(
            parse_resource_fork(&data),
            Err(Error::InvalidHeader { .. })
        ));
    }

    #[test]
    fn reserved_resource_count() {
        let mut data = ForkBuilder::new()
            .resource(*b"STR ", 1, None, 0, b"x")
            .build();
        let map = u32::from_be_bytes(data[4..8].try_into().unwrap()) as usize;
        // First type entry follows the 30 byte map header
        data[map + 34..map + 36].copy_from_slice(&[0xFF, 0xFF]);

        assert!(matches!(
            parse_resource_fork(&data),
            Err(Error::InvalidHeader { .. })
        ));
    }

    #[test]
    fn packed_attributes_and_offset() {
        let data = ForkBuilder::new()
            .resource(*b"ICN#", 128, None, 0x00, &[0u8; 0x20])
            .resource(*b"ICN#", 129, None, 0xFF, b"second")
            .build();
        let resources = parse_resource_fork(&data).unwrap();

        assert_eq!(resources[0].attributes(), 0x00);
        assert_eq!(resources[1].attributes(), 0xFF);
        // 0x20 byte payload plus its 4 byte prefix precede the second resource
        assert_eq!(resources[1].data_offset(), 256 + 0x24 + 4);
        assert_eq!(resources[1].data(), b"second");
    }

    #[test]
    fn non_canonical_type_list_offset() {
        let data = ForkBuilder::new()
            .resource(*b"CODE", 0, None, 0, b"jump")
            .resource(*b"CODE", 1, Some("Main"), 0, b"code")
            .type_list_after_count()
            .build();
        let resources = parse_resource_fork(&data).unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[1].name(), Some("Main"));
    }

    #[test]
    fn zero_length_payload() {
        let data = ForkBuilder::new()
            .resource(*b"DATA", 5, None, 0, b"")
            .resource(*b"DATA", 6, None, 0, b"z")
            .build();
        let resources = parse_resource_fork(&data).unwrap();

        assert!(resources[0].data().is_empty());
        assert_eq!(resources[1].data(), b"z");
    }

    #[test]
    fn payload_beyond_data_section() {
        let mut data = ForkBuilder::new()
            .resource(*b"STR ", 128, None, 0, b"abcd")
            .build();
        // Grow the declared payload length by one byte, into the map
        data[256..260].copy_from_slice(&5_u32.to_be_bytes());

        match parse_resource_fork(&data) {
            Err(Error::DataOutOfRange {
                type_code,
                id,
                end,
                limit,
            }) => {
                assert_eq!(type_code, TypeCode::new(*b"STR "));
                assert_eq!(id, 128);
                assert_eq!(end, 256 + 4 + 5);
                assert_eq!(limit, 256 + 8);
            }
            other => panic!("expected DataOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn data_offset_beyond_data_section() {
        let data = ForkBuilder::new()
            .resource(*b"STR ", 128, None, 0, b"abcd")
            .data_offset_override(0, 0x00_FF_FF)
            .build();

        assert!(matches!(
            parse_resource_fork(&data),
            Err(Error::DataOutOfRange { .. })
        ));
    }

    #[test]
    fn name_outside_buffer() {
        let data = ForkBuilder::new()
            .resource(*b"STR ", 128, Some("name"), 0, b"abcd")
            .name_offset_override(0, 0x7FFF)
            .build();

        assert!(matches!(parse_resource_fork(&data), Err(Error::OutOfRange)));
    }

    #[test]
    fn duplicate_resource() {
        let data = ForkBuilder::new()
            .resource(*b"STR ", 128, None, 0, b"one")
            .resource(*b"STR ", 128, None, 0, b"two")
            .build();

        match parse_resource_fork(&data) {
            Err(Error::DuplicateResource { type_code, id }) => {
                assert_eq!(type_code, TypeCode::new(*b"STR "));
                assert_eq!(id, 128);
            }
            other => panic!("expected DuplicateResource, got {other:?}"),
        }
    }

    #[test]
    fn same_id_in_different_types() {
        let data = ForkBuilder::new()
            .resource(*b"STR ", 128, None, 0, b"one")
            .resource(*b"CODE", 128, None, 0, b"two")
            .build();

        assert_eq!(parse_resource_fork(&data).unwrap().len(), 2);
    }
}
