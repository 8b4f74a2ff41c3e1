//! Resource identity and payload types.
//!
//! # Key Types
//! - [`TypeCode`] - Four-byte resource type identifier (`'CODE'`, `'STR '`, ...)
//! - [`Resource`] - One decoded resource: identity, attributes and payload
//! - [`ResourceAttributes`] - Per-resource attribute byte
//! - [`MapAttributes`] - Attribute word of the resource map as a whole

use std::fmt;

use bitflags::bitflags;

/// Sentinel stored in a reference entry's name offset when the resource has no name.
pub const NO_NAME: u16 = 0xFFFF;

/// A four-byte resource type identifier.
///
/// Type codes are conventionally four printable Mac OS Roman characters (`'CODE'`, `'STR '`,
/// `'ICN#'`), but any byte sequence is valid. Equality, ordering and hashing always operate on
/// the raw bytes; [`TypeCode::printable_form`] exists for display only.
///
/// # Examples
///
/// ```rust
/// use rsrcfork::TypeCode;
///
/// let code = TypeCode::new(*b"STR ");
/// assert_eq!(code.printable_form(), "STR ");
/// assert_eq!(code.as_u32(), 0x5354_5220);
///
/// let odd = TypeCode::new([0x01, b'A', b'\\', 0xFF]);
/// assert_eq!(odd.printable_form(), "\\x01A\\\\\\xff");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeCode([u8; 4]);

impl TypeCode {
    /// Create a type code from its four bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        TypeCode(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Returns the code as the big-endian `u32` (`OSType`) it is stored as.
    #[must_use]
    pub const fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Render the code for diagnostics and UI labels.
    ///
    /// Printable ASCII (space through tilde) is emitted as-is, with the exception of the
    /// backslash which is doubled. Every other byte is emitted as `\xHH`. The rendering is
    /// injective: two distinct codes never produce the same string.
    #[must_use]
    pub fn printable_form(&self) -> String {
        let mut rendered = String::with_capacity(4);
        for &byte in &self.0 {
            match byte {
                b'\\' => rendered.push_str("\\\\"),
                0x20..=0x7E => rendered.push(char::from(byte)),
                _ => rendered.push_str(&format!("\\x{byte:02x}")),
            }
        }
        rendered
    }
}

impl From<[u8; 4]> for TypeCode {
    fn from(bytes: [u8; 4]) -> Self {
        TypeCode(bytes)
    }
}

impl From<u32> for TypeCode {
    fn from(value: u32) -> Self {
        TypeCode(value.to_be_bytes())
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.printable_form())
    }
}

impl fmt::Debug for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeCode('{}')", self.printable_form())
    }
}

bitflags! {
    /// Attribute byte of a single resource.
    ///
    /// The decoder preserves the byte verbatim; these flags are a convenience for callers.
    /// Unknown bits are retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResourceAttributes: u8 {
        /// Load into the system heap instead of the application heap
        const SYS_HEAP = 0x40;
        /// The resource may be purged from memory
        const PURGEABLE = 0x20;
        /// The resource is locked in memory
        const LOCKED = 0x10;
        /// The resource is protected from modification
        const PROTECTED = 0x08;
        /// Load the resource as soon as the fork is opened
        const PRELOAD = 0x04;
        /// The resource has been changed in memory
        const CHANGED = 0x02;
        /// The payload is compressed
        const COMPRESSED = 0x01;
    }
}

bitflags! {
    /// Attribute word of the resource map.
    ///
    /// Unknown bits are retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MapAttributes: u16 {
        /// The fork was opened read-only
        const READ_ONLY = 0x0080;
        /// The fork should be compacted on the next update
        const COMPACT = 0x0040;
        /// The map has changed and should be written back
        const CHANGED = 0x0020;
    }
}

/// A single resource decoded from a resource fork.
///
/// Resources are immutable once decoded. The `(type_code, id)` pair identifies a resource
/// uniquely within the fork it came from; IDs alone repeat across types.
///
/// # Examples
///
/// ```rust
/// use rsrcfork::{Resource, ResourceAttributes, TypeCode};
///
/// let resource = Resource::new(TypeCode::new(*b"STR "), 128, Some("Greeting".into()), 0x20, b"Hi".to_vec());
/// assert_eq!(resource.id(), 128);
/// assert_eq!(resource.name(), Some("Greeting"));
/// assert!(resource.flags().contains(ResourceAttributes::PURGEABLE));
/// assert_eq!(resource.data(), b"Hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    type_code: TypeCode,
    id: i16,
    name: Option<String>,
    attributes: u8,
    data: Vec<u8>,
    /// Absolute offset of the first payload byte within the fork
    data_offset: usize,
}

impl Resource {
    /// Create a resource that was not read from a fork.
    ///
    /// Its [`Resource::data_offset`] is zero.
    #[must_use]
    pub fn new(
        type_code: TypeCode,
        id: i16,
        name: Option<String>,
        attributes: u8,
        data: Vec<u8>,
    ) -> Self {
        Resource {
            type_code,
            id,
            name,
            attributes,
            data,
            data_offset: 0,
        }
    }

    pub(crate) fn with_data_offset(mut self, data_offset: usize) -> Self {
        self.data_offset = data_offset;
        self
    }

    /// Returns the type code.
    #[must_use]
    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// Returns the ID, unique only within the resource's type.
    #[must_use]
    pub fn id(&self) -> i16 {
        self.id
    }

    /// Returns the name, if the resource has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the raw attribute byte.
    #[must_use]
    pub fn attributes(&self) -> u8 {
        self.attributes
    }

    /// Returns the attribute byte as flags.
    #[must_use]
    pub fn flags(&self) -> ResourceAttributes {
        ResourceAttributes::from_bits_retain(self.attributes)
    }

    /// Returns the payload.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the resource and returns its payload.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the absolute offset of the payload within the fork it was decoded from.
    #[must_use]
    pub fn data_offset(&self) -> usize {
        self.data_offset
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn printable_form_plain() {
        assert_eq!(TypeCode::new(*b"CODE").printable_form(), "CODE");
        assert_eq!(TypeCode::new(*b"ICN#").to_string(), "ICN#");
        assert_eq!(TypeCode::new(*b"STR ").printable_form(), "STR ");
    }

    #[test]
    fn printable_form_escapes() {
        let code = TypeCode::new([0x01, b'C', b'O', b'D']);
        let rendered = code.printable_form();
        assert_eq!(rendered, "\\x01COD");
        assert!(!rendered.chars().any(char::is_control));

        assert_eq!(TypeCode::new([0x00; 4]).printable_form(), "\\x00\\x00\\x00\\x00");
        assert_eq!(TypeCode::new([0x7F, 0x80, b'~', b' ']).printable_form(), "\\x7f\\x80~ ");
    }

    #[test]
    fn printable_form_is_injective() {
        // A literal backslash sequence must not collide with an escaped byte
        let escaped = TypeCode::new([0x01, b'a', b'b', b'c']);
        let literal = TypeCode::new([b'\\', b'x', b'0', b'1']);
        assert_ne!(escaped.printable_form(), literal.printable_form());
        assert_eq!(literal.printable_form(), "\\\\x01");

        let mut seen = HashSet::new();
        for first in [0x00_u8, 0x01, b'\\', b'x', b'0', b'1', 0x7F, 0xFF] {
            for second in [0x00_u8, 0x01, b'\\', b'x', b'0', b'1', 0x7F, 0xFF] {
                for third in [b'\\', b'x', b'0', b'1'] {
                    let code = TypeCode::new([first, second, third, b'1']);
                    assert!(seen.insert(code.printable_form()), "collision for {code:?}");
                }
            }
        }
    }

    #[test]
    fn conversions() {
        let code = TypeCode::from(0x434F_4445_u32);
        assert_eq!(code, TypeCode::new(*b"CODE"));
        assert_eq!(code.as_u32(), 0x434F_4445);
        assert_eq!(code.as_bytes(), b"CODE");
        assert_eq!(TypeCode::from(*b"CODE"), code);
        assert_eq!(format!("{code:?}"), "TypeCode('CODE')");
    }

    #[test]
    fn equality_is_bytewise() {
        assert_ne!(TypeCode::new(*b"code"), TypeCode::new(*b"CODE"));
        assert!(TypeCode::new(*b"CODE") < TypeCode::new(*b"STR "));
    }

    #[test]
    fn resource_accessors() {
        let resource = Resource::new(
            TypeCode::new(*b"CODE"),
            -4096,
            None,
            0x84,
            vec![0x4E, 0x75],
        )
        .with_data_offset(0x104);

        assert_eq!(resource.type_code(), TypeCode::new(*b"CODE"));
        assert_eq!(resource.id(), -4096);
        assert_eq!(resource.name(), None);
        assert_eq!(resource.attributes(), 0x84);
        assert_eq!(resource.data_offset(), 0x104);

        // Bit 7 has no named flag and must survive
        let flags = resource.flags();
        assert!(flags.contains(ResourceAttributes::PRELOAD));
        assert_eq!(flags.bits(), 0x84);

        assert_eq!(resource.into_data(), vec![0x4E, 0x75]);
    }

    #[test]
    fn map_attributes() {
        let attributes = MapAttributes::from_bits_retain(0x00A1);
        assert!(attributes.contains(MapAttributes::READ_ONLY));
        assert!(attributes.contains(MapAttributes::CHANGED));
        assert!(!attributes.contains(MapAttributes::COMPACT));
        assert_eq!(attributes.bits(), 0x00A1);
    }
}
