//! Low-level byte stream cursor for resource fork decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor over an immutable
//! byte slice. Every structure of a resource fork (header, map, type list, reference lists,
//! name list and data section) is read through it.
//!
//! # Architecture
//!
//! The parser maintains a position within a borrowed byte slice and provides:
//!
//! - **Position tracking** - Sequential reads advance the cursor
//! - **Random access** - [`crate::file::parser::Parser::seek`] jumps to absolute offsets
//! - **Bounds checking** - Every operation validates the requested span first, there are no
//!   partial reads
//! - **Big-endian reading** - All resource fork values are stored big-endian
//!
//! # Key Components
//!
//! ## Navigation Methods
//! - [`crate::file::parser::Parser::seek`] - Move to an absolute position
//! - [`crate::file::parser::Parser::advance_by`] - Skip a number of bytes
//! - [`crate::file::parser::Parser::pos`] - Get the current position
//!
//! ## Data Access Methods
//! - [`crate::file::parser::Parser::read_be`] - Read primitive types (big-endian)
//! - [`crate::file::parser::Parser::read_u24_be`] - Read packed 24-bit values
//! - [`crate::file::parser::Parser::read_bytes`] - Borrow a fixed-length slice
//! - [`crate::file::parser::Parser::read_pascal_bytes`] - Borrow a length-prefixed slice
//! - [`crate::file::parser::Parser::read_pascal_string`] - Read a length-prefixed Mac OS Roman string
//!
//! # Usage Examples
//!
//! ```rust
//! use rsrcfork::Parser;
//!
//! let data = [0x00, 0x00, 0x01, 0x00, 0x05, b'H', b'e', b'l', b'l', b'o'];
//! let mut parser = Parser::new(&data);
//!
//! let data_offset = parser.read_be::<u32>()?;
//! assert_eq!(data_offset, 0x100);
//!
//! let name = parser.read_pascal_string()?;
//! assert_eq!(name, "Hello");
//!
//! parser.seek(2)?;
//! assert_eq!(parser.read_be::<u8>()?, 0x01);
//! # Ok::<(), rsrcfork::Error>(())
//! ```

use encoding_rs::MACINTOSH;

use crate::{
    file::io::{read_be_at, read_u24_be_at, ForkIO},
    Result,
};

/// A cursor-based reader over an immutable byte buffer.
///
/// `Parser` never mutates the underlying data. All reads fail with
/// [`crate::Error::OutOfRange`] when the requested span would exceed the buffer, in which case
/// the position is left unchanged.
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new `Parser` positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the underlying buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move the cursor to an absolute position.
    ///
    /// Seeking to exactly the end of the buffer is permitted, the next read will fail.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `pos` is beyond the buffer length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(out_of_range_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the cursor forward by `step` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the new position would be beyond the buffer.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        let end = self.calc_end_position(step)?;
        self.position = end;
        Ok(())
    }

    /// Returns the current position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Read a type `T` from the current position in big-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if reading would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rsrcfork::Parser;
    /// let data = [0xFF, 0xFE, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// let value: i16 = parser.read_be()?;
    /// assert_eq!(value, -2);
    /// assert_eq!(parser.pos(), 2);
    /// # Ok::<(), rsrcfork::Error>(())
    /// ```
    pub fn read_be<T: ForkIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Read a 24-bit big-endian unsigned value and advance the position by three bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than three bytes remain.
    pub fn read_u24_be(&mut self) -> Result<u32> {
        read_u24_be_at(self.data, &mut self.position)
    }

    /// `position + length`, checked for overflow and against the buffer end.
    fn calc_end_position(&self, length: usize) -> Result<usize> {
        let end = self
            .position
            .checked_add(length)
            .ok_or(out_of_range_error!())?;

        if end > self.data.len() {
            return Err(out_of_range_error!());
        }

        Ok(end)
    }

    /// Borrow `length` bytes from the current position and advance past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if reading `length` bytes would exceed the data.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rsrcfork::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
    /// let mut parser = Parser::new(&data);
    ///
    /// let chunk = parser.read_bytes(3)?;
    /// assert_eq!(chunk, &[0x01, 0x02, 0x03]);
    /// assert_eq!(parser.pos(), 3);
    /// assert!(parser.read_bytes(3).is_err());
    /// # Ok::<(), rsrcfork::Error>(())
    /// ```
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end = self.calc_end_position(length)?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Borrow a length-prefixed byte string: one length byte followed by that many bytes,
    /// without a terminator.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the length byte or the string bytes are missing.
    /// The position is unchanged on failure.
    pub fn read_pascal_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.position;
        let length = self.read_be::<u8>()?;
        match self.read_bytes(usize::from(length)) {
            Ok(bytes) => Ok(bytes),
            Err(error) => {
                self.position = start;
                Err(error)
            }
        }
    }

    /// Read a length-prefixed string and decode it from Mac OS Roman.
    ///
    /// Bytes below 0x80 are ASCII; the upper half maps through the Macintosh encoding, so the
    /// result is always valid and never lossy.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the length byte or the string bytes are missing.
    pub fn read_pascal_string(&mut self) -> Result<String> {
        let bytes = self.read_pascal_bytes()?;
        Ok(MACINTOSH.decode_without_bom_handling(bytes).0.into_owned())
    }
}
