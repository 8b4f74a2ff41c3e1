//! Low-level big-endian reading utilities for resource fork parsing.
//!
//! Every multi-byte value in a resource fork is stored big-endian. This module provides
//! bounds-checked conversion from byte slices to primitive integers, and is the layer the
//! [`crate::file::parser::Parser`] cursor is built on.
//!
//! # Key Components
//!
//! - [`crate::file::io::ForkIO`] - Trait defining big-endian decoding for primitive types
//! - [`crate::file::io::read_be`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_be_at`] - Read a value at an offset, advancing the offset
//! - [`crate::file::io::read_u24_be_at`] - Read a packed 24-bit value, advancing the offset
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use rsrcfork::file::io::read_be_at;
//!
//! let data = [0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
//! let mut offset = 0;
//!
//! let first: u16 = read_be_at(&data, &mut offset)?;  // offset: 0 -> 2
//! let second: u32 = read_be_at(&data, &mut offset)?; // offset: 2 -> 6
//!
//! assert_eq!(first, 1);
//! assert_eq!(second, 2);
//! # Ok::<(), rsrcfork::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Error::OutOfRange`] if the buffer holds fewer bytes than the
//! requested value needs. The offset is left untouched on failure.

use crate::Result;

/// Trait for type-specific, big-endian decoding of primitive values.
///
/// Each implementation names the fixed-size byte array it is decoded from through the `Bytes`
/// associated type (e.g. `[u8; 4]` for `u32`).
pub trait ForkIO: Sized {
    /// Byte array representation of this type
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte array in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_fork_io {
    ($($ty:ty),*) => {
        $(
            impl ForkIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }
            }
        )*
    };
}

impl_fork_io!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Read a big-endian value from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfRange`] if `data` is shorter than `T`.
pub fn read_be<T: ForkIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_be_at(data, &mut offset)
}

/// Read a big-endian value at `offset`, advancing `offset` past it on success.
///
/// # Errors
/// Returns [`crate::Error::OutOfRange`] if fewer than `size_of::<T>()` bytes remain at `offset`.
pub fn read_be_at<T: ForkIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(out_of_range_error!());
    };
    if end > data.len() {
        return Err(out_of_range_error!());
    }

    let Ok(bytes) = data[*offset..end].try_into() else {
        return Err(out_of_range_error!());
    };

    *offset = end;
    Ok(T::from_be_bytes(bytes))
}

/// Read a 24-bit big-endian value at `offset`, advancing `offset` by three bytes on success.
///
/// # Errors
/// Returns [`crate::Error::OutOfRange`] if fewer than three bytes remain at `offset`.
pub fn read_u24_be_at(data: &[u8], offset: &mut usize) -> Result<u32> {
    let Some(end) = offset.checked_add(3) else {
        return Err(out_of_range_error!());
    };
    if end > data.len() {
        return Err(out_of_range_error!());
    }

    let bytes = &data[*offset..end];
    *offset = end;
    Ok(u32::from(bytes[0]) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[2]))
}
