//! Generic encode/decode over [`BinaryWriter`] and [`BinaryReader`].
//!
//! Implement [`Encode`] and [`Decode`] for a record type by writing its
//! fields in a fixed order; the wire format has no field tags, so both impls
//! must agree on that order.
//!
//! ```
//! use binbuf::{BinaryReader, BinaryWriter, CodecError, Decode, Encode};
//!
//! #[derive(Debug, PartialEq)]
//! struct Score {
//!     player: String,
//!     points: u32,
//! }
//!
//! impl Encode for Score {
//!     fn encode(&self, writer: &mut BinaryWriter) -> Result<(), CodecError> {
//!         writer.write(&self.player)?;
//!         writer.write(&self.points)
//!     }
//! }
//!
//! impl Decode for Score {
//!     fn decode(reader: &mut BinaryReader) -> Result<Self, CodecError> {
//!         Ok(Score {
//!             player: reader.read()?,
//!             points: reader.read()?,
//!         })
//!     }
//! }
//!
//! let score = Score { player: "ada".into(), points: 42 };
//! let mut writer = BinaryWriter::new();
//! writer.write(&score).unwrap();
//! let mut reader = BinaryReader::from_writer(&writer);
//! assert_eq!(reader.read::<Score>().unwrap(), score);
//! ```

use alloc::string::String;

use crate::{error::CodecError, reader::BinaryReader, writer::BinaryWriter};

/// A value with a fixed binary encoding.
pub trait Encode {
    /// Appends the encoding of `self` to `writer`.
    ///
    /// # Errors
    ///
    /// Whatever the underlying writes return, e.g.
    /// [`CodecError::StringTooLong`].
    fn encode(&self, writer: &mut BinaryWriter) -> Result<(), CodecError>;
}

/// A value that can be read back from its [`Encode`] form.
pub trait Decode: Sized {
    /// Reads one value from `reader`.
    ///
    /// # Errors
    ///
    /// Whatever the underlying reads return, e.g.
    /// [`CodecError::OutOfRange`].
    fn decode(reader: &mut BinaryReader) -> Result<Self, CodecError>;
}

macro_rules! impl_codec {
    ($ty:ty, $write_fn:ident, $read_fn:ident) => {
        impl Encode for $ty {
            fn encode(&self, writer: &mut BinaryWriter) -> Result<(), CodecError> {
                writer.$write_fn(*self);
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode(reader: &mut BinaryReader) -> Result<Self, CodecError> {
                reader.$read_fn()
            }
        }
    };
}
impl_codec!(u8, write_byte, read_byte);
impl_codec!(i8, write_i8, read_i8);
impl_codec!(bool, write_bool, read_bool);
impl_codec!(char, write_char, read_char);
impl_codec!(u16, write_u16, read_u16);
impl_codec!(i16, write_i16, read_i16);
impl_codec!(u32, write_u32, read_u32);
impl_codec!(i32, write_i32, read_i32);
impl_codec!(u64, write_u64, read_u64);
impl_codec!(i64, write_i64, read_i64);

impl Encode for str {
    fn encode(&self, writer: &mut BinaryWriter) -> Result<(), CodecError> {
        writer.write_string(self)
    }
}

impl Encode for String {
    fn encode(&self, writer: &mut BinaryWriter) -> Result<(), CodecError> {
        writer.write_string(self)
    }
}

impl Decode for String {
    fn decode(reader: &mut BinaryReader) -> Result<Self, CodecError> {
        reader.read_string()
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, writer: &mut BinaryWriter) -> Result<(), CodecError> {
        (**self).encode(writer)
    }
}
