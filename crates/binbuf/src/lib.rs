//! A growable byte buffer with a big-endian binary reader and writer.
//!
//! Values are encoded with no framing of their own: integers are written
//! most significant byte first, `bool` and `char` take one byte, and strings
//! are a `u16` byte count followed by UTF-8. The reader must decode values in
//! the same order the writer encoded them.
//!
//! ```rust
//! use binbuf::{BinaryReader, BinaryWriter};
//!
//! let mut writer = BinaryWriter::new();
//! writer.write_u32(0x0102_0304);
//! writer.write_string("hello").unwrap();
//! writer.write_bool(true);
//!
//! let mut reader = BinaryReader::from_writer(&writer);
//! assert_eq!(reader.read_u32(), Ok(0x0102_0304));
//! assert_eq!(reader.read_string().unwrap(), "hello");
//! assert_eq!(reader.read_bool(), Ok(true));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod codec;
mod error;
mod options;
mod reader;
mod scratch;
mod writer;


pub use buffer::BinaryBuffer;
pub use codec::{Decode, Encode};
pub use error::CodecError;
pub use options::{
    BufferOptions, DEFAULT_HIGH_WATER_MARK, DEFAULT_INITIAL_CAPACITY,
    DEFAULT_STRING_SCRATCH_CAPACITY,
};
pub use reader::BinaryReader;
pub use writer::{BinaryWriter, MAX_STRING_LEN};
