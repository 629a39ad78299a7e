use alloc::vec::Vec;

use crate::{
    buffer::BinaryBuffer, codec::Encode, error::CodecError, options::BufferOptions,
    scratch::StringScratch,
};

/// Longest string payload, in UTF-8 bytes, that fits the `u16` prefix.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Big-endian encoder on top of [`BinaryBuffer`].
///
/// Every multi-byte integer is written most significant byte first. Strings
/// are written as a `u16` byte count followed by their UTF-8 bytes. Nothing
/// else is written: no tags, no headers, so the reading side has to decode
/// values in the order they were encoded.
///
/// ```
/// use binbuf::BinaryWriter;
///
/// let mut writer = BinaryWriter::new();
/// writer.write_u32(0x0102_0304);
/// writer.write_string("hi").unwrap();
/// assert_eq!(writer.to_bytes(), [1, 2, 3, 4, 0, 2, b'h', b'i']);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    buffer: BinaryBuffer,
    scratch: StringScratch,
}

impl From<BinaryBuffer> for BinaryWriter {
    fn from(buffer: BinaryBuffer) -> Self {
        Self::from_buffer(buffer)
    }
}

impl BinaryWriter {
    /// Creates a writer over an empty 4-byte buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer over an empty buffer configured by `options`.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            buffer: BinaryBuffer::with_options(options),
            scratch: StringScratch::with_capacity(options.string_scratch_capacity),
        }
    }

    /// Creates a writer that overwrites `bytes` from the start, growing past
    /// them as needed.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_buffer(BinaryBuffer::from_bytes(bytes))
    }

    /// Creates a writer that continues at `buffer`'s current cursor.
    #[must_use]
    pub fn from_buffer(buffer: BinaryBuffer) -> Self {
        Self {
            buffer,
            scratch: StringScratch::default(),
        }
    }

    /// Number of bytes written so far, or the cursor after a seek.
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &BinaryBuffer {
        &self.buffer
    }

    /// Consumes the writer and returns its buffer.
    #[must_use]
    pub fn into_buffer(self) -> BinaryBuffer {
        self.buffer
    }

    /// A copy of exactly the bytes written so far.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_bytes()
    }

    /// Writes one raw byte.
    pub fn write_byte(&mut self, value: u8) {
        self.buffer.write_byte(value);
    }

    /// Writes `true` as `1` and `false` as `0`.
    pub fn write_bool(&mut self, value: bool) {
        self.buffer.write_byte(u8::from(value));
    }

    /// Writes the low eight bits of `value`'s code point.
    ///
    /// Characters above U+00FF do not survive the trip; the wire `char` is a
    /// single byte.
    pub fn write_char(&mut self, value: char) {
        self.buffer.write_byte(u32::from(value).to_be_bytes()[3]);
    }

    /// Writes an `i8` as its two's-complement byte.
    pub fn write_i8(&mut self, value: i8) {
        self.buffer.write_byte(value.to_be_bytes()[0]);
    }

    /// Writes two bytes, most significant first.
    pub fn write_u16(&mut self, value: u16) {
        self.buffer.write_byte2(value.to_be_bytes());
    }

    /// Writes two bytes, most significant first.
    pub fn write_i16(&mut self, value: i16) {
        self.buffer.write_byte2(value.to_be_bytes());
    }

    /// Writes four bytes, most significant first.
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.write_byte4(value.to_be_bytes());
    }

    /// Writes four bytes, most significant first.
    pub fn write_i32(&mut self, value: i32) {
        self.buffer.write_byte4(value.to_be_bytes());
    }

    /// Writes eight bytes, most significant first.
    pub fn write_u64(&mut self, value: u64) {
        self.buffer.write_byte8(value.to_be_bytes());
    }

    /// Writes eight bytes, most significant first.
    pub fn write_i64(&mut self, value: i64) {
        self.buffer.write_byte8(value.to_be_bytes());
    }

    /// Writes `bytes` as is, with no length prefix.
    pub fn write_raw_bytes(&mut self, bytes: &[u8]) {
        self.buffer.write_bytes(bytes);
    }

    /// Writes a `u16` byte count followed by the UTF-8 bytes of `value`.
    /// An empty string is just a zero count.
    ///
    /// # Errors
    ///
    /// [`CodecError::StringTooLong`] if `value` is longer than
    /// [`MAX_STRING_LEN`] bytes. Nothing is written in that case.
    pub fn write_string(&mut self, value: &str) -> Result<(), CodecError> {
        if value.is_empty() {
            self.write_u16(0);
            return Ok(());
        }

        let len = value.len();
        let prefix = u16::try_from(len).map_err(|_| CodecError::StringTooLong {
            len,
            max: MAX_STRING_LEN,
        })?;

        let staged = self.scratch.stage(len);
        staged.copy_from_slice(value.as_bytes());
        self.buffer.write_byte2(prefix.to_be_bytes());
        self.buffer.write_bytes(staged);
        Ok(())
    }

    /// Like [`Self::write_string`], with `None` written as an empty string.
    ///
    /// # Errors
    ///
    /// See [`Self::write_string`].
    pub fn write_opt_string(&mut self, value: Option<&str>) -> Result<(), CodecError> {
        self.write_string(value.unwrap_or_default())
    }

    /// Writes any value with an [`Encode`] implementation.
    ///
    /// # Errors
    ///
    /// Whatever the value's encoding returns.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), CodecError> {
        value.encode(self)
    }

    /// Moves the cursor back to the start; later writes overwrite old data.
    pub fn seek_to_start(&mut self) {
        self.buffer.seek_to_start();
    }

    /// Moves the cursor to `pos`, growing the buffer if needed.
    pub fn seek_to(&mut self, pos: usize) {
        self.buffer.seek_to(pos);
    }

    /// Drops everything before the cursor and resets it to 0.
    pub fn compact(&mut self) {
        self.buffer.compact();
    }

    /// Drops everything before `pos` and resets the cursor to 0.
    pub fn compact_from(&mut self, pos: usize) {
        self.buffer.compact_from(pos);
    }

    #[cfg(test)]
    pub(crate) fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }
}
