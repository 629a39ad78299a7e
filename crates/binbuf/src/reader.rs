use alloc::{string::String, vec::Vec};

use crate::{
    buffer::BinaryBuffer, codec::Decode, error::CodecError, options::BufferOptions,
    scratch::StringScratch, writer::BinaryWriter,
};

/// Big-endian decoder on top of [`BinaryBuffer`], the inverse of
/// [`BinaryWriter`].
///
/// ```
/// use binbuf::{BinaryReader, BinaryWriter};
///
/// let mut writer = BinaryWriter::new();
/// writer.write_i16(-1);
/// writer.write_string("hello").unwrap();
///
/// let mut reader = BinaryReader::from_writer(&writer);
/// assert_eq!(reader.read_i16(), Ok(-1));
/// assert_eq!(reader.read_string().unwrap(), "hello");
/// assert!(reader.read_byte().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader {
    buffer: BinaryBuffer,
    scratch: StringScratch,
}

impl Default for BinaryReader {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for BinaryReader {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&BinaryWriter> for BinaryReader {
    fn from(writer: &BinaryWriter) -> Self {
        Self::from_writer(writer)
    }
}

impl BinaryReader {
    /// Creates a reader with nothing to read; the first decode fails.
    #[must_use]
    pub fn new() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// Creates a reader over `bytes`, starting at the first byte.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_buffer(BinaryBuffer::from_bytes(bytes))
    }

    /// Creates a reader over `bytes` with the scratch size and high-water
    /// mark taken from `options`. `initial_capacity` does not apply.
    #[must_use]
    pub fn from_bytes_with_options(bytes: Vec<u8>, options: BufferOptions) -> Self {
        Self {
            buffer: BinaryBuffer::from_bytes_with_options(bytes, options),
            scratch: StringScratch::with_capacity(options.string_scratch_capacity),
        }
    }

    /// Creates a reader over a copy of everything `writer` has written.
    #[must_use]
    pub fn from_writer(writer: &BinaryWriter) -> Self {
        Self::from_bytes(writer.to_bytes())
    }

    /// Creates a reader that continues at `buffer`'s current cursor. Reads
    /// are bounded by the buffer's storage, not by what was written to it.
    #[must_use]
    pub fn from_buffer(buffer: BinaryBuffer) -> Self {
        Self {
            buffer,
            scratch: StringScratch::default(),
        }
    }

    /// Number of bytes consumed so far, or the cursor after a seek.
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    /// Bytes left before the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &BinaryBuffer {
        &self.buffer
    }

    /// Consumes the reader and returns its buffer.
    #[must_use]
    pub fn into_buffer(self) -> BinaryBuffer {
        self.buffer
    }

    /// Reads one raw byte.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] at the end of the buffer.
    pub fn read_byte(&mut self) -> Result<u8, CodecError> {
        self.buffer.read_byte()
    }

    /// Reads a byte; only `1` is `true`, every other value is `false`.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] at the end of the buffer.
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.buffer.read_byte()? == 1)
    }

    /// Reads a byte as the character with that code point (U+0000 to U+00FF).
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] at the end of the buffer.
    pub fn read_char(&mut self) -> Result<char, CodecError> {
        Ok(char::from(self.buffer.read_byte()?))
    }

    /// Reads a two's-complement byte.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] at the end of the buffer.
    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        Ok(i8::from_be_bytes([self.buffer.read_byte()?]))
    }

    /// Reads two bytes, most significant first.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than two bytes remain. Nothing is
    /// consumed in that case; the same holds for every wider integer.
    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        self.buffer.read_array().map(u16::from_be_bytes)
    }

    /// Reads two bytes, most significant first.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than two bytes remain.
    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        self.buffer.read_array().map(i16::from_be_bytes)
    }

    /// Reads four bytes, most significant first.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than four bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.buffer.read_array().map(u32::from_be_bytes)
    }

    /// Reads four bytes, most significant first.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than four bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        self.buffer.read_array().map(i32::from_be_bytes)
    }

    /// Reads eight bytes, most significant first.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than eight bytes remain.
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.buffer.read_array().map(u64::from_be_bytes)
    }

    /// Reads eight bytes, most significant first.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than eight bytes remain.
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        self.buffer.read_array().map(i64::from_be_bytes)
    }

    /// Reads `count` raw bytes into a new vector.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than `count` bytes remain.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(count.min(self.buffer.remaining()));
        self.buffer.read_bytes(count, &mut out)?;
        Ok(out)
    }

    /// Reads `count` raw bytes into `out`, reusing its allocation.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than `count` bytes remain; `out`
    /// is left untouched.
    pub fn read_bytes_into(&mut self, count: usize, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.buffer.read_bytes(count, out)
    }

    /// Reads a `u16` byte count and that many bytes of UTF-8. Invalid
    /// sequences become U+FFFD.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if the prefix or the payload runs past the
    /// end of the buffer. The cursor is restored to where the string began.
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let start = self.buffer.position();
        let size = usize::from(self.read_u16()?);
        if size == 0 {
            return Ok(String::new());
        }

        let staged = self.scratch.stage(size);
        if let Err(err) = self.buffer.read_into_slice(staged) {
            self.buffer.rewind(start);
            return Err(err);
        }
        Ok(String::from_utf8_lossy(staged).into_owned())
    }

    /// Reads any value with a [`Decode`] implementation.
    ///
    /// # Errors
    ///
    /// Whatever the value's decoding returns.
    pub fn read<T: Decode>(&mut self) -> Result<T, CodecError> {
        T::decode(self)
    }

    /// Discards `count` bytes one at a time. Running off the end fails after
    /// the bytes that were available have been consumed.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] at the end of the buffer.
    pub fn skip(&mut self, count: usize) -> Result<(), CodecError> {
        for _ in 0..count {
            self.buffer.read_byte()?;
        }
        Ok(())
    }

    /// Moves the cursor back to the first byte.
    pub fn seek_to_start(&mut self) {
        self.buffer.seek_to_start();
    }

    /// Moves the cursor to `pos`. Seeking past the end grows the buffer with
    /// zero bytes rather than failing.
    pub fn seek_to(&mut self, pos: usize) {
        self.buffer.seek_to(pos);
    }

    #[cfg(test)]
    pub(crate) fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec, vec::Vec};

    use rstest::rstest;

    use super::BinaryReader;
    use crate::{BinaryWriter, BufferOptions, CodecError};

    #[test]
    fn empty_reader_fails_first_read() {
        let mut reader = BinaryReader::new();
        assert_eq!(
            reader.read_byte(),
            Err(CodecError::OutOfRange {
                position: 0,
                requested: 1,
                len: 0
            })
        );
    }

    #[test]
    fn integers_are_big_endian() {
        let mut reader = BinaryReader::from_bytes(vec![
            0x12, 0x34, // u16
            0x01, 0x02, 0x03, 0x04, // u32
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, // i64
        ]);
        assert_eq!(reader.read_u16(), Ok(0x1234));
        assert_eq!(reader.read_u32(), Ok(0x0102_0304));
        assert_eq!(reader.read_i64(), Ok(-2));
        assert_eq!(reader.remaining(), 0);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(2, false)]
    #[case(0xff, false)]
    fn only_one_is_true(#[case] byte: u8, #[case] expected: bool) {
        let mut reader = BinaryReader::from_bytes(vec![byte]);
        assert_eq!(reader.read_bool(), Ok(expected));
    }

    #[rstest]
    #[case(b'A', 'A')]
    #[case(0xe9, 'é')]
    #[case(0x00, '\0')]
    fn char_is_one_byte(#[case] byte: u8, #[case] expected: char) {
        let mut reader = BinaryReader::from_bytes(vec![byte]);
        assert_eq!(reader.read_char(), Ok(expected));
    }

    #[test]
    fn short_integer_read_consumes_nothing() {
        let mut reader = BinaryReader::from_bytes(vec![1, 2, 3]);
        assert!(reader.read_u32().unwrap_err().is_out_of_range());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u16(), Ok(0x0102));
    }

    #[test]
    fn string_reads_prefix_then_payload() {
        let mut reader = BinaryReader::from_bytes(b"\x00\x05hello\x00\x00".to_vec());
        assert_eq!(reader.read_string().unwrap(), "hello");
        assert_eq!(reader.read_string().unwrap(), "");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn truncated_string_restores_cursor() {
        let mut reader = BinaryReader::from_bytes(b"\x00\x09abc".to_vec());
        let err = reader.read_string().unwrap_err();
        assert_eq!(
            err,
            CodecError::OutOfRange {
                position: 2,
                requested: 9,
                len: 5
            }
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut reader = BinaryReader::from_bytes(vec![0x00, 0x03, b'a', 0xff, b'b']);
        assert_eq!(reader.read_string().unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn long_string_grows_scratch() {
        let payload = "z".repeat(300);
        let mut writer = BinaryWriter::new();
        writer.write_string(&payload).unwrap();
        let mut reader = BinaryReader::from_writer(&writer);
        assert_eq!(reader.read_string().unwrap(), payload);
        // 64 → 96 → 144 → 216 → 324
        assert_eq!(reader.scratch_capacity(), 324);
    }

    #[test]
    fn read_bytes_variants() {
        let mut reader = BinaryReader::from_bytes(vec![1, 2, 3, 4, 5]);
        assert_eq!(reader.read_bytes(2).unwrap(), [1, 2]);
        let mut out = Vec::with_capacity(8);
        reader.read_bytes_into(3, &mut out).unwrap();
        assert_eq!(out, [3, 4, 5]);
        assert!(reader.read_bytes(1).is_err());
    }

    #[test]
    fn skip_fails_partway() {
        let mut reader = BinaryReader::from_bytes(vec![1, 2, 3]);
        reader.skip(1).unwrap();
        assert_eq!(reader.read_byte(), Ok(2));
        assert!(reader.skip(5).is_err());
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn seek_to_revisits_bytes() {
        let mut reader = BinaryReader::from_bytes(vec![10, 20, 30]);
        reader.seek_to(2);
        assert_eq!(reader.read_byte(), Ok(30));
        reader.seek_to_start();
        assert_eq!(reader.read_byte(), Ok(10));
    }

    #[test]
    fn options_apply_to_reader() {
        let mut reader = BinaryReader::from_bytes_with_options(
            vec![0, 1, b'q'],
            BufferOptions {
                string_scratch_capacity: 1,
                ..Default::default()
            },
        );
        assert_eq!(reader.scratch_capacity(), 1);
        assert_eq!(reader.read_string().unwrap(), "q".to_string());
        assert_eq!(reader.buffer().capacity(), 3);
    }

    #[test]
    fn from_buffer_reads_whole_storage() {
        let mut writer = BinaryWriter::new();
        writer.write_byte(7);
        let mut buffer = writer.into_buffer();
        buffer.seek_to_start();
        let mut reader = BinaryReader::from_buffer(buffer);
        assert_eq!(reader.read_byte(), Ok(7));
        // Storage beyond the written byte is still readable zeroes.
        assert_eq!(reader.read_byte(), Ok(0));
    }
}
