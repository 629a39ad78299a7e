use alloc::vec::Vec;

use crate::{
    error::CodecError,
    options::{BufferOptions, DEFAULT_HIGH_WATER_MARK, DEFAULT_INITIAL_CAPACITY},
};

/// Next size in the 1.5× growth sequence.
///
/// Equal to `trunc(len * 1.5)` for every `len >= 2`. Smaller lengths would
/// not grow under truncation, so they advance by one byte instead.
pub(crate) const fn grow_len(len: usize) -> usize {
    let next = len.saturating_add(len / 2);
    if next > len { next } else { len.saturating_add(1) }
}

/// Growable byte storage with a single read/write cursor.
///
/// This is the storage layer under both
/// [`BinaryReader`](crate::BinaryReader) and
/// [`BinaryWriter`](crate::BinaryWriter). It knows nothing about the wire
/// format: it hands out and accepts raw bytes, checks read bounds, and grows
/// its storage by a factor of 1.5 whenever a write would reach the end.
///
/// The cursor counts bytes written when the buffer is used for encoding and
/// bytes consumed when it is used for decoding. Storage never shrinks on its
/// own; [`BinaryBuffer::compact`] moves unconsumed bytes to the front so the
/// same allocation can be reused.
///
/// # Example
///
/// ```
/// use binbuf::BinaryBuffer;
///
/// let mut buffer = BinaryBuffer::new();
/// buffer.write_byte4([1, 2, 3, 4]);
/// buffer.write_byte(5);
/// assert_eq!(buffer.to_bytes(), [1, 2, 3, 4, 5]);
///
/// buffer.seek_to_start();
/// assert_eq!(buffer.read_byte(), Ok(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBuffer {
    /// Always fully initialized; its length is the buffer capacity.
    storage: Vec<u8>,
    pos: usize,
    high_water_mark: usize,
}

impl Default for BinaryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for BinaryBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl BinaryBuffer {
    /// Creates an empty buffer with the default capacity of 4 bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty buffer with `capacity` zeroed bytes of storage.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_bytes(alloc::vec![0; capacity])
    }

    /// Creates an empty buffer sized and limited by `options`.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        let mut buffer = Self::with_capacity(options.initial_capacity);
        buffer.high_water_mark = options.high_water_mark;
        buffer
    }

    /// Wraps existing bytes. The cursor starts at 0, so the bytes are ready
    /// to be read back; writing overwrites them from the start.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            storage: bytes,
            pos: 0,
            high_water_mark: DEFAULT_HIGH_WATER_MARK,
        }
    }

    /// Wraps existing bytes, taking the high-water mark from `options`.
    /// `initial_capacity` does not apply; storage is exactly `bytes`.
    #[must_use]
    pub fn from_bytes_with_options(bytes: Vec<u8>, options: BufferOptions) -> Self {
        let mut buffer = Self::from_bytes(bytes);
        buffer.high_water_mark = options.high_water_mark;
        buffer
    }

    /// Current cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the underlying storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Bytes between the cursor and the end of storage.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.storage.len().saturating_sub(self.pos)
    }

    /// The bytes before the cursor: everything written or consumed so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.pos]
    }

    /// Consumes the buffer and returns its whole storage, including any
    /// bytes past the cursor.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.storage
    }

    fn check_read(&self, count: usize) -> Result<usize, CodecError> {
        let out_of_range = CodecError::OutOfRange {
            position: self.pos,
            requested: count,
            len: self.storage.len(),
        };
        match self.pos.checked_add(count) {
            Some(end) if end <= self.storage.len() => Ok(end),
            _ => Err(out_of_range),
        }
    }

    /// Reads the byte under the cursor and advances past it.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if the cursor is at or past the end of
    /// storage.
    pub fn read_byte(&mut self) -> Result<u8, CodecError> {
        let Some(&byte) = self.storage.get(self.pos) else {
            return Err(CodecError::OutOfRange {
                position: self.pos,
                requested: 1,
                len: self.storage.len(),
            });
        };
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly `N` bytes as an array. Either all of them are read or
    /// none are.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than `N` bytes remain.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        self.read_into_slice(&mut out)?;
        Ok(out)
    }

    /// Fills `dst` with the next `dst.len()` bytes.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than `dst.len()` bytes remain. The
    /// cursor does not move and `dst` is left untouched.
    pub fn read_into_slice(&mut self, dst: &mut [u8]) -> Result<(), CodecError> {
        let end = self.check_read(dst.len())?;
        dst.copy_from_slice(&self.storage[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    /// Copies the next `count` bytes into `out`, replacing its contents but
    /// reusing its allocation.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if fewer than `count` bytes remain. The
    /// cursor does not move and `out` is left untouched.
    pub fn read_bytes(&mut self, count: usize, out: &mut Vec<u8>) -> Result<(), CodecError> {
        let end = self.check_read(count)?;
        out.clear();
        out.extend_from_slice(&self.storage[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    /// Writes one byte at the cursor.
    pub fn write_byte(&mut self, value: u8) {
        self.ensure_space(1);
        self.storage[self.pos] = value;
        self.pos += 1;
    }

    /// Writes two bytes at the cursor with a single space check.
    pub fn write_byte2(&mut self, bytes: [u8; 2]) {
        self.write_fixed(bytes);
    }

    /// Writes four bytes at the cursor with a single space check.
    pub fn write_byte4(&mut self, bytes: [u8; 4]) {
        self.write_fixed(bytes);
    }

    /// Writes eight bytes at the cursor with a single space check.
    pub fn write_byte8(&mut self, bytes: [u8; 8]) {
        self.write_fixed(bytes);
    }

    fn write_fixed<const N: usize>(&mut self, bytes: [u8; N]) {
        self.ensure_space(N);
        self.storage[self.pos..self.pos + N].copy_from_slice(&bytes);
        self.pos += N;
    }

    /// Writes all of `data` at the cursor.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.ensure_space(data.len());
        self.storage[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
    }

    /// Writes the first `count` bytes of `data`, or all of it if `count` is
    /// larger than `data`.
    pub fn write_bytes_counted(&mut self, data: &[u8], count: usize) {
        self.write_bytes(&data[..count.min(data.len())]);
    }

    /// A copy of exactly the bytes before the cursor.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Moves the cursor back to the start. Storage is untouched.
    pub fn seek_to_start(&mut self) {
        self.pos = 0;
    }

    /// Moves the cursor to `pos`, growing storage first if `pos` lies beyond
    /// it. Bytes uncovered by growth are zero, not written data.
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow if `pos` is larger than any allocation
    /// can be, such as `usize::MAX`.
    pub fn seek_to(&mut self, pos: usize) {
        self.seek_to_start();
        self.ensure_space(pos);
        self.pos = pos;
    }

    /// Moves the cursor back to `pos` after a failed multi-step read.
    pub(crate) fn rewind(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos);
        self.pos = pos;
    }

    /// Drops everything before the cursor. See [`Self::compact_from`].
    pub fn compact(&mut self) {
        self.compact_from(self.pos);
    }

    /// Shifts the bytes from `pos` onward to the front of storage and resets
    /// the cursor to 0. `pos` is clamped to the storage length. Capacity is
    /// unchanged; the tail keeps its stale bytes.
    pub fn compact_from(&mut self, pos: usize) {
        let pos = pos.min(self.storage.len());
        self.storage.copy_within(pos.., 0);
        self.pos = 0;
    }

    /// Grows storage so that `count` more bytes fit after the cursor with at
    /// least one byte to spare.
    ///
    /// A request that saturates `usize` stops at `usize::MAX`, which the
    /// allocator then rejects.
    fn ensure_space(&mut self, count: usize) {
        let required = self.pos.saturating_add(count);
        let len = self.storage.len();
        if required < len {
            return;
        }

        let mut new_len = grow_len(len);
        while required >= new_len && new_len < usize::MAX {
            new_len = grow_len(new_len);
        }

        if new_len > self.high_water_mark {
            tracing::warn!(
                from = len,
                to = new_len,
                limit = self.high_water_mark,
                "binary buffer grew past its high-water mark"
            );
        } else {
            tracing::trace!(from = len, to = new_len, "growing binary buffer");
        }

        self.storage.resize(new_len, 0);
    }
}
