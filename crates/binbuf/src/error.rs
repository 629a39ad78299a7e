use thiserror::Error;

/// Errors raised by [`BinaryBuffer`](crate::BinaryBuffer),
/// [`BinaryReader`](crate::BinaryReader) and
/// [`BinaryWriter`](crate::BinaryWriter).
///
/// A failed call never leaves a partial result behind: reads do not advance
/// the cursor and over-long strings are rejected before anything is written.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A read asked for bytes beyond the end of the buffer storage.
    #[error("read out of range: {requested} byte(s) at position {position} of {len}")]
    OutOfRange {
        /// Cursor position when the read was attempted.
        position: usize,
        /// Number of bytes the read needed.
        requested: usize,
        /// Length of the buffer storage.
        len: usize,
    },
    /// A string's UTF-8 encoding does not fit a `u16` length prefix.
    #[error("string too long: {len} bytes exceeds the {max} byte limit")]
    StringTooLong {
        /// UTF-8 byte length of the rejected string.
        len: usize,
        /// Largest encodable length.
        max: usize,
    },
}

impl CodecError {
    /// Whether this error came from reading past the end of the buffer.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, CodecError::OutOfRange { .. })
    }
}
