/// Capacity in bytes of a buffer created without explicit options.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

/// Size in bytes past which buffer growth is reported as suspicious.
pub const DEFAULT_HIGH_WATER_MARK: usize = 128 * 1024 * 1024;

/// Initial size in bytes of the string staging buffer.
pub const DEFAULT_STRING_SCRATCH_CAPACITY: usize = 64;

/// Construction-time settings for buffers, readers and writers.
///
/// # Examples
///
/// ```rust
/// use binbuf::{BinaryWriter, BufferOptions};
///
/// let options = BufferOptions {
///     initial_capacity: 1024,
///     ..Default::default()
/// };
/// let writer = BinaryWriter::with_options(options);
/// assert_eq!(writer.buffer().capacity(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferOptions {
    /// Number of bytes allocated up front for an empty buffer.
    ///
    /// # Default
    ///
    /// `4`
    pub initial_capacity: usize,

    /// Buffer size that, once exceeded by growth, logs a warning.
    ///
    /// Crossing the mark is not an error. It usually means a caller is
    /// feeding garbage length prefixes or never compacts a reused buffer.
    ///
    /// # Default
    ///
    /// 128 MiB
    pub high_water_mark: usize,

    /// Initial size of the buffer used to stage string payloads.
    ///
    /// # Default
    ///
    /// `64`
    pub string_scratch_capacity: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            high_water_mark: DEFAULT_HIGH_WATER_MARK,
            string_scratch_capacity: DEFAULT_STRING_SCRATCH_CAPACITY,
        }
    }
}
