use alloc::vec::Vec;

use crate::{buffer::grow_len, options::DEFAULT_STRING_SCRATCH_CAPACITY};

/// Reusable staging area for UTF-8 string payloads.
///
/// Each reader and writer owns one, so repeated string reads and writes do
/// not allocate once the scratch has grown to the longest string seen. It
/// grows by 1.5× until the request fits and never shrinks.
#[derive(Debug, Clone)]
pub(crate) struct StringScratch {
    bytes: Vec<u8>,
}

impl Default for StringScratch {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STRING_SCRATCH_CAPACITY)
    }
}

impl StringScratch {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: alloc::vec![0; capacity],
        }
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Grows the scratch until it holds `len` bytes and returns exactly that
    /// many bytes of it.
    pub(crate) fn stage(&mut self, len: usize) -> &mut [u8] {
        let mut capacity = self.bytes.len();
        while capacity < len {
            capacity = grow_len(capacity);
        }
        if capacity != self.bytes.len() {
            self.bytes.resize(capacity, 0);
        }
        &mut self.bytes[..len]
    }
}
