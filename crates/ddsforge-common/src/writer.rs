//! Binary writer for building little-endian byte buffers.

use byteorder::{ByteOrder, LittleEndian};

/// An append-only little-endian writer backed by a `Vec<u8>`.
///
/// The writer is meant to be created with the exact capacity of the final
/// buffer, so appending never reallocates.
///
/// # Example
///
/// ```
/// use ddsforge_common::BinaryWriter;
///
/// let mut writer = BinaryWriter::with_capacity(8);
/// writer.write_bytes(b"DDS ");
/// writer.write_u32(124);
///
/// assert_eq!(writer.into_inner(), b"DDS \x7C\x00\x00\x00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    data: Vec<u8>,
}

impl BinaryWriter {
    /// Create a writer with room for `capacity` bytes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append a little-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        let mut word = [0u8; 4];
        LittleEndian::write_u32(&mut word, value);
        self.data.extend_from_slice(&word);
    }

    /// Append a run of little-endian u32 values.
    pub fn write_u32_slice(&mut self, values: &[u32]) {
        for &value in values {
            self.write_u32(value);
        }
    }

    /// Consume the writer and return the buffer.
    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_u32_little_endian() {
        let mut writer = BinaryWriter::default();
        writer.write_u32(0x20534444);

        assert_eq!(writer.into_inner(), b"DDS ");
    }

    #[test]
    fn test_write_u32_slice() {
        let mut writer = BinaryWriter::with_capacity(12);
        writer.write_u32_slice(&[1, 2, 0xFF00_0000]);

        assert_eq!(
            writer.into_inner(),
            [1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0xFF]
        );
    }

    #[test]
    fn test_exact_capacity_does_not_grow() {
        let mut writer = BinaryWriter::with_capacity(16);
        writer.write_u32(7);
        writer.write_bytes(&[0xAB; 12]);

        let buffer = writer.into_inner();
        assert_eq!(buffer.len(), 16);
        assert_eq!(buffer.capacity(), Vec::<u8>::with_capacity(16).capacity());
    }
}
