//! Binary reader for zero-copy parsing of byte slices.
//!
//! [`BinaryReader`] is a cursor over a borrowed slice. Structs are read in
//! place through zerocopy, so their fields keep the file's little-endian
//! layout.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// # Example
///
/// ```
/// use ddsforge_common::BinaryReader;
///
/// let data = [0x44, 0x44, 0x53, 0x20, 0x7C, 0x00, 0x00, 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// reader.expect_magic(b"DDS ").unwrap();
/// let size: [u8; 4] = reader.read_struct().unwrap();
/// assert_eq!(u32::from_le_bytes(size), 124);
/// assert_eq!(reader.remaining(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Expect specific magic bytes.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, FromBytes)]
    #[repr(C)]
    struct Pair {
        a: [u8; 2],
        b: [u8; 2],
    }

    #[test]
    fn test_read_struct_advances() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0x05];
        let mut reader = BinaryReader::new(&data);

        let pair: Pair = reader.read_struct().unwrap();
        assert_eq!(pair.a, [0x01, 0x02]);
        assert_eq!(pair.b, [0x03, 0x04]);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.peek_bytes(2).unwrap(), [0x01, 0x02]);
        assert_eq!(reader.remaining(), 4);
        assert_eq!(reader.read_bytes(3).unwrap(), [0x01, 0x02, 0x03]);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_magic() {
        let mut reader = BinaryReader::new(b"DDS \x7C");
        reader.expect_magic(b"DDS ").unwrap();
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_bad_magic() {
        let mut reader = BinaryReader::new(b"PNG\x89");
        assert!(matches!(
            reader.expect_magic(b"DDS "),
            Err(Error::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_struct::<Pair>(),
            Err(Error::UnexpectedEof { needed: 4, available: 2 })
        ));
    }
}
