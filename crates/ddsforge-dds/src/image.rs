//! Image sources for the encoder.

use crate::{to_dds_format, Error, PixelFormat, Result};

/// Read-only view of a mip-mapped image.
///
/// The encoder reads each level once through [`mip_data`](Self::mip_data).
/// Level `i` is expected to hold `max(1, width >> i) x max(1, height >> i)`
/// pixels in [`format`](Self::format).
pub trait TextureSource {
    /// Width of the base level in pixels.
    fn width(&self) -> u32;

    /// Height of the base level in pixels.
    fn height(&self) -> u32;

    /// Layout of every level's pixel data.
    fn format(&self) -> PixelFormat;

    /// Whether levels beyond the base are present.
    fn has_mipmaps(&self) -> bool;

    /// Number of levels beyond the base. Only meaningful with mipmaps.
    fn mipmap_count(&self) -> u32;

    /// Raw pixel data of one level, or `None` if the level does not exist.
    fn mip_data(&self, level: u32) -> Option<&[u8]>;

    /// Total number of levels the encoder writes.
    fn mip_levels(&self) -> u32 {
        if self.has_mipmaps() {
            self.mipmap_count().saturating_add(1)
        } else {
            1
        }
    }
}

/// Dimensions of mip level `level` for a `width x height` base.
///
/// Each side halves per level and never drops below 1.
#[inline]
pub fn mip_dimensions(width: u32, height: u32, level: u32) -> (u32, u32) {
    let shrink = |extent: u32| extent.checked_shr(level).unwrap_or(0).max(1);
    (shrink(width), shrink(height))
}

/// Number of levels below the base in a full chain ending at 1x1.
#[inline]
pub fn full_chain_len(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    31 - largest.leading_zeros()
}

/// An owned image with one buffer per mip level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    levels: Vec<Vec<u8>>,
}

impl Image {
    /// Create an image with only a base level.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            levels: vec![data],
        }
    }

    /// Create an image from an explicit level list, base level first.
    pub fn with_mipmaps(width: u32, height: u32, format: PixelFormat, levels: Vec<Vec<u8>>) -> Self {
        Self {
            width,
            height,
            format,
            levels,
        }
    }

    /// Split one packed buffer holding the base level followed by
    /// `mipmap_count` smaller levels.
    ///
    /// Level sizes come from the DDS catalog, so the format must be
    /// encodable, `mipmap_count` must not exceed the chain down to 1x1,
    /// and `data` must contain exactly the whole chain.
    pub fn from_contiguous(
        width: u32,
        height: u32,
        format: PixelFormat,
        mipmap_count: u32,
        data: &[u8],
    ) -> Result<Self> {
        let info = to_dds_format(format)
            .ok_or(Error::UnsupportedFormat(format))?
            .info();

        let max = full_chain_len(width, height);
        if mipmap_count > max {
            return Err(Error::TooManyMipLevels {
                count: mipmap_count,
                max,
            });
        }

        let too_large = || Error::DimensionsTooLarge { width, height };
        let mut sizes = Vec::with_capacity(mipmap_count as usize + 1);
        for level in 0..=mipmap_count {
            let (w, h) = mip_dimensions(width, height, level);
            let size = info
                .level_size(w, h)
                .and_then(|size| usize::try_from(size).ok())
                .ok_or_else(too_large)?;
            sizes.push(size);
        }

        let expected = sizes
            .iter()
            .try_fold(0usize, |total, &size| total.checked_add(size))
            .ok_or_else(too_large)?;
        if expected != data.len() {
            return Err(Error::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mut levels = Vec::with_capacity(sizes.len());
        let mut rest = data;
        for size in sizes {
            let (level, tail) = rest.split_at(size);
            levels.push(level.to_vec());
            rest = tail;
        }

        Ok(Self::with_mipmaps(width, height, format, levels))
    }

    /// Base level width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Base level height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format of every level.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// All level buffers, base first.
    pub fn levels(&self) -> &[Vec<u8>] {
        &self.levels
    }
}

impl TextureSource for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn has_mipmaps(&self) -> bool {
        self.levels.len() > 1
    }

    fn mipmap_count(&self) -> u32 {
        u32::try_from(self.levels.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }

    fn mip_data(&self, level: u32) -> Option<&[u8]> {
        self.levels.get(level as usize).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_dimensions() {
        assert_eq!(mip_dimensions(256, 64, 0), (256, 64));
        assert_eq!(mip_dimensions(256, 64, 3), (32, 8));
        assert_eq!(mip_dimensions(256, 64, 7), (2, 1));
        assert_eq!(mip_dimensions(256, 64, 8), (1, 1));
        assert_eq!(mip_dimensions(7, 3, 1), (3, 1));
    }

    #[test]
    fn test_mip_dimensions_large_shift() {
        assert_eq!(mip_dimensions(u32::MAX, u32::MAX, 32), (1, 1));
        assert_eq!(mip_dimensions(u32::MAX, 1, 100), (1, 1));
    }

    #[test]
    fn test_single_level_image() {
        let image = Image::new(4, 4, PixelFormat::Rgba8, vec![0; 64]);

        assert!(!image.has_mipmaps());
        assert_eq!(image.mip_levels(), 1);
        assert_eq!(image.mip_data(0).map(<[u8]>::len), Some(64));
        assert!(image.mip_data(1).is_none());
    }

    #[test]
    fn test_mipmapped_image() {
        let image = Image::with_mipmaps(
            2,
            2,
            PixelFormat::L8,
            vec![vec![1, 2, 3, 4], vec![5]],
        );

        assert!(image.has_mipmaps());
        assert_eq!(image.mipmap_count(), 1);
        assert_eq!(image.mip_levels(), 2);
        assert_eq!(image.mip_data(1), Some(&[5u8][..]));
    }

    #[test]
    fn test_from_contiguous_uncompressed() {
        // 4x2 RGBA8: 32 + 2x1 (8) + 1x1 (4)
        let data: Vec<u8> = (0..44).collect();
        let image = Image::from_contiguous(4, 2, PixelFormat::Rgba8, 2, &data).unwrap();

        let sizes: Vec<_> = image.levels().iter().map(Vec::len).collect();
        assert_eq!(sizes, [32, 8, 4]);
        assert_eq!(image.levels()[2], [40, 41, 42, 43]);
    }

    #[test]
    fn test_from_contiguous_compressed() {
        // 8x8 DXT1: 4 blocks, then 1 block for 4x4, 2x2 and 1x1
        let data = vec![0xAB; 32 + 8 + 8 + 8];
        let image = Image::from_contiguous(8, 8, PixelFormat::Dxt1, 3, &data).unwrap();

        let sizes: Vec<_> = image.levels().iter().map(Vec::len).collect();
        assert_eq!(sizes, [32, 8, 8, 8]);
    }

    #[test]
    fn test_from_contiguous_size_mismatch() {
        let err = Image::from_contiguous(4, 4, PixelFormat::Rgba8, 2, &[0; 80]).unwrap_err();
        assert!(matches!(
            err,
            Error::DataSizeMismatch {
                expected: 84,
                actual: 80
            }
        ));

        let err = Image::from_contiguous(4, 4, PixelFormat::Rgba8, 0, &[0; 65]).unwrap_err();
        assert!(matches!(
            err,
            Error::DataSizeMismatch {
                expected: 64,
                actual: 65
            }
        ));
    }

    #[test]
    fn test_from_contiguous_unsupported() {
        let err = Image::from_contiguous(4, 4, PixelFormat::Etc, 0, &[0; 8]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(PixelFormat::Etc)));
    }

    #[test]
    fn test_from_contiguous_rejects_overlong_chain() {
        // 4x4 halves twice to 1x1
        let err = Image::from_contiguous(4, 4, PixelFormat::Rgba8, 3, &[0; 88]).unwrap_err();
        assert!(matches!(err, Error::TooManyMipLevels { count: 3, max: 2 }));

        let err = Image::from_contiguous(4, 4, PixelFormat::Rgba8, u32::MAX, &[0; 64]).unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyMipLevels {
                count: u32::MAX,
                max: 2
            }
        ));
    }

    #[test]
    fn test_from_contiguous_full_chain_of_large_image() {
        // 2^31 x 1 RGBA8: sizes are summed, never allocated
        let err = Image::from_contiguous(1 << 31, 1, PixelFormat::Rgba8, 31, &[0; 4]).unwrap_err();
        assert!(matches!(err, Error::DataSizeMismatch { actual: 4, .. }));
    }

    #[test]
    fn test_full_chain_len() {
        assert_eq!(full_chain_len(1, 1), 0);
        assert_eq!(full_chain_len(0, 0), 0);
        assert_eq!(full_chain_len(256, 256), 8);
        assert_eq!(full_chain_len(257, 3), 8);
        assert_eq!(full_chain_len(8, 2), 3);
        assert_eq!(full_chain_len(u32::MAX, 1), 31);
    }
}
