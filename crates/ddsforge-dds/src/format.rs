//! DDS format catalog.
//!
//! [`DdsFormat`] is the container-side format id. Every id has exactly one
//! [`FormatInfo`] entry in [`FORMAT_INFO`], so lookups cannot fail.
//!
//! The legacy bitmasked names describe the byte order actually stored in the
//! file (`Rgba8` is what Direct3D calls ABGR8).

/// DDS-internal format identifier. Discriminants index [`FORMAT_INFO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum DdsFormat {
    Dxt1,
    Dxt3,
    Dxt5,
    Ati1,
    Ati2,
    Bc6u,
    Bc6s,
    Bc7,
    R16f,
    Rg16f,
    Rgba16f,
    R32f,
    Rg32f,
    Rgb32f,
    Rgba32f,
    Rgb9e5,
    Rgb8,
    Rgba8,
    Bgr8,
    Bgra8,
    Bgr5a1,
    Bgr565,
    B2gr3,
    B2gr3a8,
    Bgr10a2,
    Rgb10a2,
    Bgra4,
    Luminance,
    LuminanceAlpha,
    LuminanceAlpha4,
}

impl DdsFormat {
    /// Number of catalog entries.
    pub const COUNT: usize = 30;

    /// Every id, in catalog order.
    pub const ALL: [DdsFormat; Self::COUNT] = [
        Self::Dxt1,
        Self::Dxt3,
        Self::Dxt5,
        Self::Ati1,
        Self::Ati2,
        Self::Bc6u,
        Self::Bc6s,
        Self::Bc7,
        Self::R16f,
        Self::Rg16f,
        Self::Rgba16f,
        Self::R32f,
        Self::Rg32f,
        Self::Rgb32f,
        Self::Rgba32f,
        Self::Rgb9e5,
        Self::Rgb8,
        Self::Rgba8,
        Self::Bgr8,
        Self::Bgra8,
        Self::Bgr5a1,
        Self::Bgr565,
        Self::B2gr3,
        Self::B2gr3a8,
        Self::Bgr10a2,
        Self::Rgb10a2,
        Self::Bgra4,
        Self::Luminance,
        Self::LuminanceAlpha,
        Self::LuminanceAlpha4,
    ];

    /// Catalog entry for this id.
    #[inline]
    pub fn info(self) -> &'static FormatInfo {
        &FORMAT_INFO[self as usize]
    }
}

/// Storage metadata for one DDS format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormatInfo {
    /// Human-readable name, for diagnostics only.
    pub name: &'static str,
    /// Whether data is stored in fixed-size blocks.
    pub compressed: bool,
    /// Block edge length in pixels (1 for uncompressed formats).
    pub block_divisor: u32,
    /// Bytes per block if compressed, bytes per pixel otherwise.
    pub unit_size: u32,
}

impl FormatInfo {
    const fn block(name: &'static str, unit_size: u32) -> Self {
        Self {
            name,
            compressed: true,
            block_divisor: 4,
            unit_size,
        }
    }

    const fn pixel(name: &'static str, unit_size: u32) -> Self {
        Self {
            name,
            compressed: false,
            block_divisor: 1,
            unit_size,
        }
    }

    /// Number of blocks along one axis, counting a partial block as whole.
    #[inline]
    fn blocks(&self, extent: u32) -> u64 {
        u64::from(extent.max(self.block_divisor).div_ceil(self.block_divisor))
    }

    /// Value for the header's pitch/linear-size field.
    ///
    /// Compressed formats report the byte size of the whole base level.
    /// Uncompressed formats report `width * unit_size`. Returns `None` if the
    /// value does not fit in 32 bits.
    pub fn pitch(&self, width: u32, height: u32) -> Option<u32> {
        let pitch = if self.compressed {
            self.blocks(width)
                .checked_mul(self.blocks(height))?
                .checked_mul(u64::from(self.unit_size))?
        } else {
            u64::from(width).checked_mul(u64::from(self.unit_size))?
        };
        u32::try_from(pitch).ok()
    }

    /// Byte size of one image level with the given dimensions.
    pub fn level_size(&self, width: u32, height: u32) -> Option<u64> {
        if self.compressed {
            self.blocks(width)
                .checked_mul(self.blocks(height))?
                .checked_mul(u64::from(self.unit_size))
        } else {
            u64::from(width)
                .checked_mul(u64::from(height))?
                .checked_mul(u64::from(self.unit_size))
        }
    }
}

/// Catalog entries, indexed by `DdsFormat as usize`.
pub static FORMAT_INFO: [FormatInfo; DdsFormat::COUNT] = [
    FormatInfo::block("DXT1/BC1", 8),
    FormatInfo::block("DXT2/DXT3/BC2", 16),
    FormatInfo::block("DXT4/DXT5/BC3", 16),
    FormatInfo::block("ATI1/BC4", 8),
    FormatInfo::block("ATI2/A2XY/BC5", 16),
    FormatInfo::block("BC6UF", 16),
    FormatInfo::block("BC6SF", 16),
    FormatInfo::block("BC7", 16),
    FormatInfo::pixel("R16F", 2),
    FormatInfo::pixel("RG16F", 4),
    FormatInfo::pixel("RGBA16F", 8),
    FormatInfo::pixel("R32F", 4),
    FormatInfo::pixel("RG32F", 8),
    FormatInfo::pixel("RGB32F", 12),
    FormatInfo::pixel("RGBA32F", 16),
    FormatInfo::pixel("RGB9E5", 4),
    FormatInfo::pixel("RGB8", 3),
    FormatInfo::pixel("RGBA8", 4),
    FormatInfo::pixel("BGR8", 3),
    FormatInfo::pixel("BGRA8", 4),
    FormatInfo::pixel("BGR5A1", 2),
    FormatInfo::pixel("BGR565", 2),
    FormatInfo::pixel("B2GR3", 1),
    FormatInfo::pixel("B2GR3A8", 2),
    FormatInfo::pixel("BGR10A2", 4),
    FormatInfo::pixel("RGB10A2", 4),
    FormatInfo::pixel("BGRA4", 2),
    FormatInfo::pixel("GRAYSCALE", 1),
    FormatInfo::pixel("GRAYSCALE_ALPHA", 2),
    FormatInfo::pixel("GRAYSCALE_ALPHA_4", 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        for (index, format) in DdsFormat::ALL.iter().enumerate() {
            assert_eq!(*format as usize, index);
        }
        assert_eq!(DdsFormat::Rgba8.info().name, "RGBA8");
        assert_eq!(DdsFormat::LuminanceAlpha4.info().name, "GRAYSCALE_ALPHA_4");
    }

    #[test]
    fn test_block_formats_use_4x4() {
        for format in DdsFormat::ALL {
            let info = format.info();
            if info.compressed {
                assert_eq!(info.block_divisor, 4, "{}", info.name);
                assert!(info.unit_size == 8 || info.unit_size == 16);
            } else {
                assert_eq!(info.block_divisor, 1, "{}", info.name);
            }
        }
    }

    #[test]
    fn test_uncompressed_pitch() {
        assert_eq!(DdsFormat::Rgba8.info().pitch(256, 256), Some(1024));
        assert_eq!(DdsFormat::Rgb32f.info().pitch(10, 3), Some(120));
    }

    #[test]
    fn test_compressed_pitch() {
        // 10x10 rounds up to 3x3 blocks of 8 bytes
        assert_eq!(DdsFormat::Dxt1.info().pitch(10, 10), Some(72));
        // Anything below one block still occupies a full block
        assert_eq!(DdsFormat::Bc7.info().pitch(1, 2), Some(16));
        assert_eq!(DdsFormat::Dxt5.info().pitch(256, 128), Some(64 * 32 * 16));
    }

    #[test]
    fn test_pitch_overflow() {
        assert_eq!(DdsFormat::Rgba32f.info().pitch(u32::MAX, 1), None);
        assert_eq!(DdsFormat::Bc7.info().pitch(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_level_size() {
        assert_eq!(DdsFormat::Rgba8.info().level_size(4, 4), Some(64));
        assert_eq!(DdsFormat::Luminance.info().level_size(3, 5), Some(15));
        assert_eq!(DdsFormat::Dxt1.info().level_size(1, 1), Some(8));
        assert_eq!(DdsFormat::Ati2.info().level_size(8, 5), Some(2 * 2 * 16));
    }
}
