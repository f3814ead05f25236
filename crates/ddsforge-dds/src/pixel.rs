//! Abstract in-memory pixel layouts.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How pixel data for one image level is laid out in memory.
///
/// This is the caller-facing format. Only a subset can be stored in a DDS
/// container; see [`crate::to_dds_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit luminance.
    L8,
    /// 8-bit luminance + 8-bit alpha.
    La8,
    R8,
    Rg8,
    Rgb8,
    Rgba8,
    Rgba4444,
    Rgb565,
    /// 32-bit float, one channel.
    Rf,
    Rgf,
    Rgbf,
    Rgbaf,
    /// 16-bit half float, one channel.
    Rh,
    Rgh,
    Rgbh,
    Rgbah,
    /// Shared-exponent RGB (9 bits mantissa per channel, 5 bits exponent).
    Rgbe9995,
    /// BC1.
    Dxt1,
    /// BC2.
    Dxt3,
    /// BC3.
    Dxt5,
    /// BC4.
    RgtcR,
    /// BC5.
    RgtcRg,
    /// BC7.
    BptcRgba,
    /// BC6H signed.
    BptcRgbf,
    /// BC6H unsigned.
    BptcRgbfu,
    Etc,
    Etc2R11,
    Etc2R11s,
    Etc2Rg11,
    Etc2Rg11s,
    Etc2Rgb8,
    Etc2Rgba8,
    Etc2Rgb8a1,
    Etc2RaAsRg,
    Dxt5RaAsRg,
    Astc4x4,
    Astc4x4Hdr,
    Astc8x8,
    Astc8x8Hdr,
}

impl PixelFormat {
    /// Every pixel format, in declaration order.
    pub const ALL: [PixelFormat; 39] = [
        Self::L8,
        Self::La8,
        Self::R8,
        Self::Rg8,
        Self::Rgb8,
        Self::Rgba8,
        Self::Rgba4444,
        Self::Rgb565,
        Self::Rf,
        Self::Rgf,
        Self::Rgbf,
        Self::Rgbaf,
        Self::Rh,
        Self::Rgh,
        Self::Rgbh,
        Self::Rgbah,
        Self::Rgbe9995,
        Self::Dxt1,
        Self::Dxt3,
        Self::Dxt5,
        Self::RgtcR,
        Self::RgtcRg,
        Self::BptcRgba,
        Self::BptcRgbf,
        Self::BptcRgbfu,
        Self::Etc,
        Self::Etc2R11,
        Self::Etc2R11s,
        Self::Etc2Rg11,
        Self::Etc2Rg11s,
        Self::Etc2Rgb8,
        Self::Etc2Rgba8,
        Self::Etc2Rgb8a1,
        Self::Etc2RaAsRg,
        Self::Dxt5RaAsRg,
        Self::Astc4x4,
        Self::Astc4x4Hdr,
        Self::Astc8x8,
        Self::Astc8x8Hdr,
    ];

    /// Stable lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::L8 => "l8",
            Self::La8 => "la8",
            Self::R8 => "r8",
            Self::Rg8 => "rg8",
            Self::Rgb8 => "rgb8",
            Self::Rgba8 => "rgba8",
            Self::Rgba4444 => "rgba4444",
            Self::Rgb565 => "rgb565",
            Self::Rf => "rf",
            Self::Rgf => "rgf",
            Self::Rgbf => "rgbf",
            Self::Rgbaf => "rgbaf",
            Self::Rh => "rh",
            Self::Rgh => "rgh",
            Self::Rgbh => "rgbh",
            Self::Rgbah => "rgbah",
            Self::Rgbe9995 => "rgbe9995",
            Self::Dxt1 => "dxt1",
            Self::Dxt3 => "dxt3",
            Self::Dxt5 => "dxt5",
            Self::RgtcR => "rgtc_r",
            Self::RgtcRg => "rgtc_rg",
            Self::BptcRgba => "bptc_rgba",
            Self::BptcRgbf => "bptc_rgbf",
            Self::BptcRgbfu => "bptc_rgbfu",
            Self::Etc => "etc",
            Self::Etc2R11 => "etc2_r11",
            Self::Etc2R11s => "etc2_r11s",
            Self::Etc2Rg11 => "etc2_rg11",
            Self::Etc2Rg11s => "etc2_rg11s",
            Self::Etc2Rgb8 => "etc2_rgb8",
            Self::Etc2Rgba8 => "etc2_rgba8",
            Self::Etc2Rgb8a1 => "etc2_rgb8a1",
            Self::Etc2RaAsRg => "etc2_ra_as_rg",
            Self::Dxt5RaAsRg => "dxt5_ra_as_rg",
            Self::Astc4x4 => "astc_4x4",
            Self::Astc4x4Hdr => "astc_4x4_hdr",
            Self::Astc8x8 => "astc_8x8",
            Self::Astc8x8Hdr => "astc_8x8_hdr",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no [`PixelFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pixel format: {0}")]
pub struct UnknownPixelFormat(pub String);

impl FromStr for PixelFormat {
    type Err = UnknownPixelFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPixelFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for format in PixelFormat::ALL {
            assert_eq!(format.name().parse::<PixelFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("RGBA8".parse::<PixelFormat>().unwrap(), PixelFormat::Rgba8);
        assert_eq!("Rgtc_Rg".parse::<PixelFormat>().unwrap(), PixelFormat::RgtcRg);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "rgba9".parse::<PixelFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unknown pixel format: rgba9");
    }
}
