//! Pixel format to DDS header field mapping.
//!
//! The catalog id and the FourCC are resolved by two separate tables. They
//! are not guaranteed to agree: some formats have a FourCC but no catalog
//! entry, and the BPTC family has a catalog entry but no FourCC. The encoder
//! only requires a catalog entry and writes whatever FourCC is found, zero
//! included. [`mapping_mismatch`] reports the disagreements.

use std::fmt;

use crate::format::DdsFormat;
use crate::header::FourCC;
use crate::PixelFormat;

/// Catalog id for a pixel format, or `None` if it cannot be stored.
pub fn to_dds_format(format: PixelFormat) -> Option<DdsFormat> {
    use PixelFormat as P;

    let dds = match format {
        P::Rgbaf => DdsFormat::Rgba32f,
        P::Rgbf => DdsFormat::Rgb32f,
        P::Rgbah => DdsFormat::Rgba16f,
        P::Rgf => DdsFormat::Rg32f,
        P::Rgba8 => DdsFormat::Rgba8,
        P::Rgh => DdsFormat::Rg16f,
        P::Rf => DdsFormat::R32f,
        P::L8 => DdsFormat::Luminance,
        P::Rh => DdsFormat::R16f,
        P::La8 => DdsFormat::LuminanceAlpha,
        P::Rgbe9995 => DdsFormat::Rgb9e5,
        P::Dxt1 => DdsFormat::Dxt1,
        P::Dxt3 => DdsFormat::Dxt3,
        P::Dxt5 => DdsFormat::Dxt5,
        P::RgtcR => DdsFormat::Ati1,
        P::RgtcRg => DdsFormat::Ati2,
        P::Rgb8 => DdsFormat::Rgb8,
        P::BptcRgbfu => DdsFormat::Bc6u,
        P::BptcRgbf => DdsFormat::Bc6s,
        P::BptcRgba => DdsFormat::Bc7,
        _ => return None,
    };
    Some(dds)
}

/// Code written into the pixel format's FourCC slot.
///
/// Returns [`FourCC::NONE`] when no code is defined.
pub fn to_fourcc(format: PixelFormat) -> FourCC {
    use PixelFormat as P;

    match format {
        P::Dxt1 => FourCC::DXT1,
        P::Dxt3 => FourCC::DXT3,
        P::Dxt5 => FourCC::DXT5,
        P::RgtcR => FourCC::ATI1,
        P::RgtcRg => FourCC::ATI2,
        P::Rgbaf => FourCC::RGBA32F,
        P::Rgbf => FourCC::R32F,
        P::Rgf => FourCC::RG32F,
        P::Rf => FourCC::R32F,
        P::Rgbah => FourCC::RGBA16F,
        P::Rgbh => FourCC::R16F,
        P::Rgh => FourCC::RG16F,
        P::Rh => FourCC::R16F,
        P::Rgbe9995 => FourCC::R9G9B9E5,
        P::Rgba8 => FourCC::R8G8B8A8_UNORM,
        P::Rgb8 => FourCC::R8G8B8A8_UNORM,
        P::Rg8 => FourCC::R8G8_UNORM,
        P::R8 => FourCC::A8_UNORM,
        P::L8 => FourCC::A8_UNORM,
        P::La8 => FourCC::R8G8_UNORM,
        P::Rgba4444 => FourCC::B4G4R4A4_UNORM,
        P::Rgb565 => FourCC::B5G6R5_UNORM,
        _ => FourCC::NONE,
    }
}

/// A pixel format the two mapping tables disagree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMismatch {
    /// A FourCC exists but the format cannot be encoded.
    FourCcWithoutCatalogEntry { format: PixelFormat, four_cc: FourCC },
    /// The format can be encoded but is written with a zero FourCC.
    CatalogEntryWithoutFourCc {
        format: PixelFormat,
        dds_format: DdsFormat,
    },
}

impl fmt::Display for MappingMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FourCcWithoutCatalogEntry { format, four_cc } => {
                write!(f, "{format} has FourCC {four_cc} but no DDS catalog entry")
            }
            Self::CatalogEntryWithoutFourCc { format, dds_format } => write!(
                f,
                "{format} maps to {} but has no FourCC",
                dds_format.info().name
            ),
        }
    }
}

/// Report whether the catalog and FourCC tables disagree on `format`.
pub fn mapping_mismatch(format: PixelFormat) -> Option<MappingMismatch> {
    match (to_dds_format(format), to_fourcc(format)) {
        (None, four_cc) if !four_cc.is_none() => {
            Some(MappingMismatch::FourCcWithoutCatalogEntry { format, four_cc })
        }
        (Some(dds_format), four_cc) if four_cc.is_none() => {
            Some(MappingMismatch::CatalogEntryWithoutFourCc { format, dds_format })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_set() {
        let supported: Vec<_> = PixelFormat::ALL
            .into_iter()
            .filter(|f| to_dds_format(*f).is_some())
            .collect();

        assert_eq!(supported.len(), 20);
        assert!(to_dds_format(PixelFormat::Rg8).is_none());
        assert!(to_dds_format(PixelFormat::Rgbh).is_none());
        assert!(to_dds_format(PixelFormat::Etc2Rgba8).is_none());
        assert!(to_dds_format(PixelFormat::Astc8x8Hdr).is_none());
    }

    #[test]
    fn test_block_formats() {
        assert_eq!(to_dds_format(PixelFormat::Dxt1), Some(DdsFormat::Dxt1));
        assert_eq!(to_dds_format(PixelFormat::RgtcR), Some(DdsFormat::Ati1));
        assert_eq!(to_dds_format(PixelFormat::RgtcRg), Some(DdsFormat::Ati2));
        assert_eq!(to_dds_format(PixelFormat::BptcRgbfu), Some(DdsFormat::Bc6u));
        assert_eq!(to_dds_format(PixelFormat::BptcRgbf), Some(DdsFormat::Bc6s));
        assert_eq!(to_dds_format(PixelFormat::BptcRgba), Some(DdsFormat::Bc7));
    }

    #[test]
    fn test_block_formats_map_to_compressed_entries() {
        use PixelFormat as P;

        for format in PixelFormat::ALL {
            let Some(dds) = to_dds_format(format) else {
                continue;
            };
            let is_block = matches!(
                format,
                P::Dxt1 | P::Dxt3 | P::Dxt5 | P::RgtcR | P::RgtcRg | P::BptcRgba | P::BptcRgbf | P::BptcRgbfu
            );
            assert_eq!(dds.info().compressed, is_block, "{format}");
        }
    }

    #[test]
    fn test_fourcc_codes() {
        assert_eq!(to_fourcc(PixelFormat::Dxt5), FourCC::DXT5);
        assert_eq!(to_fourcc(PixelFormat::Rgba8).as_u32(), 118);
        assert_eq!(to_fourcc(PixelFormat::Rgbaf).as_u32(), 116);
        assert_eq!(to_fourcc(PixelFormat::La8).as_u32(), 124);
        assert_eq!(to_fourcc(PixelFormat::Etc), FourCC::NONE);
    }

    #[test]
    fn test_fourcc_shares_codes_across_channel_counts() {
        // RGB data is labelled with the single-channel or RGBA code
        assert_eq!(to_fourcc(PixelFormat::Rgbf), FourCC::R32F);
        assert_eq!(to_fourcc(PixelFormat::Rgb8), FourCC::R8G8B8A8_UNORM);
    }

    #[test]
    fn test_known_mismatches() {
        let mismatched: Vec<_> = PixelFormat::ALL
            .into_iter()
            .filter_map(mapping_mismatch)
            .collect();

        assert_eq!(mismatched.len(), 8);
        assert!(mismatched.contains(&MappingMismatch::CatalogEntryWithoutFourCc {
            format: PixelFormat::BptcRgba,
            dds_format: DdsFormat::Bc7,
        }));
        assert!(mismatched.contains(&MappingMismatch::FourCcWithoutCatalogEntry {
            format: PixelFormat::Rgb565,
            four_cc: FourCC::B5G6R5_UNORM,
        }));
        assert_eq!(mapping_mismatch(PixelFormat::Rgba8), None);
        assert_eq!(mapping_mismatch(PixelFormat::Astc4x4), None);
    }

    #[test]
    fn test_mismatch_display() {
        let mismatch = mapping_mismatch(PixelFormat::Rgbh).unwrap();
        assert_eq!(mismatch.to_string(), "rgbh has FourCC 111 but no DDS catalog entry");
    }
}
